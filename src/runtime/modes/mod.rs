//! Mode routing
//!
//! Only the HTTP server mode exists; `config generate` is handled in `main`.

pub mod server;

pub use server::run_server;
