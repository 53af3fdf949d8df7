//! ResumeTrack - resume hosting backend with view analytics
//!
//! Stores resumes behind share tokens, serves uploaded files and records
//! every preview as a view event with unique-visitor detection.
//!
//! # Architecture
//! - `analytics`: view tracking, UA parsing, unique-view rule
//! - `storage`: SeaORM backend (SQLite / MySQL / PostgreSQL)
//! - `services`: analytics, resume and upload business logic
//! - `api`: HTTP handlers, bearer auth middleware, response envelope
//! - `config`: TOML + env configuration
//! - `runtime`: startup, shutdown and the server mode
//! - `system`: logging

pub mod analytics;
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
