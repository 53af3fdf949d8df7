pub mod image;
pub mod resume;
pub mod view;

pub use image::Entity as ImageEntity;
pub use resume::Entity as ResumeEntity;
pub use view::Entity as ViewEntity;
