pub mod templates;
pub mod upload;
