pub mod document_service;
pub mod draft_service;

pub use document_service::*;
pub use draft_service::*;
