//! Document uploads: validation, text extraction, optional S3 storage and the
//! theme draft built from the extracted text.

pub mod extract;
pub mod handlers;
