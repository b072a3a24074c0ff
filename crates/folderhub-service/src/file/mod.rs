//! File registration and filing services.

pub mod service;

pub use service::{FileService, MoveFilesRequest, RegisterFileRequest};
