//! HTTP handlers for resource CRUD and image upload.

pub mod resource;
pub mod upload;
