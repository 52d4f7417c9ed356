//! Shared helpers for HTML serialization and image MIME handling.

pub mod html;
pub mod mime;
