//! Core types for extracting inline clipboard images from rich text.

pub mod document;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod plugin;
