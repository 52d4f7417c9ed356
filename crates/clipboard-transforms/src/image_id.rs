//! Naming policy for extracted images.
//!
//! A context may carry its own [`ImageIdGenerator`]; otherwise names are
//! built from a prefix and the local time, e.g.
//! `Clipboard_image_2026-10-19-1403.512077`. Stores are expected to make
//! names unique, so the timestamp only has to make collisions unlikely.

use chrono::Local;

use clipboard_core::error::Result;
use clipboard_core::options::{
    validate_timestamp_format, UploadOptions, DEFAULT_ID_PREFIX, DEFAULT_TIMESTAMP_FORMAT,
};
use clipboard_core::plugin::{ImageIdGenerator, RichTextContext};

/// Fallback generator: `<prefix><local time>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampIdGenerator {
    prefix: String,
    format: String,
}

impl TimestampIdGenerator {
    pub fn new(prefix: impl Into<String>, format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        validate_timestamp_format(&format)?;
        Ok(Self {
            prefix: prefix.into(),
            format,
        })
    }

    pub fn from_options(options: &UploadOptions) -> Result<Self> {
        Self::new(options.id_prefix.clone(), options.timestamp_format.clone())
    }
}

impl Default for TimestampIdGenerator {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_ID_PREFIX.to_string(),
            format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl ImageIdGenerator for TimestampIdGenerator {
    fn generate_image_id(&self, _context_id: &str) -> String {
        format!("{}{}", self.prefix, Local::now().format(&self.format))
    }
}

/// Name a new image for `context`, preferring the context's own generator.
pub fn generate_image_id(context: &dyn RichTextContext, fallback: &dyn ImageIdGenerator) -> String {
    match context.image_id_generator() {
        Some(generator) => generator.generate_image_id(context.id()),
        None => fallback.generate_image_id(context.id()),
    }
}
