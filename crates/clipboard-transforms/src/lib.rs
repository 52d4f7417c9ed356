//! Save-time transforms for rich-text documents.

pub mod image_id;
pub mod inline_images;
pub mod payload;
pub mod serialize;

use clipboard_core::pipeline::SavePipeline;
use clipboard_core::plugin::Transform;

/// Return the standard save-time transform chain.
///
/// Order:
///  1. InlineImages (always)
pub fn standard_transforms() -> Vec<Box<dyn Transform>> {
    vec![Box::new(inline_images::InlineImages)]
}

/// A [`SavePipeline`] loaded with [`standard_transforms`].
pub fn standard_pipeline() -> SavePipeline {
    standard_transforms()
        .into_iter()
        .fold(SavePipeline::new(), |pipeline, t| pipeline.transform(t))
}
