//! Collaborator traits: the document being saved, the image store, the
//! naming policy hook and save-time transforms.

use crate::document::{NewImage, StoredImage};
use crate::error::Result;
use crate::options::UploadOptions;

/// A rich-text content object whose body is rewritten on save.
pub trait RichTextContext {
    /// Identifier of the content object (handed to id generators).
    fn id(&self) -> &str;

    /// The stored rich-text body, `None` when the object has no text yet.
    fn raw_text(&self) -> Option<&str>;

    /// Replace the stored rich-text body.
    fn set_raw_text(&mut self, text: String) -> Result<()>;

    /// Naming policy override discovered on the context.
    ///
    /// Contexts without one get the timestamp fallback.
    fn image_id_generator(&self) -> Option<&dyn ImageIdGenerator> {
        None
    }
}

/// Content repository side: persists decoded image bytes as a new object.
///
/// Each call is expected to be durable on return. The extractor never
/// rolls back objects created earlier in the same pass.
pub trait ImageStore {
    fn create_image(&mut self, image: NewImage) -> Result<StoredImage>;
}

/// Produces the requested name of a newly extracted image.
pub trait ImageIdGenerator {
    fn generate_image_id(&self, context_id: &str) -> String;
}

impl<F> ImageIdGenerator for F
where
    F: Fn(&str) -> String,
{
    fn generate_image_id(&self, context_id: &str) -> String {
        self(context_id)
    }
}

/// A transform run against a document when it is saved.
pub trait Transform: Send + Sync {
    /// Human-readable name of this transform.
    fn name(&self) -> &str;

    /// Apply this transform to the document, creating objects in `store`.
    fn apply(
        &self,
        document: &mut dyn RichTextContext,
        store: &mut dyn ImageStore,
        options: &UploadOptions,
    ) -> Result<()>;

    /// Whether this transform should run given the current options.
    /// Default: always run.
    fn should_run(&self, _options: &UploadOptions) -> bool {
        true
    }
}
