//! In-memory documents and image objects.
//!
//! The extractor only talks to the traits in [`crate::plugin`]. The types
//! here are the request/response values crossing those traits, plus simple
//! in-memory implementations used by the CLI and the tests.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, UploadError};
use crate::plugin::{ImageIdGenerator, ImageStore, RichTextContext};

/// A decoded inline image about to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    /// Requested object name, as produced by the naming policy.
    pub name: String,
    /// MIME type taken from the data URI, e.g. `image/png`.
    pub mime_type: String,
    /// Decoded payload.
    pub data: Vec<u8>,
}

/// Identifiers of a freshly created image object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Final object name. Stores may suffix the requested name to keep it unique.
    pub name: String,
    /// Stable UID used in the rewritten reference.
    pub uid: String,
}

/// What one extraction pass did to a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Created images in document order.
    pub images: Vec<StoredImage>,
    /// Whether the document's raw text was replaced.
    pub text_updated: bool,
}

impl ExtractionReport {
    pub fn count(&self) -> usize {
        self.images.len()
    }
}

// ---------------------------------------------------------------------------
// RichTextDocument
// ---------------------------------------------------------------------------

/// A rich-text document held in memory.
pub struct RichTextDocument {
    id: String,
    text: Option<String>,
    id_generator: Option<Box<dyn ImageIdGenerator + Send + Sync>>,
}

impl RichTextDocument {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: Some(text.into()),
            id_generator: None,
        }
    }

    /// A document that has never been given a body.
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: None,
            id_generator: None,
        }
    }

    /// Install a per-document naming policy.
    pub fn with_id_generator<G>(mut self, generator: G) -> Self
    where
        G: ImageIdGenerator + Send + Sync + 'static,
    {
        self.id_generator = Some(Box::new(generator));
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn into_text(self) -> Option<String> {
        self.text
    }
}

impl fmt::Debug for RichTextDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RichTextDocument")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("custom_id_generator", &self.id_generator.is_some())
            .finish()
    }
}

impl RichTextContext for RichTextDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn raw_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn set_raw_text(&mut self, text: String) -> Result<()> {
        self.text = Some(text);
        Ok(())
    }

    fn image_id_generator(&self) -> Option<&dyn ImageIdGenerator> {
        self.id_generator
            .as_deref()
            .map(|g| g as &dyn ImageIdGenerator)
    }
}

// ---------------------------------------------------------------------------
// MemoryImageStore
// ---------------------------------------------------------------------------

/// How [`MemoryImageStore`] assigns UIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UidPolicy {
    /// Random v4 UUID in simple (32 hex digit) form.
    #[default]
    Random,
    /// Reuse the final object name as UID.
    Name,
}

/// An image object held by [`MemoryImageStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageObject {
    pub name: String,
    pub uid: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Image container kept in memory, with unique object names.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageStore {
    objects: Vec<ImageObject>,
    /// Map from object name to index in objects vec
    name_index: HashMap<String, usize>,
    /// Map from UID to index in objects vec
    uid_index: HashMap<String, usize>,
    uid_policy: UidPolicy,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_uid_policy(uid_policy: UidPolicy) -> Self {
        Self {
            uid_policy,
            ..Self::default()
        }
    }

    /// Get an object by UID.
    pub fn by_uid(&self, uid: &str) -> Option<&ImageObject> {
        self.uid_index.get(uid).map(|&idx| &self.objects[idx])
    }

    /// Get an object by name.
    pub fn by_name(&self, name: &str) -> Option<&ImageObject> {
        self.name_index.get(name).map(|&idx| &self.objects[idx])
    }

    /// Objects in creation order.
    pub fn objects(&self) -> &[ImageObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Pick a free object name, suffixing the requested one when taken.
    fn unique_name(&self, requested: &str) -> String {
        if !self.name_index.contains_key(requested) {
            return requested.to_string();
        }
        for i in 1.. {
            let candidate = format!("{}-{}", requested, i);
            if !self.name_index.contains_key(&candidate) {
                return candidate;
            }
        }
        unreachable!()
    }
}

impl ImageStore for MemoryImageStore {
    fn create_image(&mut self, image: NewImage) -> Result<StoredImage> {
        if image.name.trim().is_empty() {
            return Err(UploadError::Store("image name must not be empty".to_string()));
        }

        let name = self.unique_name(&image.name);
        let uid = match self.uid_policy {
            UidPolicy::Random => uuid::Uuid::new_v4().simple().to_string(),
            UidPolicy::Name => name.clone(),
        };

        let idx = self.objects.len();
        self.name_index.insert(name.clone(), idx);
        self.uid_index.insert(uid.clone(), idx);
        self.objects.push(ImageObject {
            name: name.clone(),
            uid: uid.clone(),
            mime_type: image.mime_type,
            data: image.data,
        });
        log::debug!("Stored image {} ({})", name, uid);

        Ok(StoredImage { name, uid })
    }
}
