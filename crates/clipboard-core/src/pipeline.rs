//! Save pipeline: runs the registered transforms against a document.
//!
//! The host platform calls [`SavePipeline::on_save`] after an edit. Each
//! transform sees the same document and store, in registration order.
//! Errors are returned as-is; whatever a transform already persisted stays.

use log::info;

use crate::error::Result;
use crate::options::UploadOptions;
use crate::plugin::{ImageStore, RichTextContext, Transform};

/// Ordered list of save-time transforms.
#[derive(Default)]
pub struct SavePipeline {
    transforms: Vec<Box<dyn Transform>>,
}

impl SavePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transform. Transforms are applied in the order they are added.
    pub fn transform(mut self, transform: Box<dyn Transform>) -> Self {
        self.transforms.push(transform);
        self
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Run every applicable transform on `document`.
    pub fn on_save(
        &self,
        document: &mut dyn RichTextContext,
        store: &mut dyn ImageStore,
        options: &UploadOptions,
    ) -> Result<()> {
        options.validate()?;

        for transform in &self.transforms {
            if !transform.should_run(options) {
                info!("Skipping transform: {}", transform.name());
                continue;
            }
            info!("Running transform {} on {}", transform.name(), document.id());
            transform.apply(document, store, options)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{MemoryImageStore, RichTextDocument};
    use crate::error::UploadError;

    struct Append {
        suffix: &'static str,
    }

    impl Transform for Append {
        fn name(&self) -> &str {
            "Append"
        }

        fn apply(
            &self,
            document: &mut dyn RichTextContext,
            _store: &mut dyn ImageStore,
            _options: &UploadOptions,
        ) -> Result<()> {
            let text = format!("{}{}", document.raw_text().unwrap_or(""), self.suffix);
            document.set_raw_text(text)
        }
    }

    struct Verbose;

    impl Transform for Verbose {
        fn name(&self) -> &str {
            "Verbose"
        }

        fn should_run(&self, options: &UploadOptions) -> bool {
            options.verbose > 0
        }

        fn apply(
            &self,
            _document: &mut dyn RichTextContext,
            _store: &mut dyn ImageStore,
            _options: &UploadOptions,
        ) -> Result<()> {
            Err(UploadError::Other("should not run".to_string()))
        }
    }

    #[test]
    fn test_transforms_run_in_order() {
        let pipeline = SavePipeline::new()
            .transform(Box::new(Append { suffix: "a" }))
            .transform(Box::new(Verbose))
            .transform(Box::new(Append { suffix: "b" }));
        assert_eq!(pipeline.len(), 3);

        let mut doc = RichTextDocument::new("doc", "x");
        let mut store = MemoryImageStore::new();
        pipeline
            .on_save(&mut doc, &mut store, &UploadOptions::default())
            .unwrap();

        assert_eq!(doc.text(), Some("xab"));
    }

    #[test]
    fn test_invalid_options_stop_before_transforms() {
        let pipeline = SavePipeline::new().transform(Box::new(Append { suffix: "a" }));
        let mut opts = UploadOptions::default();
        opts.reference_prefix = String::new();

        let mut doc = RichTextDocument::new("doc", "x");
        let mut store = MemoryImageStore::new();
        let err = pipeline.on_save(&mut doc, &mut store, &opts).unwrap_err();

        assert!(matches!(err, UploadError::Config(_)));
        assert_eq!(doc.text(), Some("x"));
    }
}
