//! InlineImages: moves base64 `<img>` payloads out of rich text.
//!
//! Every `<img>` whose `src` is an image data URI is decoded, stored as a new
//! image object, and pointed at that object through `resolveuid/<uid>`.
//! Escaped markup in text (`&lt;img ...&gt;`) is plain text to the parser and
//! is never touched.

use std::collections::HashMap;

use scraper::{ElementRef, Html};

use clipboard_core::document::{ExtractionReport, NewImage};
use clipboard_core::error::{Result, UploadError};
use clipboard_core::options::UploadOptions;
use clipboard_core::plugin::{ImageStore, RichTextContext, Transform};

use crate::image_id::{generate_image_id, TimestampIdGenerator};
use crate::payload::DataUri;
use crate::serialize::{serialize_body, SrcOverrides};

/// A decoded inline image handed to the creation callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// 1-based position among the data URI images of the document.
    pub index: usize,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Rewrite the data URI images of `html`.
///
/// `create` persists one image and returns its UID. It is called once per
/// matching tag, in document order. Returns `None` when the text is to be
/// kept as it is: blank input, or no inline image and
/// `options.always_reserialize` unset.
pub fn rewrite_inline_images<F>(
    html: &str,
    options: &UploadOptions,
    mut create: F,
) -> Result<Option<String>>
where
    F: FnMut(InlineImage) -> Result<String>,
{
    if html.trim().is_empty() {
        return Ok(None);
    }

    let fragment = Html::parse_fragment(html);
    let mut overrides: SrcOverrides = HashMap::new();

    let images = fragment
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "img");

    for element in images {
        let Some(data_uri) = element.value().attr("src").and_then(DataUri::parse) else {
            continue;
        };

        let index = overrides.len() + 1;
        let data = data_uri.decode().map_err(|e| UploadError::InvalidPayload {
            index,
            reason: e.to_string(),
        })?;

        let uid = create(InlineImage {
            index,
            mime_type: data_uri.mime_type(),
            data,
        })?;
        overrides.insert(element.id(), options.reference_for(&uid));
    }

    if overrides.is_empty() && !options.always_reserialize {
        return Ok(None);
    }
    Ok(Some(serialize_body(&fragment, &overrides)))
}

/// Parse and reserialize `html` without rewriting anything.
pub fn normalize_body(html: &str) -> String {
    if html.trim().is_empty() {
        return html.to_string();
    }
    serialize_body(&Html::parse_fragment(html), &SrcOverrides::new())
}

/// Extract the inline images of `document` into `store` and write the
/// rewritten body back.
///
/// Images are created one by one. If a later image fails (bad payload,
/// store error) the error is returned, the body is left as it was, and the
/// images created so far remain in the store.
pub fn extract_image_data_from_body(
    document: &mut dyn RichTextContext,
    store: &mut dyn ImageStore,
    options: &UploadOptions,
) -> Result<ExtractionReport> {
    let fallback = TimestampIdGenerator::from_options(options)?;
    let mut images = Vec::new();

    let rewritten = {
        let context: &dyn RichTextContext = &*document;
        let Some(text) = context.raw_text() else {
            return Ok(ExtractionReport::default());
        };

        rewrite_inline_images(text, options, |image| {
            let name = generate_image_id(context, &fallback);
            let stored = store.create_image(NewImage {
                name,
                mime_type: image.mime_type,
                data: image.data,
            })?;
            log::debug!(
                "Extracted inline image {} → {} ({})",
                image.index,
                stored.name,
                stored.uid
            );
            let uid = stored.uid.clone();
            images.push(stored);
            Ok(uid)
        })?
    };

    let text_updated = match rewritten {
        Some(text) => {
            document.set_raw_text(text)?;
            true
        }
        None => false,
    };

    if !images.is_empty() {
        log::info!(
            "Extracted {} inline images from {}",
            images.len(),
            document.id()
        );
    }
    Ok(ExtractionReport {
        images,
        text_updated,
    })
}

/// Save-time transform wrapping [`extract_image_data_from_body`].
pub struct InlineImages;

impl Transform for InlineImages {
    fn name(&self) -> &str {
        "InlineImages"
    }

    fn apply(
        &self,
        document: &mut dyn RichTextContext,
        store: &mut dyn ImageStore,
        options: &UploadOptions,
    ) -> Result<()> {
        extract_image_data_from_body(document, store, options).map(|_| ())
    }
}
