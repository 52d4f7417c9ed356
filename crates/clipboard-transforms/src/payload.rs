//! Data URI matcher for `<img src>` values.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

use clipboard_utils::mime::image_mime_from_subtype;

/// `data:image/<subtype>;base64,<payload>`, subtype of 2 to 5 word characters.
/// The payload is everything up to the end of the attribute value.
static IMAGE_DATA_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*(?i:data:image/)(\w{2,5})(?i:;base64,)(.+)$")
        .expect("BUG: hardcoded data URI pattern is invalid")
});

/// An inline image found in a `src` attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUri<'a> {
    pub subtype: &'a str,
    pub payload: &'a str,
}

impl<'a> DataUri<'a> {
    /// Match an attribute value. Returns `None` for anything that is not a
    /// base64 image data URI.
    pub fn parse(value: &'a str) -> Option<Self> {
        let caps = IMAGE_DATA_URI.captures(value)?;
        Some(Self {
            subtype: caps.get(1)?.as_str(),
            payload: caps.get(2)?.as_str(),
        })
    }

    pub fn mime_type(&self) -> String {
        image_mime_from_subtype(self.subtype)
    }

    /// Decode the payload. Pasted data is sometimes wrapped across lines, so
    /// a failed decode is retried once with whitespace removed.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        match STANDARD.decode(self.payload) {
            Ok(data) => Ok(data),
            Err(_) => {
                let cleaned: String = self
                    .payload
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                STANDARD.decode(cleaned)
            }
        }
    }
}
