//! Options shared by the extractor, the save pipeline and the CLI.

use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{Result, UploadError};

/// Default prefix of the rewritten `src` attribute.
pub const DEFAULT_REFERENCE_PREFIX: &str = "resolveuid/";

/// Default prefix of generated image names.
pub const DEFAULT_ID_PREFIX: &str = "Clipboard_image_";

/// Default strftime pattern appended to [`DEFAULT_ID_PREFIX`].
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H%M.%6f";

/// All options controlling a rewrite pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadOptions {
    // -- General --
    pub verbose: u8,

    // -- Rewrite --
    /// Prepended to the stored image UID to build the new `src`.
    pub reference_prefix: String,
    /// Reserialize documents even when no inline image was found.
    pub always_reserialize: bool,

    // -- Naming --
    pub id_prefix: String,
    pub timestamp_format: String,

    // -- Storage (CLI only) --
    pub store_dir: Option<PathBuf>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            verbose: 0,
            reference_prefix: DEFAULT_REFERENCE_PREFIX.to_string(),
            always_reserialize: false,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            store_dir: None,
        }
    }
}

impl UploadOptions {
    /// Check the options before any document is touched.
    pub fn validate(&self) -> Result<()> {
        if self.reference_prefix.trim().is_empty() {
            return Err(UploadError::Config(
                "reference_prefix must not be empty".to_string(),
            ));
        }
        validate_timestamp_format(&self.timestamp_format)
    }

    /// Build the `src` value pointing at a stored image.
    pub fn reference_for(&self, uid: &str) -> String {
        format!("{}{}", self.reference_prefix, uid)
    }
}

/// Reject strftime patterns chrono cannot render.
pub fn validate_timestamp_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(UploadError::Config(format!(
            "invalid timestamp_format '{}'",
            format
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = UploadOptions::default();
        assert_eq!(opts.reference_prefix, "resolveuid/");
        assert_eq!(opts.id_prefix, "Clipboard_image_");
        assert!(!opts.always_reserialize);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_reference_for() {
        let opts = UploadOptions::default();
        assert_eq!(opts.reference_for("abc123"), "resolveuid/abc123");
    }

    #[test]
    fn test_toml_partial_config() {
        let toml_str = r#"
verbose = 2
reference_prefix = "../resolveuid/"
"#;
        let opts: UploadOptions = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.verbose, 2);
        assert_eq!(opts.reference_prefix, "../resolveuid/");
        // Defaults filled in
        assert_eq!(opts.id_prefix, DEFAULT_ID_PREFIX);
        assert_eq!(opts.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
        assert_eq!(opts.store_dir, None);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut opts = UploadOptions::default();
        opts.always_reserialize = true;
        opts.id_prefix = "pasted-".to_string();
        opts.store_dir = Some(PathBuf::from("/tmp/images"));

        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: UploadOptions = toml::from_str(&toml_str).unwrap();

        assert!(parsed.always_reserialize);
        assert_eq!(parsed.id_prefix, "pasted-");
        assert_eq!(parsed.store_dir, Some(PathBuf::from("/tmp/images")));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut opts = UploadOptions::default();
        opts.reference_prefix = "  ".to_string();
        assert!(matches!(opts.validate(), Err(UploadError::Config(_))));

        let mut opts = UploadOptions::default();
        opts.timestamp_format = "%Y-%Q".to_string();
        assert!(matches!(opts.validate(), Err(UploadError::Config(_))));
    }
}
