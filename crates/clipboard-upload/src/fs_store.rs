//! Filesystem image store: one file per extracted image.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use clipboard_core::document::{NewImage, StoredImage};
use clipboard_core::error::{Result, UploadError};
use clipboard_core::plugin::ImageStore;
use clipboard_utils::mime::extension_from_mime;

/// Writes images to `<dir>/<name>.<ext>`. The UID of an image is its file
/// name, so a reference prefix of `images/` yields working relative links.
#[derive(Debug)]
pub struct FsImageStore {
    dir: PathBuf,
    created: Vec<PathBuf>,
}

impl FsImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            created: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in creation order.
    pub fn created(&self) -> &[PathBuf] {
        &self.created
    }
}

impl ImageStore for FsImageStore {
    fn create_image(&mut self, image: NewImage) -> Result<StoredImage> {
        let base = sanitize_name(&image.name);
        if base.is_empty() {
            return Err(UploadError::Store(format!(
                "unusable image name '{}'",
                image.name
            )));
        }
        let ext = extension_from_mime(&image.mime_type);

        for i in 0.. {
            let name = if i == 0 {
                base.clone()
            } else {
                format!("{}-{}", base, i)
            };
            let file_name = format!("{}.{}", name, ext);
            let path = self.dir.join(&file_name);

            // create_new fails when the name is taken, so nothing is overwritten
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };
            file.write_all(&image.data)?;

            log::debug!("Wrote {} ({} bytes)", path.display(), image.data.len());
            self.created.push(path);
            return Ok(StoredImage {
                name,
                uid: file_name,
            });
        }
        unreachable!()
    }
}

/// Keep names usable as file names on every platform.
fn sanitize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> NewImage {
        NewImage {
            name: name.to_string(),
            mime_type: "image/png".to_string(),
            data: b"png bytes".to_vec(),
        }
    }

    #[test]
    fn test_writes_files_with_unique_names() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FsImageStore::new(tmp.path().join("images")).unwrap();

        let a = store.create_image(png("Clipboard_image_1")).unwrap();
        let b = store.create_image(png("Clipboard_image_1")).unwrap();

        assert_eq!(a.name, "Clipboard_image_1");
        assert_eq!(a.uid, "Clipboard_image_1.png");
        assert_eq!(b.name, "Clipboard_image_1-1");
        assert_eq!(b.uid, "Clipboard_image_1-1.png");
        assert_eq!(store.created().len(), 2);

        let data = fs::read(store.dir().join("Clipboard_image_1-1.png")).unwrap();
        assert_eq!(data, b"png bytes");
    }

    #[test]
    fn test_existing_files_are_not_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("pasted.png"), b"original").unwrap();
        let mut store = FsImageStore::new(tmp.path()).unwrap();

        let stored = store.create_image(png("pasted")).unwrap();

        assert_eq!(stored.uid, "pasted-1.png");
        assert_eq!(fs::read(tmp.path().join("pasted.png")).unwrap(), b"original");
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Clipboard_image_2026-10-19-1403.512077"), "Clipboard_image_2026-10-19-1403.512077");
        assert_eq!(sanitize_name("../etc/passwd"), "_etc_passwd");
        assert_eq!(sanitize_name("a b:c"), "a_b_c");
        assert_eq!(sanitize_name(" .. "), "");
    }

    #[test]
    fn test_rejects_unusable_name() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FsImageStore::new(tmp.path()).unwrap();
        let err = store.create_image(png("..")).unwrap_err();
        assert!(matches!(err, UploadError::Store(_)));
    }
}
