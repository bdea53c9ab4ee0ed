use crate::base::context::IoResultExt;
use crate::base::storeerror::StoreError;
use std::path::{Path, PathBuf};

/// Persists image bytes into a public, app-namespaced media location.
///
/// Reports success as a plain `bool`; failures are logged, not returned.
pub trait MediaStore: Send + Sync {
    fn save_image(&self, bytes: &[u8], name: &str, mime: &str) -> bool;
}

/// Writes images under `<root>/<namespace>/`.
#[derive(Debug, Clone)]
pub struct DirectoryMediaStore {
    root: PathBuf,
    namespace: String,
}

impl DirectoryMediaStore {
    pub fn new(root: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            namespace: namespace.into(),
        }
    }

    /// Directory images land in.
    pub fn album_dir(&self) -> PathBuf {
        self.root.join(&self.namespace)
    }

    /// Where `name` would be written for `mime`. `None` when the name is
    /// empty or tries to leave the album directory.
    pub fn target_path(&self, name: &str, mime: &str) -> Option<PathBuf> {
        let file_name = Path::new(name).file_name()?.to_str()?;
        if file_name != name || file_name.starts_with('.') {
            return None;
        }

        let mut file_name = file_name.to_string();
        if Path::new(&file_name).extension().is_none() {
            if let Some(ext) = extension_for_mime(mime) {
                file_name.push('.');
                file_name.push_str(ext);
            }
        }

        Some(self.album_dir().join(file_name))
    }

    fn write(&self, bytes: &[u8], name: &str, mime: &str) -> Result<PathBuf, StoreError> {
        let path = self
            .target_path(name, mime)
            .ok_or_else(|| StoreError::invalid_data(format!("unusable image name {:?}", name)))?;

        let dir = self.album_dir();
        std::fs::create_dir_all(&dir).store_context(&dir)?;
        std::fs::write(&path, bytes).store_context(&path)?;
        Ok(path)
    }
}

impl MediaStore for DirectoryMediaStore {
    fn save_image(&self, bytes: &[u8], name: &str, mime: &str) -> bool {
        match self.write(bytes, name, mime) {
            Ok(path) => {
                tracing::debug!(path = %path.display(), size = bytes.len(), "saved image");
                true
            }
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "failed to save image");
                false
            }
        }
    }
}

fn extension_for_mime(mime: &str) -> Option<&'static str> {
    let essence = mime.split(';').next().unwrap_or("").trim();
    match essence.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        "image/bmp" => Some("bmp"),
        _ => None,
    }
}
