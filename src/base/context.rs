//! Ergonomic error context helpers.
//!
//! Provides an extension trait for attaching the store path to IO errors,
//! converting them into context-rich `StoreError` variants.

use crate::base::storeerror::StoreError;
use std::io;
use std::path::Path;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Attach the path of the cookie store being read.
    ///
    /// `NotFound` becomes [`StoreError::FileNotFound`]; anything else becomes
    /// [`StoreError::Io`].
    ///
    /// # Example
    /// ```ignore
    /// use cookieheader::base::context::IoResultExt;
    ///
    /// let data = std::fs::read(&path).store_context(&path)?;
    /// // Error: "Cookie store file not found: /tmp/Cookies.binarycookies"
    /// ```
    fn store_context(self, path: &Path) -> Result<T, StoreError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn store_context(self, path: &Path) -> Result<T, StoreError> {
        self.map_err(|e| {
            let display = path.display().to_string();
            if e.kind() == io::ErrorKind::NotFound {
                StoreError::file_not_found(display)
            } else {
                StoreError::io(display, e)
            }
        })
    }
}
