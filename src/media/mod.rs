//! Image persistence boundary.
//!
//! Unrelated to cookies; lives here because the host application reaches
//! both through the same native bridge.

mod gallery;

pub use gallery::{DirectoryMediaStore, MediaStore};
