//! Base types and error handling.
//!
//! - [`StoreError`](storeerror::StoreError): failures reading a cookie store
//! - [`IoResultExt`](context::IoResultExt): path context for IO errors

pub mod context;
pub mod storeerror;

#[cfg(test)]
mod tests;
