//! Foundation types for the SOSI toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Interned document identifiers
//! - [`Position`], [`Span`] - Line/column positions for syntax nodes
//! - [`QName`] - Dotted qualified names as ordered segments
//!
//! This module has NO dependencies on other sosi modules.

mod file_id;
mod position;
mod qname;

pub use file_id::FileId;
pub use position::{Position, Span};
pub use qname::QName;
