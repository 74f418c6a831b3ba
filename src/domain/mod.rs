//! Domain layer for the Bookscout plugin.
//!
//! Core types independent of Zellij APIs and of rendering: the normalized
//! [`Book`] record, the [`SearchField`] selector, and the error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: Book record, sentinels and the search field selector

pub mod book;
pub mod error;

pub use book::{Book, SearchField, EBOOK_AVAILABLE, EBOOK_UNAVAILABLE, UNKNOWN};
pub use error::{BookscoutError, Result};
