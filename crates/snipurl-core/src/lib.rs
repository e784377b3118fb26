//! Core types and traits for the snipurl URL shortener.
//!
//! This crate provides the persisted record model, the validated short
//! code type, and the key-value storage contract shared by the shortener
//! and redirector services.

pub mod error;
pub mod kv;
pub mod record;
pub mod shortcode;

pub use error::{Result, StorageError};
pub use kv::KvStore;
pub use record::UrlRecord;
pub use shortcode::{InvalidCode, ShortCode};
