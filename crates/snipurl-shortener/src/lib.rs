//! Link creation for snipurl.
//!
//! This crate owns URL validation, short-code allocation and the
//! conditional write that claims a code. Resolution and click counting
//! live in `snipurl-redirector`.

pub mod allocator;
pub mod error;
pub mod service;

pub use allocator::{CodeAllocator, GENERATED_CODE_LEN};
pub use error::ShortenError;
pub use service::ShortenerService;
