//! HTTP middleware for axum.
//!
//! - `caller` - Caller identity extractors

pub mod caller;

pub use caller::{Caller, CallerRequired, OptionalCaller, CALLER_HEADER};
