//! Remote surface of the forwarding module.
//!
//! [`Backend`] is the seam the dashboard talks through; [`HttpBackend`] is the
//! real implementation.  The [`ops`] module fixes the call shapes the config
//! editor uses on top of it.

pub mod backend;
pub mod http;
pub mod ops;

pub use backend::Backend;
pub use http::HttpBackend;
