//! Typed access to request query parameters.
//!
//! This crate converts raw, decoded query-string values into typed values and
//! renders typed values back into canonical URL segments:
//! - **Getters**: `get_opt_*` fall back to a default when a parameter is
//!   absent; `get_man_*` additionally fail when no value results
//! - **Putters**: `put_*` render `/<name>/<value>` segments for outgoing links
//! - **Obfuscated IDs**: database IDs travel through URLs as opaque strings,
//!   keyed by a label naming the ID domain
//! - **Redirect safety**: URL getters only accept relative references by
//!   default
//!
//! # Core Types
//!
//! - [`ParameterAccessor`]: getters and putters over one request's parameters
//! - [`ParameterSource`]: read-only snapshot of decoded query parameters
//! - [`QueryParams`]: the stock [`ParameterSource`], parsed from a query string
//! - [`IdObfuscator`]: encode/decode of IDs under a label
//! - [`ParamError`]: `Missing` or `Malformed`, both answered with `400 Bad Request`
//!
//! # Examples
//!
//! ```
//! use cgi_core::{KeyedObfuscator, LabelKey, ParameterAccessor, QueryParams};
//!
//! let codec = KeyedObfuscator::builder(b"site secret")
//!     .label("usr", LabelKey { length: 4, key: 0x5eed, mask: 0x1234_5678 })
//!     .build()?;
//!
//! // Building a link
//! let empty = QueryParams::new();
//! let links = ParameterAccessor::new(&empty, &codec);
//! let segment = links.put_id("user", Some(42), "usr")?;
//! assert_eq!(links.put_url("back", Some("/users")), "/back/%2Fusers");
//!
//! // Reading it back on the next request
//! let code = segment.rsplit('/').next().unwrap_or_default();
//! let params = QueryParams::new().with("user", code).with("back", "/users");
//! let cgi = ParameterAccessor::new(&params, &codec);
//!
//! assert_eq!(cgi.get_man_id("user", "usr", None)?, 42);
//! assert_eq!(cgi.get_man_url("back", None, true)?, "/users");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod accessor;
mod cast;
mod error;
mod logging;
mod obfuscator;
mod slug;
mod source;
mod url;
mod web;

#[cfg(test)]
mod test_utils;

pub use accessor::{ParameterAccessor, DEFAULT_SLUG_EXTENSION};
pub use cast::{Cast, CastError, CastErrorKind};
pub use error::{Cause, MalformedKind, ParamError};
pub use obfuscator::{
    IdObfuscator, KeyedObfuscator, KeyedObfuscatorBuilder, LabelKey, ObfuscatorError,
    PlainObfuscator,
};
pub use slug::text_to_slug;
pub use source::{ParameterSource, QueryParams};
pub use url::is_relative;
