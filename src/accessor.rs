//! Typed access to the query parameters of a request.
//!
//! [`ParameterAccessor`] pairs a [`ParameterSource`] with an
//! [`IdObfuscator`] and exposes two families of operations:
//!
//! - **getters** (`get_opt_*`, `get_man_*`) coerce raw text into typed values
//! - **putters** (`put_*`) render typed values as `/<name>/<value>` URL
//!   segments for outgoing links
//!
//! # Absent versus invalid
//!
//! An absent parameter (or one whose value is the empty string) resolves to
//! the caller's default. A present value that fails coercion is always a
//! [`ParamError::Malformed`], even when a default is available: bad client
//! input is never silently replaced.
//!
//! # Example Flow
//!
//! ```
//! use cgi_core::{ParameterAccessor, PlainObfuscator, QueryParams};
//!
//! let params = QueryParams::parse("page=2&q=rust+cgi&debug=yes");
//! let cgi = ParameterAccessor::new(&params, &PlainObfuscator).with_request_id("req-1");
//!
//! assert_eq!(cgi.get_man_int("page", None)?, 2);
//! assert_eq!(cgi.get_opt_string("q", None)?.as_deref(), Some("rust cgi"));
//! assert_eq!(cgi.get_opt_bool("debug", Some(false))?, Some(true));
//! assert_eq!(cgi.get_opt_int("limit", Some(20))?, Some(20));
//!
//! let link = format!("{}{}", cgi.put_int("page", Some(3)), cgi.put_string("q", Some("rust cgi")));
//! assert_eq!(link, "/page/3/q/rust%20cgi");
//! # Ok::<(), cgi_core::ParamError>(())
//! ```

mod get;
mod put;

pub use put::DEFAULT_SLUG_EXTENSION;

use crate::cast::Cast;
use crate::error::{MalformedKind, ParamError};
use crate::logging::ParamLog;
use crate::obfuscator::IdObfuscator;
use crate::source::ParameterSource;

/// Typed getters and URL-segment putters over one request's parameters.
///
/// The accessor only borrows its collaborators and holds no mutable state;
/// every operation is a pure function of its arguments and the borrowed
/// source and obfuscator. It is `Send + Sync` whenever they are.
#[derive(Debug)]
pub struct ParameterAccessor<'a, S: ?Sized, O: ?Sized> {
    source: &'a S,
    obfuscator: &'a O,
    request_id: Option<String>,
}

impl<'a, S, O> ParameterAccessor<'a, S, O>
where
    S: ParameterSource + ?Sized,
    O: IdObfuscator + ?Sized,
{
    /// Creates an accessor over `source`, decoding IDs with `obfuscator`.
    pub fn new(source: &'a S, obfuscator: &'a O) -> Self {
        Self {
            source,
            obfuscator,
            request_id: None,
        }
    }

    /// Attaches a request ID that is recorded with every log event.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Returns the request ID, if one was attached.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns the underlying parameter source.
    pub fn source(&self) -> &'a S {
        self.source
    }

    /// Returns the ID obfuscator.
    pub fn obfuscator(&self) -> &'a O {
        self.obfuscator
    }

    fn log(&self) -> ParamLog<'_> {
        ParamLog::new(self.request_id.as_deref())
    }

    /// Looks up the raw value of `name`; the empty string counts as absent.
    fn raw(&self, name: &str) -> Option<&'a str> {
        self.source.get_param(name).filter(|raw| !raw.is_empty())
    }

    /// Resolves `name` to an optional `T`.
    ///
    /// Absent: `default`. Present: `T::cast(raw)`, or `Malformed`.
    fn coerce<T: Coerce>(&self, name: &str, default: Option<T>) -> Result<Option<T>, ParamError> {
        let Some(raw) = self.raw(name) else {
            self.log().defaulted(name, default.is_some());
            return Ok(default);
        };

        T::cast(raw).map(Some).map_err(|cause| {
            self.reject(ParamError::malformed(
                name,
                raw,
                T::MALFORMED,
                Some(cause.into()),
            ))
        })
    }

    /// Turns an unresolved optional value into `Missing`.
    fn require<T>(&self, name: &str, value: Option<T>) -> Result<T, ParamError> {
        value.ok_or_else(|| self.reject(ParamError::missing(name)))
    }

    fn reject(&self, error: ParamError) -> ParamError {
        self.log().rejected(&error);
        error
    }
}

/// A [`Cast`] target together with the error kind reported when it fails.
trait Coerce: Cast {
    const MALFORMED: MalformedKind;
}

impl Coerce for bool {
    const MALFORMED: MalformedKind = MalformedKind::NotBool;
}

impl Coerce for i64 {
    const MALFORMED: MalformedKind = MalformedKind::NotInt;
}

impl Coerce for f64 {
    const MALFORMED: MalformedKind = MalformedKind::NotFloat;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obfuscator::PlainObfuscator;
    use crate::source::QueryParams;

    #[test]
    fn raw_treats_empty_as_absent() {
        let params = QueryParams::new().with("empty", "").with("set", "x");
        let cgi = ParameterAccessor::new(&params, &PlainObfuscator);

        assert_eq!(cgi.raw("empty"), None);
        assert_eq!(cgi.raw("set"), Some("x"));
        assert_eq!(cgi.raw("unset"), None);
    }

    #[test]
    fn coerce_present_value_ignores_default() {
        let params = QueryParams::new().with("n", "5");
        let cgi = ParameterAccessor::new(&params, &PlainObfuscator);

        assert_eq!(cgi.coerce::<i64>("n", Some(9)).unwrap(), Some(5));
    }

    #[test]
    fn coerce_invalid_value_fails_despite_default() {
        let params = QueryParams::new().with("n", "five");
        let cgi = ParameterAccessor::new(&params, &PlainObfuscator);

        let err = cgi.coerce::<i64>("n", Some(9)).unwrap_err();
        assert_eq!(err.kind(), Some(MalformedKind::NotInt));
        assert_eq!(err.raw(), Some("five"));
    }

    #[test]
    fn require_maps_none_to_missing() {
        let params = QueryParams::new();
        let cgi = ParameterAccessor::new(&params, &PlainObfuscator);

        assert_eq!(cgi.require("x", Some(1)).unwrap(), 1);
        assert!(cgi.require::<i64>("x", None).unwrap_err().is_missing());
    }

    #[test]
    fn request_id_is_carried() {
        let params = QueryParams::new();
        let cgi = ParameterAccessor::new(&params, &PlainObfuscator).with_request_id("req-9");
        assert_eq!(cgi.request_id(), Some("req-9"));
    }

    #[test]
    fn accessor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ParameterAccessor<'static, QueryParams, PlainObfuscator>>();
    }

    mod proptests {
        use super::*;
        use crate::test_utils::{arb_bool_token, arb_non_relative_url, arb_param_name, arb_text};
        use proptest::prelude::*;

        proptest! {
            /// Property: absent and empty parameters both resolve to the default
            #[test]
            fn proptest_absent_equals_empty(name in arb_param_name(), default in any::<Option<i64>>()) {
                let absent = QueryParams::new();
                let empty = QueryParams::new().with(name.clone(), "");

                let a = ParameterAccessor::new(&absent, &PlainObfuscator);
                let e = ParameterAccessor::new(&empty, &PlainObfuscator);

                prop_assert_eq!(a.get_opt_int(&name, default).unwrap(), default);
                prop_assert_eq!(e.get_opt_int(&name, default).unwrap(), default);
                prop_assert_eq!(a.get_man_int(&name, None).unwrap_err().is_missing(), true);
                prop_assert_eq!(e.get_man_int(&name, None).unwrap_err().is_missing(), true);
            }

            /// Property: a mandatory getter with a default never fails on an absent parameter
            #[test]
            fn proptest_man_with_default_never_missing(name in arb_param_name(), default in any::<bool>()) {
                let params = QueryParams::new();
                let cgi = ParameterAccessor::new(&params, &PlainObfuscator);

                prop_assert_eq!(cgi.get_man_bool(&name, Some(default)).unwrap(), default);
            }

            /// Property: every boolean token is understood
            #[test]
            fn proptest_bool_tokens((token, value) in arb_bool_token()) {
                let params = QueryParams::new().with("b", token);
                let cgi = ParameterAccessor::new(&params, &PlainObfuscator);

                prop_assert_eq!(cgi.get_man_bool("b", None).unwrap(), value);
            }

            /// Property: non-relative URLs are rejected although they are valid strings
            #[test]
            fn proptest_non_relative_rejected(url in arb_non_relative_url()) {
                let params = QueryParams::new().with("redirect", url.clone());
                let cgi = ParameterAccessor::new(&params, &PlainObfuscator);

                prop_assert_eq!(cgi.get_opt_string("redirect", None).unwrap(), Some(url));
                let err = cgi.get_opt_url("redirect", Some("/"), true).unwrap_err();
                prop_assert_eq!(err.kind(), Some(MalformedKind::NotRelativeUrl));
            }

            /// Property: put_string output decodes back to the original name and value
            #[test]
            fn proptest_put_string_decodes(name in arb_param_name(), value in arb_text()) {
                let params = QueryParams::new();
                let cgi = ParameterAccessor::new(&params, &PlainObfuscator);

                let segment = cgi.put_string(&name, Some(&value));
                let mut parts = segment.splitn(3, '/');
                prop_assert_eq!(parts.next(), Some(""));
                prop_assert_eq!(parts.next(), Some(name.as_str()));
                let encoded = parts.next().unwrap();
                prop_assert!(!encoded.contains('/'));
                prop_assert_eq!(urlencoding::decode(encoded).unwrap(), value.as_str());
            }

            /// Property: put_int then get_opt_int reproduces the value
            #[test]
            fn proptest_int_put_get(v in any::<i64>()) {
                let empty = QueryParams::new();
                let writer = ParameterAccessor::new(&empty, &PlainObfuscator);
                let segment = writer.put_int("n", Some(v));

                let raw = segment.trim_start_matches("/n/");
                let params = QueryParams::new().with("n", raw);
                let reader = ParameterAccessor::new(&params, &PlainObfuscator);
                prop_assert_eq!(reader.get_opt_int("n", None).unwrap(), Some(v));
            }
        }
    }
}
