use std::fmt;

use http::StatusCode;

use crate::cast::CastError;
use crate::obfuscator::ObfuscatorError;

/// Errors raised by the parameter getters.
///
/// Both variants describe a problem with client-supplied input, never a
/// server fault. Handlers are expected to let them propagate and translate
/// them into a `400 Bad Request` (see [`ParamError::status`]).
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    /// A mandatory parameter has no value, even after default substitution.
    #[error("mandatory parameter '{name}' is empty")]
    Missing {
        /// Name of the parameter
        name: String,
    },

    /// A present parameter value could not be coerced to the requested type.
    #[error("the value '{raw}' of parameter '{name}' is {kind}")]
    Malformed {
        /// Name of the parameter
        name: String,
        /// The offending raw value, as received
        raw: String,
        /// What the value failed to be
        kind: MalformedKind,
        /// The underlying coercion or decode failure, when there is one
        #[source]
        cause: Option<Cause>,
    },
}

impl ParamError {
    pub(crate) fn missing(name: &str) -> Self {
        Self::Missing {
            name: name.to_string(),
        }
    }

    pub(crate) fn malformed(
        name: &str,
        raw: &str,
        kind: MalformedKind,
        cause: Option<Cause>,
    ) -> Self {
        Self::Malformed {
            name: name.to_string(),
            raw: raw.to_string(),
            kind,
            cause,
        }
    }

    /// Returns the name of the parameter this error is about.
    pub fn name(&self) -> &str {
        match self {
            Self::Missing { name } | Self::Malformed { name, .. } => name,
        }
    }

    /// Returns the raw value that was rejected, if any.
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Missing { .. } => None,
            Self::Malformed { raw, .. } => Some(raw),
        }
    }

    /// Returns the malformation kind, or `None` for a missing parameter.
    pub fn kind(&self) -> Option<MalformedKind> {
        match self {
            Self::Missing { .. } => None,
            Self::Malformed { kind, .. } => Some(*kind),
        }
    }

    /// Returns `true` if this is a [`ParamError::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }

    /// Returns `true` if this is a [`ParamError::Malformed`].
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }

    /// The HTTP status a handler should answer with.
    ///
    /// Always `400 Bad Request`: both variants are client errors.
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

/// The reason a present value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    /// Not one of the accepted boolean tokens
    NotBool,
    /// Not a canonical integer
    NotInt,
    /// Not a finite decimal number
    NotFloat,
    /// Not a valid obfuscated ID for the requested label
    NotObfuscatedId,
    /// A URL that is not a same-origin relative reference
    NotRelativeUrl,
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotBool => write!(f, "not a boolean"),
            Self::NotInt => write!(f, "not an integer"),
            Self::NotFloat => write!(f, "not a float"),
            Self::NotObfuscatedId => write!(f, "not a valid obfuscated ID"),
            Self::NotRelativeUrl => write!(f, "not a relative URL"),
        }
    }
}

/// Underlying failure wrapped by [`ParamError::Malformed`].
#[derive(Debug, thiserror::Error)]
pub enum Cause {
    /// Type coercion failed
    #[error(transparent)]
    Cast(#[from] CastError),
    /// Obfuscated ID decoding failed
    #[error(transparent)]
    Decode(#[from] ObfuscatorError),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;
    use crate::cast::Cast;

    #[test]
    fn missing_display_names_parameter() {
        let err = ParamError::missing("page");

        assert_eq!(err.to_string(), "mandatory parameter 'page' is empty");
        assert_eq!(err.name(), "page");
        assert!(err.raw().is_none());
        assert!(err.kind().is_none());
        assert!(err.is_missing());
    }

    #[test]
    fn malformed_display_includes_raw_and_kind() {
        let err = ParamError::malformed("page", "abc", MalformedKind::NotInt, None);

        assert_eq!(
            err.to_string(),
            "the value 'abc' of parameter 'page' is not an integer"
        );
        assert_eq!(err.raw(), Some("abc"));
        assert_eq!(err.kind(), Some(MalformedKind::NotInt));
        assert!(err.is_malformed());
    }

    #[test]
    fn malformed_exposes_cause_as_source() {
        let cause = <i64 as Cast>::cast("1.5").unwrap_err();
        let err = ParamError::malformed("n", "1.5", MalformedKind::NotInt, Some(cause.into()));

        let source = err.source().expect("cause should be chained");
        assert!(source.to_string().contains("integer"));
    }

    #[test]
    fn both_kinds_map_to_bad_request() {
        assert_eq!(ParamError::missing("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ParamError::malformed("x", "y", MalformedKind::NotBool, None).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn kinds_display() {
        assert_eq!(MalformedKind::NotBool.to_string(), "not a boolean");
        assert_eq!(MalformedKind::NotFloat.to_string(), "not a float");
        assert_eq!(
            MalformedKind::NotObfuscatedId.to_string(),
            "not a valid obfuscated ID"
        );
        assert_eq!(MalformedKind::NotRelativeUrl.to_string(), "not a relative URL");
    }
}
