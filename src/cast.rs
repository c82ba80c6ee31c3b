use std::fmt;

/// Error returned when a raw parameter value cannot be coerced.
///
/// The error names the target type but does not carry the rejected input;
/// the caller ([`ParameterAccessor`](crate::ParameterAccessor)) attaches the
/// parameter name and raw value when it wraps this into a
/// [`ParamError`](crate::ParamError).
///
/// # Examples
///
/// ```
/// use cgi_core::{Cast, CastErrorKind};
///
/// let error = <i64 as Cast>::cast(" 12").unwrap_err();
/// assert_eq!(error.kind(), CastErrorKind::Whitespace);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastError {
    target: &'static str,
    kind: CastErrorKind,
}

impl CastError {
    /// Creates a new cast error for the named target type.
    pub fn new(target: &'static str, kind: CastErrorKind) -> Self {
        Self { target, kind }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> CastErrorKind {
        self.kind
    }

    /// Returns the name of the type the value was cast to.
    pub fn target(&self) -> &'static str {
        self.target
    }
}

impl fmt::Display for CastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot cast to {} ({})", self.target, self.kind)
    }
}

impl std::error::Error for CastError {}

/// Kind of cast error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastErrorKind {
    /// Leading or trailing whitespace is never accepted.
    Whitespace,
    /// The text is not in the accepted lexicon of the target type.
    Unrecognized,
    /// The text is numeric but not in canonical form (e.g. `+1`, `007`).
    NotCanonical,
    /// The number does not fit the target type or is not finite.
    OutOfRange,
}

impl fmt::Display for CastErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whitespace => write!(f, "surrounding whitespace"),
            Self::Unrecognized => write!(f, "unrecognized text"),
            Self::NotCanonical => write!(f, "not in canonical form"),
            Self::OutOfRange => write!(f, "out of range"),
        }
    }
}

/// Conversion from a raw, non-empty parameter text into a typed value.
///
/// Implementations must be total over their documented lexicon and reject
/// everything else. Empty input never reaches `cast`: the accessor treats an
/// empty string as absent before coercion.
///
/// # Examples
///
/// ```
/// use cgi_core::Cast;
///
/// assert_eq!(<bool as Cast>::cast("yes"), Ok(true));
/// assert_eq!(<i64 as Cast>::cast("-42"), Ok(-42));
/// assert_eq!(<f64 as Cast>::cast("1.5"), Ok(1.5));
/// assert!(<i64 as Cast>::cast("1.5").is_err());
/// ```
pub trait Cast: Sized {
    /// Human readable name of the target type, used in error messages.
    const TYPE_NAME: &'static str;

    /// Coerces `raw` into `Self`.
    ///
    /// # Errors
    ///
    /// Returns `CastError` if `raw` is not in the accepted lexicon.
    fn cast(raw: &str) -> Result<Self, CastError>;
}

const TRUE_TOKENS: [&str; 4] = ["1", "true", "yes", "on"];
const FALSE_TOKENS: [&str; 4] = ["0", "false", "no", "off"];

/// Accepts `1 true yes on` and `0 false no off`, ASCII case-insensitive.
impl Cast for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn cast(raw: &str) -> Result<Self, CastError> {
        if TRUE_TOKENS.iter().any(|t| raw.eq_ignore_ascii_case(t)) {
            return Ok(true);
        }
        if FALSE_TOKENS.iter().any(|t| raw.eq_ignore_ascii_case(t)) {
            return Ok(false);
        }

        Err(CastError::new(Self::TYPE_NAME, reject_kind(raw)))
    }
}

/// Accepts only the canonical decimal rendering of an `i64`.
impl Cast for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn cast(raw: &str) -> Result<Self, CastError> {
        let digits = raw.strip_prefix('-').unwrap_or(raw);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CastError::new(Self::TYPE_NAME, reject_kind(raw)));
        }

        let value: i64 = raw
            .parse()
            .map_err(|_| CastError::new(Self::TYPE_NAME, CastErrorKind::OutOfRange))?;

        // Rejects `007`, `-0` and friends.
        if value.to_string() != raw {
            return Err(CastError::new(Self::TYPE_NAME, CastErrorKind::NotCanonical));
        }

        Ok(value)
    }
}

/// Accepts decimal notation with optional sign, fraction and exponent.
///
/// Textual infinities and NaN are rejected, as is anything that overflows to
/// a non-finite value.
impl Cast for f64 {
    const TYPE_NAME: &'static str = "float";

    fn cast(raw: &str) -> Result<Self, CastError> {
        if !is_decimal_literal(raw) {
            return Err(CastError::new(Self::TYPE_NAME, reject_kind(raw)));
        }

        let value: f64 = raw
            .parse()
            .map_err(|_| CastError::new(Self::TYPE_NAME, CastErrorKind::Unrecognized))?;

        if !value.is_finite() {
            return Err(CastError::new(Self::TYPE_NAME, CastErrorKind::OutOfRange));
        }

        Ok(value)
    }
}

fn reject_kind(raw: &str) -> CastErrorKind {
    if raw.trim() != raw {
        CastErrorKind::Whitespace
    } else {
        CastErrorKind::Unrecognized
    }
}

/// `[+-]? (digits ('.' digits?)? | '.' digits) ([eE] [+-]? digits)?`
fn is_decimal_literal(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }

    if mantissa_digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
