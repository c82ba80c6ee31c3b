use crate::obfuscator::{IdObfuscator, ObfuscatorError};
use crate::slug::text_to_slug;
use crate::source::ParameterSource;

use super::ParameterAccessor;

/// Extension used by [`ParameterAccessor::put_slug_name`] for virtual filenames.
pub const DEFAULT_SLUG_EXTENSION: &str = ".html";

/// `/<name>/<value>`, both percent-encoded.
fn segment(name: &str, value: &str) -> String {
    format!(
        "/{}/{}",
        urlencoding::encode(name),
        urlencoding::encode(value)
    )
}

impl<S, O> ParameterAccessor<'_, S, O>
where
    S: ParameterSource + ?Sized,
    O: IdObfuscator + ?Sized,
{
    /// Renders a boolean parameter as a URL segment.
    ///
    /// `true` renders as `/<name>/1`. `false` renders as `/<name>/0` only when
    /// `mandatory` is set, and as nothing otherwise, so links stay short when
    /// the flag has its default. `None` renders as nothing.
    pub fn put_bool(&self, name: &str, value: Option<bool>, mandatory: bool) -> String {
        match value {
            Some(true) => segment(name, "1"),
            Some(false) if mandatory => segment(name, "0"),
            _ => String::new(),
        }
    }

    /// Renders an integer parameter as a URL segment.
    pub fn put_int(&self, name: &str, value: Option<i64>) -> String {
        value
            .map(|v| segment(name, &v.to_string()))
            .unwrap_or_default()
    }

    /// Renders a float parameter as a URL segment.
    ///
    /// Infinities and NaN have no representation the getters accept and
    /// render as nothing.
    pub fn put_float(&self, name: &str, value: Option<f64>) -> String {
        value
            .filter(|v| v.is_finite())
            .map(|v| segment(name, &v.to_string()))
            .unwrap_or_default()
    }

    /// Renders a string parameter as a URL segment.
    ///
    /// The empty string renders as nothing, mirroring the getters which treat
    /// it as absent.
    pub fn put_string(&self, name: &str, value: Option<&str>) -> String {
        match value {
            Some(v) if !v.is_empty() => segment(name, v),
            _ => String::new(),
        }
    }

    /// Renders a parameter holding a URL as a URL segment.
    ///
    /// Same as [`put_string`](Self::put_string). The value is not checked; the
    /// caller is responsible for passing a safe URL.
    pub fn put_url(&self, name: &str, value: Option<&str>) -> String {
        self.put_string(name, value)
    }

    /// Renders a database ID as a URL segment, obfuscated under `label`.
    ///
    /// # Errors
    ///
    /// Returns the obfuscator's error if it cannot encode the ID.
    pub fn put_id(
        &self,
        name: &str,
        value: Option<i64>,
        label: &str,
    ) -> Result<String, ObfuscatorError> {
        match value {
            Some(id) => Ok(segment(name, &self.obfuscator.encode(id, label)?)),
            None => Ok(String::new()),
        }
    }

    /// Returns the common leader for all generated URLs.
    ///
    /// Currently always empty.
    pub fn put_leader(&self) -> String {
        String::new()
    }

    /// Renders a virtual filename `/<slug><extension>` from display text.
    ///
    /// Returns the empty string when the text has no slug.
    pub fn put_slug_name(&self, text: Option<&str>, extension: &str) -> String {
        let slug = text_to_slug(text);
        if slug.is_empty() {
            return String::new();
        }

        format!("/{slug}{extension}")
    }
}
