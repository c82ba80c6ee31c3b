use crate::error::{MalformedKind, ParamError};
use crate::obfuscator::IdObfuscator;
use crate::source::ParameterSource;
use crate::url::is_relative;

use super::ParameterAccessor;

impl<S, O> ParameterAccessor<'_, S, O>
where
    S: ParameterSource + ?Sized,
    O: IdObfuscator + ?Sized,
{
    /// Returns the value of an optional boolean parameter.
    ///
    /// Accepts `1 true yes on` and `0 false no off`, ASCII case-insensitive.
    ///
    /// # Errors
    ///
    /// `Malformed` if the parameter is present but not a boolean token.
    pub fn get_opt_bool(&self, name: &str, default: Option<bool>) -> Result<Option<bool>, ParamError> {
        self.coerce(name, default)
    }

    /// Returns the value of a mandatory boolean parameter.
    ///
    /// # Errors
    ///
    /// `Malformed` as for [`get_opt_bool`](Self::get_opt_bool); `Missing` if
    /// the parameter is absent and `default` is `None`.
    pub fn get_man_bool(&self, name: &str, default: Option<bool>) -> Result<bool, ParamError> {
        let value = self.get_opt_bool(name, default)?;
        self.require(name, value)
    }

    /// Returns the value of an optional integer parameter.
    ///
    /// Only the canonical decimal form is accepted: `"12"` and `"-3"`, but not
    /// `"+3"`, `"012"`, `" 12"` or `"1.5"`.
    ///
    /// # Errors
    ///
    /// `Malformed` if the parameter is present but not an integer.
    pub fn get_opt_int(&self, name: &str, default: Option<i64>) -> Result<Option<i64>, ParamError> {
        self.coerce(name, default)
    }

    /// Returns the value of a mandatory integer parameter.
    ///
    /// # Errors
    ///
    /// `Malformed` as for [`get_opt_int`](Self::get_opt_int); `Missing` if the
    /// parameter is absent and `default` is `None`.
    pub fn get_man_int(&self, name: &str, default: Option<i64>) -> Result<i64, ParamError> {
        let value = self.get_opt_int(name, default)?;
        self.require(name, value)
    }

    /// Returns the value of an optional float parameter.
    ///
    /// # Errors
    ///
    /// `Malformed` if the parameter is present but not a finite decimal
    /// number.
    pub fn get_opt_float(&self, name: &str, default: Option<f64>) -> Result<Option<f64>, ParamError> {
        self.coerce(name, default)
    }

    /// Returns the value of a mandatory float parameter.
    ///
    /// # Errors
    ///
    /// `Malformed` as for [`get_opt_float`](Self::get_opt_float); `Missing` if
    /// the parameter is absent and `default` is `None`.
    pub fn get_man_float(&self, name: &str, default: Option<f64>) -> Result<f64, ParamError> {
        let value = self.get_opt_float(name, default)?;
        self.require(name, value)
    }

    /// Returns the value of an optional string parameter.
    ///
    /// Any non-empty value is returned verbatim, so this getter never
    /// reports `Malformed`. For parameters holding a URL use
    /// [`get_opt_url`](Self::get_opt_url).
    pub fn get_opt_string(
        &self,
        name: &str,
        default: Option<&str>,
    ) -> Result<Option<String>, ParamError> {
        match self.raw(name) {
            Some(raw) => Ok(Some(raw.to_string())),
            None => {
                self.log().defaulted(name, default.is_some());
                Ok(default.map(str::to_string))
            }
        }
    }

    /// Returns the value of a mandatory string parameter.
    ///
    /// # Errors
    ///
    /// `Missing` if the parameter is absent or empty and `default` is `None`.
    pub fn get_man_string(&self, name: &str, default: Option<&str>) -> Result<String, ParamError> {
        let value = self.get_opt_string(name, default)?;
        self.require(name, value)
    }

    /// Returns the value of an optional parameter holding a URL.
    ///
    /// With `force_relative` set the resolved value, including a substituted
    /// default, must be a relative reference (see [`is_relative`]). This
    /// guards redirects against pointing off-site.
    ///
    /// # Errors
    ///
    /// `Malformed` if `force_relative` is set and the value is not relative.
    pub fn get_opt_url(
        &self,
        name: &str,
        default: Option<&str>,
        force_relative: bool,
    ) -> Result<Option<String>, ParamError> {
        let value = self.get_opt_string(name, default)?;

        match value {
            Some(url) if force_relative && !is_relative(&url) => Err(self.reject(
                ParamError::malformed(name, &url, MalformedKind::NotRelativeUrl, None),
            )),
            value => Ok(value),
        }
    }

    /// Returns the value of a mandatory parameter holding a URL.
    ///
    /// # Errors
    ///
    /// `Malformed` as for [`get_opt_url`](Self::get_opt_url); `Missing` if the
    /// parameter is absent and `default` is `None`.
    pub fn get_man_url(
        &self,
        name: &str,
        default: Option<&str>,
        force_relative: bool,
    ) -> Result<String, ParamError> {
        let value = self.get_opt_url(name, default, force_relative)?;
        self.require(name, value)
    }

    /// Returns the value of an optional obfuscated database ID.
    ///
    /// `label` names the ID domain and must match the label the ID was
    /// encoded with (see [`put_id`](Self::put_id)). When the obfuscator
    /// decodes the raw value to nothing, `default` is returned.
    ///
    /// # Errors
    ///
    /// `Malformed` if the obfuscator rejects the value, with the decode error
    /// as cause.
    pub fn get_opt_id(
        &self,
        name: &str,
        label: &str,
        default: Option<i64>,
    ) -> Result<Option<i64>, ParamError> {
        let raw = self.raw(name);

        match self.obfuscator.decode(raw, label) {
            Ok(Some(id)) => Ok(Some(id)),
            Ok(None) => {
                self.log().defaulted(name, default.is_some());
                Ok(default)
            }
            Err(cause) => Err(self.reject(ParamError::malformed(
                name,
                raw.unwrap_or_default(),
                MalformedKind::NotObfuscatedId,
                Some(cause.into()),
            ))),
        }
    }

    /// Returns the value of a mandatory obfuscated database ID.
    ///
    /// # Errors
    ///
    /// `Malformed` as for [`get_opt_id`](Self::get_opt_id); `Missing` if the
    /// parameter is absent and `default` is `None`.
    pub fn get_man_id(&self, name: &str, label: &str, default: Option<i64>) -> Result<i64, ParamError> {
        let value = self.get_opt_id(name, label, default)?;
        self.require(name, value)
    }
}
