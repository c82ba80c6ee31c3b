//! Translation of parameter errors into HTTP responses.
//!
//! Getter errors are client errors. Handlers either propagate them to a
//! framework-level error handler or answer directly with
//! [`ParamError::into_response`].
//!
//! The client-facing body names the parameter but never echoes the raw value
//! back, so a rejected payload cannot be reflected into the response.

use http::header::{HeaderValue, CONTENT_TYPE};
use http::Response;

use crate::error::ParamError;

impl ParamError {
    /// Converts the error into a `400 Bad Request` response with a plain-text body.
    ///
    /// # Examples
    ///
    /// ```
    /// use cgi_core::{ParameterAccessor, PlainObfuscator, QueryParams};
    ///
    /// let params = QueryParams::parse("page=two");
    /// let cgi = ParameterAccessor::new(&params, &PlainObfuscator);
    ///
    /// let response = cgi.get_man_int("page", None).unwrap_err().into_response();
    /// assert_eq!(response.status(), 400);
    /// assert_eq!(response.body(), "Invalid query parameter 'page': not an integer.");
    /// ```
    pub fn into_response(&self) -> Response<String> {
        let mut response = Response::new(self.response_body());
        *response.status_mut() = self.status();
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        response
    }

    /// Returns the client-facing message for this error.
    pub fn response_body(&self) -> String {
        match self {
            Self::Missing { name } => format!("Missing query parameter '{name}'."),
            Self::Malformed { name, kind, .. } => {
                format!("Invalid query parameter '{name}': {kind}.")
            }
        }
    }
}
