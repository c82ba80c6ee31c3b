use crate::error::ParamError;

/// Structured logging for parameter resolution.
///
/// `ParamLog` is owned by a [`ParameterAccessor`](crate::ParameterAccessor)
/// and borrows its request ID, so every event can be correlated with the
/// request it belongs to.
///
/// Raw parameter values are client-controlled; they are only ever logged at
/// `debug` level.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ParamLog<'a> {
    request_id: Option<&'a str>,
}

impl<'a> ParamLog<'a> {
    pub(crate) fn new(request_id: Option<&'a str>) -> Self {
        Self { request_id }
    }

    fn request_id_field(&self) -> &str {
        self.request_id.unwrap_or("-")
    }

    /// Records that a parameter fell back to its default.
    pub(crate) fn defaulted(&self, name: &str, has_default: bool) {
        tracing::debug!(
            request_id = %self.request_id_field(),
            parameter = %name,
            has_default,
            "parameter absent"
        );
    }

    /// Records a getter failure.
    pub(crate) fn rejected(&self, error: &ParamError) {
        match error {
            ParamError::Missing { name } => {
                tracing::info!(
                    request_id = %self.request_id_field(),
                    parameter = %name,
                    "mandatory parameter missing"
                );
            }
            ParamError::Malformed { name, raw, kind, .. } => {
                tracing::warn!(
                    request_id = %self.request_id_field(),
                    parameter = %name,
                    kind = %kind,
                    "malformed parameter rejected"
                );
                tracing::debug!(
                    request_id = %self.request_id_field(),
                    parameter = %name,
                    raw = %raw,
                    "rejected raw value"
                );
            }
        }
    }
}
