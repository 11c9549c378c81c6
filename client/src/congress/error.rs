use thiserror::Error;

/// Errors that can occur when calling the Sunlight Congress API.
///
/// "Not found" is never an error: operations return `Ok(None)` for it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CongressApiError {
    /// The service returned a document whose shape the hydrator cannot accept
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A lookup expected to be unique matched more than one record
    #[error("ambiguous result: {0}")]
    AmbiguousResult(String),
}

impl CongressApiError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats() {
        let err = CongressApiError::malformed("expected list under 'members'");
        assert_eq!(
            err.to_string(),
            "malformed payload: expected list under 'members'"
        );

        let err = CongressApiError::AmbiguousResult("legislators.get".into());
        assert_eq!(err.to_string(), "ambiguous result: legislators.get");
    }
}
