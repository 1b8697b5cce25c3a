use sentry_core::types::ParseDsnError;
use thiserror::Error;

/// Errors returned by [`SentryWriter`](crate::SentryWriter).
///
/// None of these are retried by the writer. A record that matches no
/// configured log level is not an error, it is simply suppressed.
#[derive(Error, Debug)]
pub enum WriterError {
    /// A record was written before any Sentry client was set.
    #[error("no Sentry client supplied")]
    NoClient,

    /// Filtering is enabled and the record is not a JSON object.
    #[error("log record is not a JSON object: {0}")]
    MalformedLog(#[source] serde_json::Error),

    /// The configured level field is missing or does not hold a string.
    #[error("log record field `{field}` is missing or not a string: {source}")]
    InvalidLevelField {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// The DSN handed to [`SentryWriter::set_dsn`](crate::SentryWriter::set_dsn)
    /// could not be parsed.
    #[error("invalid Sentry DSN: {0}")]
    InvalidDsn(#[from] ParseDsnError),
}

impl From<WriterError> for std::io::Error {
    fn from(err: WriterError) -> Self {
        let kind = match err {
            WriterError::NoClient => std::io::ErrorKind::Other,
            _ => std::io::ErrorKind::InvalidData,
        };
        std::io::Error::new(kind, err)
    }
}

#[test]
fn test_io_error_kind() {
    let err: std::io::Error = WriterError::NoClient.into();
    assert_eq!(err.kind(), std::io::ErrorKind::Other);

    let parse_err = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
    let err: std::io::Error = WriterError::MalformedLog(parse_err).into();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
