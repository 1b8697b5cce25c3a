use crate::context::WriterContext;
use crate::converters::event_from_message;
use crate::error::WriterError;
use sentry_core::types::{Dsn, Uuid};
use sentry_core::{Client, ClientOptions};
use std::sync::Arc;
use std::time::Duration;

/// The part of a Sentry client a [`SentryWriter`](crate::SentryWriter)
/// forwards to.
///
/// It is implemented for [`sentry_core::Client`]; tests and embedders can
/// substitute their own implementation with
/// [`SentryWriter::set_client`](crate::SentryWriter::set_client).
pub trait SentryClient: Send + Sync {
    /// Submits one message with its context and returns the event id.
    fn capture_message(&self, message: &str, context: &WriterContext) -> Uuid;

    /// Blocks until pending messages are sent or `timeout` elapses.
    ///
    /// Returns `false` if the timeout was reached.
    fn flush(&self, timeout: Duration) -> bool;
}

impl SentryClient for Client {
    fn capture_message(&self, message: &str, context: &WriterContext) -> Uuid {
        self.capture_event(event_from_message(message, context), None)
    }

    fn flush(&self, timeout: Duration) -> bool {
        Client::flush(self, Some(timeout))
    }
}

/// Creates a client from `options`, filling in sentry's default transport
/// and integrations.
pub fn client_from_options(options: ClientOptions) -> Arc<Client> {
    Arc::new(Client::from(sentry::apply_defaults(options)))
}

/// Creates a client reporting to `dsn`.
pub fn client_from_dsn(dsn: &str) -> Result<Arc<Client>, WriterError> {
    let dsn: Dsn = dsn.parse()?;
    Ok(client_from_options(ClientOptions {
        dsn: Some(dsn),
        ..Default::default()
    }))
}

#[test]
fn test_invalid_dsn() {
    match client_from_dsn("not a dsn") {
        Err(WriterError::InvalidDsn(_)) => {}
        other => panic!("expected InvalidDsn, got {:?}", other.map(|_| ())),
    }
}
