use crate::client::SentryClient;
use crate::log_level::LogLevel;
use crate::writer::SentryWriter;
use std::sync::Arc;

/// Collects the configuration of a [`SentryWriter`] before it is created
/// log_levels - records matching one of these are sent, all others filtered out
/// level_field_name - record field compared with the log levels
/// user_id - user reported with every event
/// breadcrumbs - how many filtered out records to keep as breadcrumbs
/// client - the Sentry client records are sent to
pub struct SentryWriterBuilder {
    log_levels: Vec<LogLevel>,
    level_field_name: Option<String>,
    user_id: Option<String>,
    breadcrumbs: Option<usize>,
    client: Option<Arc<dyn SentryClient>>,
}

impl Default for SentryWriterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SentryWriterBuilder {
    pub fn new() -> Self {
        SentryWriterBuilder {
            log_levels: Vec::new(),
            level_field_name: None,
            user_id: None,
            breadcrumbs: None,
            client: None,
        }
    }

    pub fn log_level(mut self, log_level: LogLevel) -> Self {
        self.log_levels.push(log_level);
        self
    }

    pub fn level_field_name<S: Into<String>>(mut self, name: S) -> Self {
        self.level_field_name = Some(name.into());
        self
    }

    pub fn user_id<S: Into<String>>(mut self, user_id: S) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn breadcrumbs(mut self, limit: usize) -> Self {
        self.breadcrumbs = Some(limit);
        self
    }

    pub fn client<C: SentryClient + 'static>(mut self, client: Arc<C>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> SentryWriter {
        let writer = SentryWriter::new(self.log_levels);
        if let Some(name) = self.level_field_name {
            writer.set_level_field_name(name);
        }
        if let Some(user_id) = self.user_id {
            writer.set_user_id(user_id);
        }
        if let Some(limit) = self.breadcrumbs {
            writer.set_breadcrumbs(limit);
        }
        if let Some(client) = self.client {
            writer.set_shared_client(client);
        }
        writer
    }
}

#[test]
fn test_builder() {
    use sentry_core::Level;

    let writer = SentryWriterBuilder::new()
        .log_level(LogLevel::new("error", Level::Error))
        .user_id("userID")
        .breadcrumbs(5)
        .build();
    assert!(writer.is_filtering());
    assert_eq!(writer.user_id().as_deref(), Some("userID"));

    let writer = SentryWriterBuilder::default().build();
    assert!(!writer.is_filtering());
    assert_eq!(writer.user_id(), None);
}
