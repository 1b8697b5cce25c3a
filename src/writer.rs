use crate::client::{client_from_dsn, client_from_options, SentryClient};
use crate::context::ScopeState;
use crate::converters::breadcrumb_from_record;
use crate::error::WriterError;
use crate::log_level::{find_matching, LogLevel};
use sentry_core::protocol::{Map, Value};
use sentry_core::{Breadcrumb, ClientOptions, Level};
use std::cell::Cell;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

const DEFAULT_LEVEL_FIELD_NAME: &str = "level";

thread_local! {
    static IN_WRITE: Cell<bool> = Cell::new(false);
}

/// Marks the current thread as inside `write_record` until dropped.
struct WriteGuard;

impl WriteGuard {
    /// Returns `None` if this thread is already writing a record.
    fn enter() -> Option<WriteGuard> {
        if IN_WRITE.with(|in_write| in_write.replace(true)) {
            None
        } else {
            Some(WriteGuard)
        }
    }
}

impl Drop for WriteGuard {
    fn drop(&mut self) {
        IN_WRITE.with(|in_write| in_write.set(false));
    }
}

struct Config {
    client: Option<Arc<dyn SentryClient>>,
    log_levels: Vec<LogLevel>,
    filter_logs: bool,
    breadcrumbs_limit: Option<usize>,
    level_field_name: String,
}

struct Shared {
    config: RwLock<Config>,
    // guarded separately so forwards never need the config lock
    scope: Mutex<ScopeState>,
}

/// Forwards JSON log records to Sentry.
///
/// Without any [`LogLevel`] every record is sent to Sentry verbatim. Once a
/// log level has been added, each record is decoded and its level field
/// (`"level"` by default) is compared with the configured log levels. A
/// matching record is sent with the Sentry level of the first match; any
/// other record is dropped, or kept as a breadcrumb for the next sent record
/// when breadcrumbs are enabled.
///
/// The writer is a handle: clones share their configuration and context, so
/// it can be handed to several threads or to a `MakeWriter`.
///
/// ```
/// use sentry_core::Level;
/// use sentry_writer::{LogLevel, SentryWriter};
///
/// let writer = SentryWriter::new(vec![LogLevel::new("error", Level::Error)]);
/// writer.set_user_id("userID").set_breadcrumbs(20);
/// assert!(writer.is_filtering());
/// ```
#[derive(Clone)]
pub struct SentryWriter {
    shared: Arc<Shared>,
}

impl Default for SentryWriter {
    fn default() -> Self {
        SentryWriter::new(Vec::new())
    }
}

impl SentryWriter {
    /// Creates a writer with the given log levels. Filtering is turned on
    /// if `log_levels` is not empty.
    pub fn new(log_levels: Vec<LogLevel>) -> Self {
        let filter_logs = !log_levels.is_empty();
        SentryWriter {
            shared: Arc::new(Shared {
                config: RwLock::new(Config {
                    client: None,
                    log_levels,
                    filter_logs,
                    breadcrumbs_limit: None,
                    level_field_name: DEFAULT_LEVEL_FIELD_NAME.into(),
                }),
                scope: Mutex::new(ScopeState::default()),
            }),
        }
    }

    fn config(&self) -> RwLockReadGuard<'_, Config> {
        self.shared
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn config_mut(&self) -> RwLockWriteGuard<'_, Config> {
        self.shared
            .config
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn scope(&self) -> MutexGuard<'_, ScopeState> {
        self.shared
            .scope
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a log level that causes matching records to be sent to Sentry
    /// and turns filtering on.
    pub fn add_log_level(&self, log_level: LogLevel) -> &Self {
        let mut config = self.config_mut();
        config.log_levels.push(log_level);
        config.filter_logs = true;
        self
    }

    /// Changes the name of the record field holding the level.
    pub fn set_level_field_name<S: Into<String>>(&self, name: S) -> &Self {
        self.config_mut().level_field_name = name.into();
        self
    }

    /// Sets the user id reported with every following event.
    pub fn set_user_id<S: Into<String>>(&self, user_id: S) -> &Self {
        self.scope().set_user_id(Some(user_id.into()));
        self
    }

    /// Keeps up to `limit` filtered out records as breadcrumbs. They are
    /// attached to the next record sent to Sentry and then cleared.
    ///
    /// Only has an effect while filtering is on.
    pub fn set_breadcrumbs(&self, limit: usize) -> &Self {
        self.config_mut().breadcrumbs_limit = Some(limit);
        self
    }

    /// Replaces the client records are sent to.
    pub fn set_client<C: SentryClient + 'static>(&self, client: Arc<C>) -> &Self {
        self.set_shared_client(client)
    }

    pub(crate) fn set_shared_client(&self, client: Arc<dyn SentryClient>) -> &Self {
        self.config_mut().client = Some(client);
        self
    }

    /// Creates a Sentry client for `dsn` and uses it.
    pub fn set_dsn(&self, dsn: &str) -> Result<&Self, WriterError> {
        let client = client_from_dsn(dsn)?;
        Ok(self.set_client(client))
    }

    /// Creates a Sentry client from `options` and uses it.
    pub fn set_client_options(&self, options: ClientOptions) -> &Self {
        self.set_client(client_from_options(options))
    }

    pub fn is_filtering(&self) -> bool {
        self.config().filter_logs
    }

    pub fn user_id(&self) -> Option<String> {
        self.scope().user_id().map(ToOwned::to_owned)
    }

    /// The breadcrumbs waiting for the next event, oldest first.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.scope().breadcrumbs()
    }

    fn client(&self) -> Option<Arc<dyn SentryClient>> {
        self.config().client.clone()
    }

    fn level_field_name(&self) -> String {
        self.config().level_field_name.clone()
    }

    fn find_matching_level(&self, level: &str) -> Option<Level> {
        find_matching(&self.config().log_levels, level).map(|log_level| log_level.sentry_level)
    }

    /// Processes one log record and returns its length.
    ///
    /// A record that matches no log level is not an error. `Ok` means the
    /// record was accepted, not that Sentry received it; see
    /// [`flush`](Self::flush).
    ///
    /// Records written while this thread is already inside `write_record`,
    /// such as the writer's own diagnostics reaching it again through a
    /// `tracing` subscriber, are accepted and dropped.
    pub fn write_record(&self, record: &[u8]) -> Result<usize, WriterError> {
        let _guard = match WriteGuard::enter() {
            Some(guard) => guard,
            None => return Ok(record.len()),
        };
        let client = self.client().ok_or(WriterError::NoClient)?;

        if !self.is_filtering() {
            self.capture(client.as_ref(), &String::from_utf8_lossy(record), None);
            return Ok(record.len());
        }

        let fields: Map<String, Value> =
            serde_json::from_slice(record).map_err(WriterError::MalformedLog)?;
        let field = self.level_field_name();
        let level_value = fields.get(&field).cloned().unwrap_or(Value::Null);
        let level: String = serde_json::from_value(level_value)
            .map_err(|source| WriterError::InvalidLevelField { field, source })?;

        match self.find_matching_level(&level) {
            Some(sentry_level) => {
                // valid UTF-8, serde_json has checked it
                let message = String::from_utf8_lossy(record);
                self.capture(client.as_ref(), &message, Some(sentry_level));
            }
            None => self.add_breadcrumb(record, fields),
        }
        Ok(record.len())
    }

    fn capture(&self, client: &dyn SentryClient, message: &str, level: Option<Level>) {
        let context = self.scope().take_snapshot(level);
        let breadcrumbs = context.breadcrumbs.len();
        let event_id = client.capture_message(message, &context);
        tracing::debug!(%event_id, ?level, breadcrumbs, "sent log record to sentry");
    }

    fn add_breadcrumb(&self, record: &[u8], fields: Map<String, Value>) {
        let limit = self.config().breadcrumbs_limit;
        let limit = match limit {
            Some(limit) => limit,
            None => {
                tracing::trace!("dropped filtered log record");
                return;
            }
        };
        let breadcrumb = breadcrumb_from_record(record, Some(fields));
        self.scope().add_breadcrumb(breadcrumb, limit);
        tracing::trace!(limit, "kept filtered log record as breadcrumb");
    }

    /// Flushes the underlying client, waiting at most `timeout`.
    ///
    /// Returns `false` if the timeout was reached, in which case some
    /// records may not have reached Sentry. Without a client there is
    /// nothing to flush and this returns `true`.
    pub fn flush(&self, timeout: Duration) -> bool {
        match self.client() {
            Some(client) => client.flush(timeout),
            None => true,
        }
    }
}

impl io::Write for &SentryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_record(buf)?)
    }

    /// Records are never buffered here, use [`SentryWriter::flush`] to wait
    /// for delivery.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Write for SentryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_record(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl std::fmt::Debug for SentryWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = self.config();
        f.debug_struct("SentryWriter")
            .field("log_levels", &config.log_levels)
            .field("filter_logs", &config.filter_logs)
            .field("breadcrumbs_limit", &config.breadcrumbs_limit)
            .field("level_field_name", &config.level_field_name)
            .field("has_client", &config.client.is_some())
            .finish()
    }
}
