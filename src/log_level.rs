use sentry_core::Level;

/// Matches the level string of a JSON log record and maps it onto a
/// Sentry [`Level`].
///
/// For example, records logged at `"error"` can be reported as
/// [`Level::Error`]:
///
/// ```
/// use sentry_core::Level;
/// use sentry_writer::LogLevel;
///
/// let error_level = LogLevel::new("error", Level::Error);
/// assert!(error_level.matches("error"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LogLevel {
    pub matching_string: String,
    pub sentry_level: Level,
}

impl LogLevel {
    pub fn new<S: Into<String>>(matching_string: S, sentry_level: Level) -> Self {
        LogLevel {
            matching_string: matching_string.into(),
            sentry_level,
        }
    }

    pub fn matches(&self, level: &str) -> bool {
        self.matching_string == level
    }
}

/// Returns the first log level in `log_levels` matching `level`.
pub(crate) fn find_matching<'a>(log_levels: &'a [LogLevel], level: &str) -> Option<&'a LogLevel> {
    log_levels.iter().find(|log_level| log_level.matches(level))
}

#[test]
fn test_find_matching_first_wins() {
    let log_levels = vec![
        LogLevel::new("warn", Level::Warning),
        LogLevel::new("error", Level::Error),
        LogLevel::new("error", Level::Fatal),
    ];

    let found = find_matching(&log_levels, "error").unwrap();
    assert_eq!(found.sentry_level, Level::Error);
    assert!(find_matching(&log_levels, "info").is_none());
    assert!(find_matching(&log_levels, "ERROR").is_none());
}
