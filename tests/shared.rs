#![allow(dead_code)]

use sentry_core::types::Uuid;
use sentry_writer::{SentryClient, WriterContext};
use std::sync::Mutex;
use std::time::Duration;

/// Records every captured message instead of sending it.
#[derive(Default)]
pub struct MockClient {
    captured: Mutex<Vec<(String, WriterContext)>>,
    pub flush_result: bool,
}

impl MockClient {
    pub fn with_flush_result(flush_result: bool) -> Self {
        MockClient {
            flush_result,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.captured()
            .into_iter()
            .map(|(message, _)| message)
            .collect()
    }

    pub fn captured(&self) -> Vec<(String, WriterContext)> {
        self.captured.lock().unwrap().clone()
    }
}

impl SentryClient for MockClient {
    fn capture_message(&self, message: &str, context: &WriterContext) -> Uuid {
        self.captured
            .lock()
            .unwrap()
            .push((message.to_owned(), context.clone()));
        Uuid::new_v4()
    }

    fn flush(&self, _timeout: Duration) -> bool {
        self.flush_result
    }
}
