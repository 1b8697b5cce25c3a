use crate::context::WriterContext;
use sentry_core::protocol::{Event, Map, Value};
use sentry_core::{Breadcrumb, User};
use std::time::SystemTime;

/// Creates an event from a forwarded log record and its context.
///
/// The level is only overridden when the context carries one, otherwise
/// the event keeps its default level.
pub fn event_from_message(message: &str, context: &WriterContext) -> Event<'static> {
    let mut event = Event {
        logger: Some("sentry-writer".into()),
        message: Some(message.to_owned()),
        user: context.user_id.as_ref().map(|id| User {
            id: Some(id.clone()),
            ..Default::default()
        }),
        breadcrumbs: context.breadcrumbs.clone().into(),
        ..Default::default()
    };
    if let Some(level) = context.level {
        event.level = level;
    }
    event
}

/// Creates a breadcrumb from a suppressed log record.
///
/// `fields` is the already decoded record, if the caller has it. Otherwise
/// the record is decoded here, and when that fails the raw text is kept as
/// the breadcrumb message.
pub fn breadcrumb_from_record(record: &[u8], fields: Option<Map<String, Value>>) -> Breadcrumb {
    let fields = fields.or_else(|| serde_json::from_slice(record).ok());

    let mut breadcrumb = Breadcrumb {
        ty: "log".into(),
        timestamp: SystemTime::now().into(),
        ..Default::default()
    };
    match fields {
        Some(data) => breadcrumb.data = data,
        None => breadcrumb.message = Some(String::from_utf8_lossy(record).into_owned()),
    }
    breadcrumb
}
