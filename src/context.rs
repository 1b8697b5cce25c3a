use sentry_core::{Breadcrumb, Level};
use std::collections::VecDeque;

/// The context attached to a message handed to a
/// [`SentryClient`](crate::SentryClient).
///
/// This is a snapshot: it is owned by the forwarded message and is never
/// touched by writes that happen after it was taken.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriterContext {
    /// Level override, `None` when filtering is off.
    pub level: Option<Level>,
    pub user_id: Option<String>,
    /// Suppressed records since the last forward, oldest first.
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// Mutable state shared by every write on one writer.
#[derive(Debug, Default)]
pub(crate) struct ScopeState {
    user_id: Option<String>,
    breadcrumbs: VecDeque<Breadcrumb>,
}

impl ScopeState {
    pub(crate) fn set_user_id(&mut self, user_id: Option<String>) {
        self.user_id = user_id;
    }

    pub(crate) fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Appends a breadcrumb, evicting the oldest ones beyond `limit`.
    ///
    /// A limit of zero keeps the history empty.
    pub(crate) fn add_breadcrumb(&mut self, breadcrumb: Breadcrumb, limit: usize) {
        self.breadcrumbs.push_back(breadcrumb);
        while self.breadcrumbs.len() > limit {
            self.breadcrumbs.pop_front();
        }
    }

    pub(crate) fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.breadcrumbs.iter().cloned().collect()
    }

    /// Takes a snapshot for a forward and empties the breadcrumb history.
    ///
    /// The user id is kept.
    pub(crate) fn take_snapshot(&mut self, level: Option<Level>) -> WriterContext {
        WriterContext {
            level,
            user_id: self.user_id.clone(),
            breadcrumbs: self.breadcrumbs.drain(..).collect(),
        }
    }
}
