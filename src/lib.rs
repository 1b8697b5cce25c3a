//! Sends JSON log records to Sentry.
//!
//! [`SentryWriter`] implements [`std::io::Write`], so any logging front-end
//! that writes JSON lines to a writer can report them to Sentry. Usually only
//! some records should become Sentry events, so log levels can be configured:
//! each record is then decoded, its `"level"` field compared with the log
//! levels, and only matching records are sent. Filtered out records can be
//! kept as breadcrumbs for the next event.
//!
//! # Examples
//!
//! ```no_run
//! use sentry_core::Level;
//! use sentry_writer::{LogLevel, SentryWriter};
//! use std::time::Duration;
//!
//! let writer = SentryWriter::new(vec![LogLevel::new("ERROR", Level::Error)]);
//! writer
//!     .set_dsn("https://public@sentry.example.com/1")
//!     .expect("valid dsn")
//!     .set_user_id("userID")
//!     .set_breadcrumbs(20);
//!
//! let sentry_writer = writer.clone();
//! tracing_subscriber::fmt()
//!     .json()
//!     .with_writer(move || sentry_writer.clone())
//!     .init();
//!
//! tracing::error!("Generates an event");
//! writer.flush(Duration::from_secs(2));
//! ```

pub mod builder;
pub mod client;
pub mod context;
pub mod converters;
pub mod error;
pub mod log_level;
pub mod writer;

pub use builder::SentryWriterBuilder;
pub use client::SentryClient;
pub use context::WriterContext;
pub use error::WriterError;
pub use log_level::LogLevel;
pub use writer::SentryWriter;
