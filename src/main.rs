use actix_web::web;
use handlers::service_endpoint;
use sentry_core::Level;
use sentry_writer::{LogLevel, SentryWriterBuilder};
use std::time::Duration;
use tracing_core::LevelFilter;
use tracing_subscriber::prelude::*;

mod handlers;

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(service_endpoint);
}

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let dsn = std::env::var("SENTRY_DSN").expect("No dsn in env");
    let writer = SentryWriterBuilder::new()
        .log_level(LogLevel::new("ERROR", Level::Error))
        .log_level(LogLevel::new("WARN", Level::Warning))
        .user_id("demo-user")
        .breadcrumbs(20)
        .build();
    let dsn = dsn
        .parse::<sentry::types::Dsn>()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    writer.set_client_options(sentry::ClientOptions {
        dsn: Some(dsn),
        release: sentry::release_name!(),
        ..Default::default()
    });

    let sentry_writer = writer.clone();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(move || sentry_writer.clone()),
        )
        .with(LevelFilter::INFO)
        .init();

    let result = actix_web::HttpServer::new(move || {
        let app = actix_web::App::new();
        app.configure(init)
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await;

    if !writer.flush(Duration::from_secs(2)) {
        eprintln!("not all log records reached sentry");
    }
    result
}
