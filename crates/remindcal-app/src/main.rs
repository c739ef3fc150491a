use anyhow::Context;
use chrono::Local;
use remindcal_app::report::build_report;
use remindcal_core::config::load_config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let tasks = std::fs::read_to_string(&config.calendar.task_path)
        .with_context(|| format!("Failed to read task calendar {}", config.calendar.task_path))?;
    let holidays = config
        .calendar
        .holiday_path
        .as_deref()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read holiday calendar {path}"))
        })
        .transpose()?;

    let report = build_report(&config.reminder, &tasks, holidays.as_deref(), &Local::now());

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
