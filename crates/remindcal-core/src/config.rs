use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, FileFormat};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

/// Longest reminder lead time accepted, one day in minutes.
const MAX_LEAD_MINUTES: u32 = 1440;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub calendar: CalendarConfig,
    pub reminder: ReminderConfig,
    pub logging: LoggingConfig,
}

/// Where the calendar documents are read from.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    pub task_path: String,
    pub holiday_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReminderConfig {
    pub lead_minutes: u32,
    pub mention: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("reminder.lead_minutes", 5)?
            .set_default("reminder.mention", "<!channel>")?
            .set_default("logging.level", "info")?)
    }

    /// ## Summary
    /// Loads configuration from an optional `config.toml` and environment
    /// variables into a `Settings`. Environment variables
    /// (`REMINDCAL_CALENDAR__TASK_PATH`, ...) take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::defaults()?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env
            .add_source(
                config::Environment::with_prefix("REMINDCAL")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Builds settings from a TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document is not valid TOML or misses required keys.
    pub fn from_toml(document: &str) -> Result<Self> {
        Ok(Self::defaults()?
            .add_source(config::File::from_str(document, FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Checks the values that deserialization alone cannot.
    ///
    /// ## Errors
    /// Returns an error if the task calendar path is empty or the lead time is out of range.
    pub fn validate(&self) -> CoreResult<()> {
        if self.calendar.task_path.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "calendar.task_path must not be empty".to_string(),
            ));
        }

        if !(1..=MAX_LEAD_MINUTES).contains(&self.reminder.lead_minutes) {
            return Err(CoreError::InvalidInput(format!(
                "reminder.lead_minutes must be within 1..={MAX_LEAD_MINUTES}, got {}",
                self.reminder.lead_minutes
            )));
        }

        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables, `.env` and `config.toml`.
///
/// ## Errors
/// Returns an error if loading, deserializing or validating the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    settings.validate()?;
    tracing::debug!(task_path = %settings.calendar.task_path, "Configuration validated");

    Ok(settings)
}
