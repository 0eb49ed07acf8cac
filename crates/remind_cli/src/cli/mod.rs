use clap::{Parser, Subcommand};
use remind_core::config::ConfigOverrides;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a reminder; "in 20 minutes" style phrases set an alarm
    ///
    /// Example: remind add "call mom in 20 minutes"
    Add { text: Option<String> },
    /// Replace a reminder's text and re-derive its alarm
    ///
    /// Example: remind edit 0 "call mom in 1 hour"
    Edit { index: usize, text: String },
    /// Delete a reminder
    ///
    /// Example: remind delete 0
    Delete { index: usize },
    /// Mark a reminder as done, or reopen it with --undo
    ///
    /// Example: remind done 0
    /// Example: remind done 0 --undo
    Done {
        index: usize,
        #[arg(long)]
        undo: bool,
    },
    /// Push a reminder's alarm 30 minutes out
    ///
    /// Example: remind snooze 0
    Snooze { index: usize },
    /// List reminders, urgent first
    ///
    /// Example: remind list
    List,
    /// List pending alarms, soonest first
    ///
    /// Example: remind upcoming
    Upcoming,
    /// Print whether any reminder is overdue
    ///
    /// Example: remind status
    Status,
    /// Poll for due reminders and send desktop notifications
    ///
    /// Example: remind watch
    /// Example: remind watch --interval 5 --count 12
    Watch {
        /// Seconds between polls (defaults to the configured interval)
        #[arg(long)]
        interval: Option<u64>,
        /// Stop after this many polls
        #[arg(long)]
        count: Option<u64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    PollInterval,
    Notifications,
    LogLevel,
    StorePath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let canonical_field =
        canonicalize_flag_name(key_raw).ok_or_else(|| "override key cannot be empty".to_string())?;

    let target = match canonical_field.as_str() {
        "poll_interval" | "poll_interval_secs" | "interval" => ConfigOverrideTarget::PollInterval,
        "notifications" | "notify" => ConfigOverrideTarget::Notifications,
        "log_level" | "log" => ConfigOverrideTarget::LogLevel,
        "store_path" | "store" => ConfigOverrideTarget::StorePath,
        other => return Err(format!("unknown config field '{other}'")),
    };

    Ok(ParsedConfigOverride { target, value })
}

/// Fold parsed overrides into the shape the core config merges.
pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, String> {
    let mut overrides = ConfigOverrides::default();

    for entry in raw {
        let parsed = parse_config_override(entry)?;
        match parsed.target {
            ConfigOverrideTarget::PollInterval => {
                let secs = parsed
                    .value
                    .parse::<u64>()
                    .map_err(|_| format!("poll_interval must be a number of seconds, got '{}'", parsed.value))?;
                overrides.poll_interval_secs = Some(secs);
            }
            ConfigOverrideTarget::Notifications => {
                overrides.notifications = Some(parse_switch(&parsed.value)?);
            }
            ConfigOverrideTarget::LogLevel => {
                overrides.log_level = Some(parsed.value);
            }
            ConfigOverrideTarget::StorePath => {
                if parsed.value.is_empty() {
                    return Err("store_path override cannot be empty".to_string());
                }
                overrides.store_path = Some(PathBuf::from(parsed.value));
            }
        }
    }

    Ok(overrides)
}

fn parse_switch(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(format!("expected on/off, got '{other}'")),
    }
}

fn canonicalize_flag_name(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
