//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::state::PhaseDurations;

/// Divisor applied to every phase duration in demo mode
pub const DEMO_SCALE: u32 = 10;

/// Longest phase accepted on the command line (one day)
pub const MAX_PHASE_MINUTES: u64 = 24 * 60;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "pomodoro-server")]
#[command(about = "A single-user Pomodoro timer served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "5000")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Pomodoro (focus) phase duration in minutes
    #[arg(long, default_value = "25", value_parser = clap::value_parser!(u64).range(1..=MAX_PHASE_MINUTES))]
    pub pomodoro: u64,

    /// Short break duration in minutes
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u64).range(1..=MAX_PHASE_MINUTES))]
    pub short_break: u64,

    /// Long break duration in minutes
    #[arg(long, default_value = "15", value_parser = clap::value_parser!(u64).range(1..=MAX_PHASE_MINUTES))]
    pub long_break: u64,

    /// Run every phase at one tenth of its configured length
    #[arg(long)]
    pub demo: bool,

    /// Directory uploaded background images are stored in
    #[arg(long, default_value = "static/uploads")]
    pub upload_dir: PathBuf,

    /// Directory holding index.html and the client assets
    #[arg(long, default_value = "static")]
    pub static_dir: PathBuf,

    /// Background image shown before anything is uploaded
    #[arg(long, default_value = "su-san-lee-E_eWwM29wfU-unsplash.jpg")]
    pub default_background: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Phase durations after applying demo scaling
    pub fn durations(&self) -> PhaseDurations {
        let durations = PhaseDurations::from_minutes(self.pomodoro, self.short_break, self.long_break);
        if self.demo {
            durations.scaled_down(DEMO_SCALE)
        } else {
            durations
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["pomodoro-server"]);

        assert_eq!(config.address(), "127.0.0.1:5000");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.durations(), PhaseDurations::default());
    }

    #[test]
    fn test_demo_mode_scales_durations() {
        let config = Config::parse_from(["pomodoro-server", "--demo", "--pomodoro", "10"]);
        let durations = config.durations();

        assert_eq!(durations.pomodoro, Duration::from_secs(60));
        assert_eq!(durations.short_break, Duration::from_secs(30));
        assert_eq!(durations.long_break, Duration::from_secs(90));
    }

    #[test]
    fn test_zero_minute_phase_rejected() {
        let result = Config::try_parse_from(["pomodoro-server", "--short-break", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_phase_longer_than_a_day_rejected() {
        assert!(Config::try_parse_from(["pomodoro-server", "--long-break", "1441"]).is_err());
        assert!(Config::try_parse_from(["pomodoro-server", "--pomodoro", "18446744073709551615"]).is_err());

        let config = Config::parse_from(["pomodoro-server", "--pomodoro", "1440"]);
        assert_eq!(config.durations().pomodoro, Duration::from_secs(86_400));
    }

    #[test]
    fn test_verbose_switches_log_level() {
        let config = Config::parse_from(["pomodoro-server", "-v", "-p", "8080"]);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.port, 8080);
    }
}
