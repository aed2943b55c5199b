use anyhow::{anyhow, Context, Result};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{info, warn};

static DOTENV_INIT: OnceLock<()> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockFormat {
    /// `3:04:05 PM`, the en-US locale rendering.
    TwelveHour,
    /// `15:04:05`
    TwentyFourHour,
}

impl ClockFormat {
    pub fn pattern(self) -> &'static str {
        match self {
            ClockFormat::TwelveHour => "%-I:%M:%S %p",
            ClockFormat::TwentyFourHour => "%H:%M:%S",
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "12h" | "12" => Ok(ClockFormat::TwelveHour),
            "24h" | "24" => Ok(ClockFormat::TwentyFourHour),
            other => Err(anyhow!("Invalid clock format: {} (expected 12h or 24h)", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DashboardConfig {
    pub trader_name: String,
    pub clock_format: ClockFormat,
    pub tick_interval: Duration,
}

impl DashboardConfig {
    pub fn with_defaults() -> Self {
        Self {
            trader_name: DEFAULT_TRADER_NAME.to_string(),
            clock_format: ClockFormat::TwelveHour,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
        }
    }

    /// Reads `THIRDEYE_*` variables, loading a `.env` file first if one exists.
    pub fn from_env() -> Result<Self> {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::with_defaults();

        if let Some(raw) = lookup(ENV_TRADER) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                cfg.trader_name = trimmed.to_string();
            }
        }

        if let Some(raw) = lookup(ENV_CLOCK_FORMAT) {
            cfg.clock_format = ClockFormat::parse(&raw)
                .with_context(|| format!("while reading {}", ENV_CLOCK_FORMAT))?;
        }

        if let Some(raw) = lookup(ENV_TICK_MS) {
            let trimmed = raw.trim();
            let ms = trimmed
                .parse::<u64>()
                .map_err(|_| anyhow!("Invalid {}: {}", ENV_TICK_MS, trimmed))?;
            if ms == 0 {
                return Err(anyhow!("{} must be > 0", ENV_TICK_MS));
            }
            if ms != TICK_INTERVAL_MS {
                warn!("Clock tick overridden to {} ms (default {} ms)", ms, TICK_INTERVAL_MS);
            }
            cfg.tick_interval = Duration::from_millis(ms);
        }

        Ok(cfg)
    }
}

pub fn load_dotenv() {
    DOTENV_INIT.get_or_init(|| match dotenvy::dotenv() {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring unreadable .env file ({})", e),
    });
}

pub const ENV_TRADER: &str = "THIRDEYE_TRADER";
pub const ENV_CLOCK_FORMAT: &str = "THIRDEYE_CLOCK_FORMAT";
pub const ENV_TICK_MS: &str = "THIRDEYE_TICK_MS";

pub const BRAND: &str = "3RD EYE";
pub const DEFAULT_TRADER_NAME: &str = "Trader";
/// Wall-clock refresh cadence of the header clock.
pub const TICK_INTERVAL_MS: u64 = 1000;
pub const PERFORMANCE_SERIES_LEN: usize = 30;
pub const RISK_SERIES_LEN: usize = 20;
pub const DEFAULT_WEBUI_PORT: u16 = 8080;

// ── Market session (NYSE regular hours, New York local time) ────────────────
pub const MARKET_TIMEZONE: chrono_tz::Tz = chrono_tz::America::New_York;
pub const MARKET_OPEN_HHMM: (u32, u32) = (9, 30);
pub const MARKET_CLOSE_HHMM: (u32, u32) = (16, 0);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let cfg = DashboardConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.trader_name, "Trader");
        assert_eq!(cfg.clock_format, ClockFormat::TwelveHour);
        assert_eq!(cfg.tick_interval, Duration::from_millis(1000));
    }

    #[test]
    fn test_env_overrides() {
        let cfg = DashboardConfig::from_lookup(lookup_from(&[
            (ENV_TRADER, "  Ada "),
            (ENV_CLOCK_FORMAT, "24H"),
            (ENV_TICK_MS, "250"),
        ]))
        .unwrap();
        assert_eq!(cfg.trader_name, "Ada");
        assert_eq!(cfg.clock_format, ClockFormat::TwentyFourHour);
        assert_eq!(cfg.tick_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_blank_trader_keeps_default() {
        let cfg = DashboardConfig::from_lookup(lookup_from(&[(ENV_TRADER, "   ")])).unwrap();
        assert_eq!(cfg.trader_name, DEFAULT_TRADER_NAME);
    }

    #[test]
    fn test_rejects_zero_tick() {
        let err = DashboardConfig::from_lookup(lookup_from(&[(ENV_TICK_MS, "0")])).unwrap_err();
        assert!(err.to_string().contains("must be > 0"));
    }

    #[test]
    fn test_rejects_non_numeric_tick() {
        assert!(DashboardConfig::from_lookup(lookup_from(&[(ENV_TICK_MS, "fast")])).is_err());
    }

    #[test]
    fn test_rejects_unknown_clock_format() {
        assert!(ClockFormat::parse("36h").is_err());
        assert!(DashboardConfig::from_lookup(lookup_from(&[(ENV_CLOCK_FORMAT, "am/pm")])).is_err());
    }
}
