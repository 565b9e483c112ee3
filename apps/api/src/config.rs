use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::layout::{default_pagination_config, FontFamily, PaginationConfig};

/// Application configuration loaded from environment variables.
/// Every variable is optional; unset values fall back to the A4 resume defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub pagination: PaginationConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = default_pagination_config();

        let font = match lookup("FONT_FAMILY") {
            Some(raw) => FontFamily::from_str(&raw)
                .map_err(|e| anyhow!(e))
                .context("FONT_FAMILY must be 'inter' or 'computer_modern'")?,
            None => defaults.font,
        };

        let pagination = PaginationConfig {
            max_content_height: parse_or(
                &lookup,
                "PAGE_MAX_CONTENT_HEIGHT",
                defaults.max_content_height,
            )?,
            overflow_tolerance: parse_or(
                &lookup,
                "PAGE_OVERFLOW_TOLERANCE",
                defaults.overflow_tolerance,
            )?,
            base_line_height: parse_or(&lookup, "BASE_LINE_HEIGHT", defaults.base_line_height)?,
            base_font_size: parse_or(&lookup, "BASE_FONT_SIZE_PX", defaults.base_font_size)?,
            content_width: parse_or(&lookup, "CONTENT_WIDTH_PX", defaults.content_width)?,
            font,
            ..defaults
        };

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080u16)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            pagination,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.pagination.max_content_height, 1030.0);
        assert_eq!(config.pagination.font, FontFamily::Inter);
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("PAGE_MAX_CONTENT_HEIGHT", "960"),
            ("BASE_LINE_HEIGHT", "1.5"),
            ("FONT_FAMILY", "computer_modern"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.pagination.max_content_height, 960.0);
        assert_eq!(config.pagination.base_line_height, 1.5);
        assert_eq!(config.pagination.font, FontFamily::ComputerModern);
        assert_eq!(config.pagination.buffer_min, -15.0);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("BASE_FONT_SIZE_PX", "big")]).is_err());
        assert!(config_from(&[("FONT_FAMILY", "comic_sans")]).is_err());
    }
}
