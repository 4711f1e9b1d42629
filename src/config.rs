//! Environment configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::delivery::twilio::{TwilioConfig, DEFAULT_API_BASE};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PUBLIC_BASE_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_INVOICE_DIR: &str = "./static/invoices";
const DEFAULT_FONT_PATH: &str = "./static/fonts/Amiri-Regular.ttf";
const DEFAULT_COUNTRY_CODE: &str = "965";
const DEFAULT_DELIVERY_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
    #[error("incomplete Twilio configuration, missing {0}")]
    IncompleteTwilio(&'static str),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub port: u16,
    pub public_base_url: String,
    pub invoice_dir: PathBuf,
    pub font_path: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub default_country_code: String,
    pub default_recipient: Option<String>,
    pub twilio: Option<TwilioConfig>,
}

impl AppConfig {
    /// Read configuration from the process environment, after loading `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match get("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value,
                reason: "expected a port number",
            })?,
            None => DEFAULT_PORT,
        };

        let default_country_code =
            get("DEFAULT_COUNTRY_CODE").unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string());
        let default_country_code = default_country_code
            .trim_start_matches('+')
            .to_string();
        if default_country_code.is_empty()
            || default_country_code.len() > 3
            || !default_country_code.chars().all(|ch| ch.is_ascii_digit())
        {
            return Err(ConfigError::Invalid {
                key: "DEFAULT_COUNTRY_CODE",
                value: default_country_code,
                reason: "expected 1 to 3 digits",
            });
        }

        let public_base_url = get("PUBLIC_BASE_URL")
            .unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !(public_base_url.starts_with("http://") || public_base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "PUBLIC_BASE_URL",
                value: public_base_url,
                reason: "expected an http(s) URL",
            });
        }

        let timeout_secs = match get("DELIVERY_TIMEOUT_SECS") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "DELIVERY_TIMEOUT_SECS",
                value,
                reason: "expected a whole number of seconds",
            })?,
            None => DEFAULT_DELIVERY_TIMEOUT_SECS,
        };

        let twilio = twilio_config(&get, Duration::from_secs(timeout_secs))?;

        Ok(Self {
            bind_address: get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port,
            public_base_url,
            invoice_dir: get("INVOICE_DIR")
                .unwrap_or_else(|| DEFAULT_INVOICE_DIR.to_string())
                .into(),
            font_path: get("INVOICE_FONT_PATH")
                .unwrap_or_else(|| DEFAULT_FONT_PATH.to_string())
                .into(),
            catalog_path: get("CATALOG_PATH").map(PathBuf::from),
            default_country_code,
            default_recipient: get("DEFAULT_RECIPIENT"),
            twilio,
        })
    }
}

fn twilio_config<G>(get: &G, timeout: Duration) -> Result<Option<TwilioConfig>, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let account_sid = get("TWILIO_ACCOUNT_SID");
    let auth_token = get("TWILIO_AUTH_TOKEN");
    let from = get("TWILIO_WHATSAPP_FROM");

    match (account_sid, auth_token, from) {
        (None, None, None) => Ok(None),
        (Some(account_sid), Some(auth_token), Some(from)) => Ok(Some(TwilioConfig {
            account_sid,
            auth_token,
            from,
            api_base: get("TWILIO_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            timeout,
        })),
        (None, _, _) => Err(ConfigError::IncompleteTwilio("TWILIO_ACCOUNT_SID")),
        (_, None, _) => Err(ConfigError::IncompleteTwilio("TWILIO_AUTH_TOKEN")),
        (_, _, None) => Err(ConfigError::IncompleteTwilio("TWILIO_WHATSAPP_FROM")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.public_base_url, "http://127.0.0.1:8080");
        assert_eq!(config.invoice_dir, PathBuf::from("./static/invoices"));
        assert_eq!(config.default_country_code, "965");
        assert!(config.catalog_path.is_none());
        assert!(config.twilio.is_none());
    }

    #[test]
    fn values_are_read_and_trimmed() {
        let config = config_from(&[
            ("PORT", " 9000 "),
            ("PUBLIC_BASE_URL", "https://laundry.example.com/"),
            ("DEFAULT_COUNTRY_CODE", "+966"),
            ("DEFAULT_RECIPIENT", "  "),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.public_base_url, "https://laundry.example.com");
        assert_eq!(config.default_country_code, "966");
        assert!(config.default_recipient.is_none());
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = config_from(&[("DEFAULT_COUNTRY_CODE", "9655")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DEFAULT_COUNTRY_CODE", .. }));

        let err = config_from(&[("PUBLIC_BASE_URL", "laundry.example.com")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PUBLIC_BASE_URL", .. }));
    }

    #[test]
    fn twilio_requires_all_three_values() {
        let config = config_from(&[
            ("TWILIO_ACCOUNT_SID", "AC123"),
            ("TWILIO_AUTH_TOKEN", "secret"),
            ("TWILIO_WHATSAPP_FROM", "+14155238886"),
        ])
        .unwrap();
        let twilio = config.twilio.unwrap();
        assert_eq!(twilio.api_base, "https://api.twilio.com");
        assert_eq!(twilio.timeout, Duration::from_secs(15));

        let err = config_from(&[("TWILIO_ACCOUNT_SID", "AC123")]).unwrap_err();
        assert_eq!(err, ConfigError::IncompleteTwilio("TWILIO_AUTH_TOKEN"));
    }
}
