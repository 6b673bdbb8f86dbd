use axum::http::HeaderValue;
use clap::{Parser, ValueEnum};
use discount_registry::settings::{
    DEFAULT_MAX_CODES_PER_REQUEST, DEFAULT_MAX_CODE_LENGTH, DEFAULT_MIN_CODE_LENGTH,
};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "DISCOUNT_HUB_LISTEN_ADDR";
pub const STORAGE_PATH_ENV: &str = "DISCOUNT_STORAGE_PATH";
pub const MAX_CODES_PER_REQUEST_ENV: &str = "DISCOUNT_MAX_CODES_PER_REQUEST";
pub const MIN_CODE_LENGTH_ENV: &str = "DISCOUNT_MIN_CODE_LENGTH";
pub const MAX_CODE_LENGTH_ENV: &str = "DISCOUNT_MAX_CODE_LENGTH";
pub const ALLOWED_ORIGINS_ENV: &str = "DISCOUNT_HUB_ALLOWED_ORIGINS";
pub const LOG_FORMAT_ENV: &str = "DISCOUNT_HUB_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_STORAGE_PATH: &str = "discountCodes.json";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5004";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Text => write!(f, "text"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "discount-hub")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(long, env = STORAGE_PATH_ENV, default_value = DEFAULT_STORAGE_PATH)]
    pub storage_path: PathBuf,

    #[arg(
        long,
        env = MAX_CODES_PER_REQUEST_ENV,
        default_value_t = DEFAULT_MAX_CODES_PER_REQUEST
    )]
    pub max_codes_per_request: u16,

    #[arg(long, env = MIN_CODE_LENGTH_ENV, default_value_t = DEFAULT_MIN_CODE_LENGTH)]
    pub min_code_length: u8,

    #[arg(long, env = MAX_CODE_LENGTH_ENV, default_value_t = DEFAULT_MAX_CODE_LENGTH)]
    pub max_code_length: u8,

    #[arg(
        long,
        env = ALLOWED_ORIGINS_ENV,
        value_delimiter = ',',
        default_value = DEFAULT_ALLOWED_ORIGIN,
        value_parser = parse_origin
    )]
    pub allowed_origins: Vec<HeaderValue>,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text
    )]
    pub log_format: LogFormatArg,
}

/// Credentialed CORS cannot use a wildcard, so only concrete origins are
/// accepted.
fn parse_origin(value: &str) -> Result<HeaderValue, String> {
    let value = value.trim();
    if value == "*" {
        return Err("wildcard origin is not allowed with credentials".to_string());
    }
    HeaderValue::from_str(value).map_err(|e| format!("invalid origin '{value}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = CLI::try_parse_from(["discount-hub"]).unwrap();

        assert_eq!(cli.listen_addr.to_string(), DEFAULT_LISTEN_ADDR);
        assert_eq!(cli.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
        assert_eq!(cli.max_codes_per_request, 2000);
        assert_eq!(cli.min_code_length, 7);
        assert_eq!(cli.max_code_length, 8);
        assert_eq!(cli.allowed_origins, vec![DEFAULT_ALLOWED_ORIGIN]);
        assert_eq!(cli.log_format, LogFormatArg::Text);
    }

    #[test]
    fn multiple_origins() {
        let cli = CLI::try_parse_from([
            "discount-hub",
            "--allowed-origins",
            "http://a.example,http://b.example",
        ])
        .unwrap();

        assert_eq!(cli.allowed_origins.len(), 2);
    }

    #[test]
    fn wildcard_origin_is_rejected() {
        assert!(CLI::try_parse_from(["discount-hub", "--allowed-origins", "*"]).is_err());
    }
}
