//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use currency_hex::MAX_TTL;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub fx_api_url: String,
    pub fx_api_token: String,
    pub cache_ttl: Duration,
    pub background_refresh: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()?;

        let fx_api_url = required(&lookup, "FX_API_URL")?;
        let fx_api_token = required(&lookup, "FX_API_TOKEN")?;

        let ttl_secs: u64 = lookup("FX_CACHE_TTL_SECS")
            .unwrap_or_else(|| "3600".to_string())
            .parse()?;
        if ttl_secs == 0 {
            anyhow::bail!("FX_CACHE_TTL_SECS must be greater than zero");
        }
        if ttl_secs > MAX_TTL.as_secs() {
            anyhow::bail!(
                "FX_CACHE_TTL_SECS must be at most {} seconds",
                MAX_TTL.as_secs()
            );
        }

        let background_refresh = lookup("FX_BACKGROUND_REFRESH")
            .map(|v| v.parse::<bool>())
            .transpose()?
            .unwrap_or(false);

        Ok(Self {
            port,
            fx_api_url,
            fx_api_token,
            cache_ttl: Duration::from_secs(ttl_secs),
            background_refresh,
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<String> {
    lookup(key)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| anyhow::anyhow!("environment variable {} not found", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[
            ("FX_API_URL", "https://api.fxratesapi.com/latest"),
            ("FX_API_TOKEN", "token"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.fx_api_url, "https://api.fxratesapi.com/latest");
        assert_eq!(config.fx_api_token, "token");
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
        assert!(!config.background_refresh);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("FX_API_URL", "http://localhost:9000"),
            ("FX_API_TOKEN", "token"),
            ("PORT", "3000"),
            ("FX_CACHE_TTL_SECS", "600"),
            ("FX_BACKGROUND_REFRESH", "true"),
        ])
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.cache_ttl, Duration::from_secs(600));
        assert!(config.background_refresh);
    }

    #[test]
    fn test_missing_url_is_error() {
        let err = load(&[("FX_API_TOKEN", "token")]).err().unwrap();
        assert!(err.to_string().contains("FX_API_URL"));
    }

    #[test]
    fn test_empty_token_is_error() {
        let err = load(&[("FX_API_URL", "http://localhost"), ("FX_API_TOKEN", "")])
            .err()
            .unwrap();
        assert!(err.to_string().contains("FX_API_TOKEN"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let base = [("FX_API_URL", "http://localhost"), ("FX_API_TOKEN", "t")];

        assert!(load(&[base[0], base[1], ("PORT", "not-a-port")]).is_err());
        assert!(load(&[base[0], base[1], ("FX_CACHE_TTL_SECS", "0")]).is_err());
        assert!(load(&[base[0], base[1], ("FX_BACKGROUND_REFRESH", "yes")]).is_err());
    }

    #[test]
    fn test_ttl_upper_bound() {
        let base = [("FX_API_URL", "http://localhost"), ("FX_API_TOKEN", "t")];
        let max = MAX_TTL.as_secs().to_string();
        let over = (MAX_TTL.as_secs() + 1).to_string();

        let config = load(&[base[0], base[1], ("FX_CACHE_TTL_SECS", max.as_str())]).unwrap();
        assert_eq!(config.cache_ttl, MAX_TTL);

        let err = load(&[base[0], base[1], ("FX_CACHE_TTL_SECS", over.as_str())])
            .err()
            .unwrap();
        assert!(err.to_string().contains("FX_CACHE_TTL_SECS"));
        assert!(load(&[base[0], base[1], ("FX_CACHE_TTL_SECS", "10000000000000")]).is_err());
    }
}
