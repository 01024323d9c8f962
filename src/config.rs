pub const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub viacep_base_url: String,
    pub viacep_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            viacep_base_url: DEFAULT_VIACEP_BASE_URL.to_string(),
            viacep_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    ///
    /// Unset or blank variables fall back to the defaults.
    pub fn from_vars<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let config = Self {
            port: match get("PORT") {
                Some(port) => port
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
                None => defaults.port,
            },
            viacep_base_url: match get("VIACEP_BASE_URL") {
                Some(url) => {
                    let url = url.trim();
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("VIACEP_BASE_URL must start with http:// or https://");
                    }
                    url.trim_end_matches('/').to_string()
                }
                None => defaults.viacep_base_url,
            },
            viacep_timeout_secs: match get("VIACEP_TIMEOUT_SECS") {
                Some(secs) => {
                    let secs: u64 = secs.trim().parse().map_err(|_| {
                        anyhow::anyhow!("VIACEP_TIMEOUT_SECS must be a positive number")
                    })?;
                    if secs == 0 {
                        anyhow::bail!("VIACEP_TIMEOUT_SECS must be greater than zero");
                    }
                    secs
                }
                None => defaults.viacep_timeout_secs,
            },
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("ViaCEP Base URL: {}", config.viacep_base_url);
        tracing::debug!("ViaCEP timeout: {}s", config.viacep_timeout_secs);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}
