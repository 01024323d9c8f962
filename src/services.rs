use crate::cep::{is_valid_cep, strip_formatting};
use crate::config::Config;
use crate::errors::{AppError, LookupError};
use crate::models::{Address, ViaCepResponse};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Something that can resolve a CEP into an address.
///
/// `ViaCepService` is the production implementation; tests plug in fakes.
pub trait CepLookup {
    /// Looks up a CEP. The code may be formatted; only its digits are sent.
    fn lookup(&self, cep: &str) -> impl Future<Output = Result<Address, LookupError>> + Send;
}

/// Client for the public ViaCEP web service (no token required).
#[derive(Debug, Clone)]
pub struct ViaCepService {
    client: Client,
    base_url: String,
}

impl ViaCepService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.viacep_timeout_secs))
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create ViaCEP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.viacep_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the address for an 8-digit CEP.
    ///
    /// Any failure of the call itself (connection, timeout, non-2xx status,
    /// unparseable body) is reported as `LookupError::Transport`.
    pub async fn fetch_address(&self, cep: &str) -> Result<Address, LookupError> {
        if !is_valid_cep(cep) {
            return Err(LookupError::InvalidCep);
        }
        let digits = strip_formatting(cep);

        let url = format!("{}/ws/{}/json/", self.base_url, digits);
        tracing::info!("Fetching address for CEP {} from ViaCEP: {}", digits, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .inspect_err(|e| tracing::error!("ViaCEP request failed for {}: {}", digits, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("ViaCEP returned error {}: {}", status, error_text);
            return Err(LookupError::Transport(format!(
                "ViaCEP returned status {}: {}",
                status, error_text
            )));
        }

        let data: ViaCepResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse ViaCEP response for {}: {}", digits, e);
            LookupError::Transport(format!("Failed to parse ViaCEP response: {}", e))
        })?;

        if data.erro {
            tracing::warn!("CEP {} not found on ViaCEP", digits);
            return Err(LookupError::NotFound);
        }

        tracing::info!("✓ Address found for CEP {}", digits);
        Ok(Address::from(data))
    }
}

impl CepLookup for ViaCepService {
    async fn lookup(&self, cep: &str) -> Result<Address, LookupError> {
        self.fetch_address(cep).await
    }
}
