use std::time::Duration;

use async_trait::async_trait;
use banter_core::AdviceSource;
use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, HeaderValue};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.adviceslip.com";

/// Upper bound on one lookup; expiry is treated as absence.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the Advice Slip API.
///
/// Issues a single uncached GET per lookup and extracts the advice text from
/// the `slip.advice` field of the JSON body.
pub struct AdviceSlipClient {
    client: Client,
    base_url: String,
}

impl AdviceSlipClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a client with a specific request timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Helper method to send a single request.
    ///
    /// Typed failure path behind [`AdviceSource::fetch_advice`]; the error
    /// only ever reaches a log line.
    async fn try_fetch(&self) -> anyhow::Result<String> {
        let response = self
            .client
            .get(format!("{}/advice", self.base_url))
            .header(CACHE_CONTROL, HeaderValue::from_static("no-store"))
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let advice = response["slip"]["advice"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("response is missing slip.advice"))?;

        Ok(format!(
            "Here's a little piece of advice for you:\n\n\"{advice}\""
        ))
    }
}

impl Default for AdviceSlipClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdviceSource for AdviceSlipClient {
    async fn fetch_advice(&self) -> Option<String> {
        match self.try_fetch().await {
            Ok(text) => {
                debug!("advice lookup succeeded");
                Some(text)
            }
            Err(e) => {
                warn!("advice lookup failed: {e:#}");
                None
            }
        }
    }
}
