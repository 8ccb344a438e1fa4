use async_trait::async_trait;
use reqwest::Client;
use sc_core::{Error, Result};
use std::time::Duration;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the body of the page at `url`
    async fn fetch(&self, url: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("{} returned {}", url, status)));
        }
        Ok(response.text().await?)
    }
}
