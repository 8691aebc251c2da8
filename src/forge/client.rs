// Forge HTTP client.
// Fetches repository pages as raw HTML text.

use std::time::Duration;

use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{ForgeListError, Result};

/// Source of raw forge pages.
///
/// The page cache talks to the network only through this seam.
pub trait PageSource {
    /// GET a page and return its body.
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// reqwest-backed page source.
pub struct ForgeClient {
    client: Client,
}

impl ForgeClient {
    /// Create a client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));
        headers.insert(USER_AGENT, HeaderValue::from_static("forgelist"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(ForgeListError::Http)?;

        Ok(Self { client })
    }
}

impl PageSource for ForgeClient {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.text().await?),
            status => Err(ForgeListError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }),
        }
    }
}
