pub mod filing;
pub mod report;
pub mod text;
pub mod tickers;

use crate::errors::{Error, Result};
use crate::utils::rate_limit::RateLimiter;
use reqwest::Client;
use url::Url;

pub use filing::{fetch_latest_8k, FilingDocument};
pub use tickers::resolve_company;

/// Fetch a URL from EDGAR and return the response body. All EDGAR traffic
/// goes through here so every request carries the declared user agent and
/// holds a limiter permit for its duration.
pub(crate) async fn fetch_text(client: &Client, url: &Url, user_agent: &str) -> Result<String> {
    log::debug!("Fetching URL: {}", url);

    let _permit = RateLimiter::edgar().acquire().await;

    // The gzip feature negotiates Accept-Encoding and decompresses; only the
    // user agent is set by hand (SEC fair-access conduct requires one).
    let response = client
        .get(url.as_str())
        .header(reqwest::header::USER_AGENT, user_agent)
        .send()
        .await
        .map_err(Error::upstream)?;

    log::debug!("Response status: {}", response.status());

    if !response.status().is_success() {
        return Err(Error::Upstream(format!(
            "{} returned HTTP {}",
            url,
            response.status()
        )));
    }

    response.text().await.map_err(Error::upstream)
}
