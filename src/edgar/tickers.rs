use crate::errors::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

const TICKER_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// One row of EDGAR's company ticker file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registrant {
    /// CIK padded to 10 digits with leading zeros.
    pub cik: String,
    pub ticker: String,
    pub title: String,
}

// company_tickers.json is keyed by row index: {"0": {"cik_str": ..}, ...}
#[derive(Debug, Deserialize)]
struct TickerEntry {
    cik_str: u64,
    ticker: String,
    title: String,
}

pub async fn fetch_registrants(client: &Client, user_agent: &str) -> Result<Vec<Registrant>> {
    log::debug!("Fetching company tickers from SEC");
    let url = Url::parse(TICKER_URL).map_err(Error::upstream)?;
    let body = super::fetch_text(client, &url, user_agent).await?;

    let entries: HashMap<String, TickerEntry> = serde_json::from_str(&body)
        .map_err(|e| Error::Upstream(format!("failed to decode company_tickers.json: {}", e)))?;
    log::debug!("Found {} registrant entries", entries.len());

    Ok(entries
        .into_values()
        .map(|entry| Registrant {
            cik: format!("{:010}", entry.cik_str),
            ticker: entry.ticker.trim().to_uppercase(),
            title: entry.title.trim().to_string(),
        })
        .collect())
}

/// Match a free-text query against the registrant list: ticker symbol first,
/// then exact title, then a title substring. A substring that matches more
/// than one registrant is ambiguous and resolves to nothing.
pub fn resolve<'a>(query: &str, registrants: &'a [Registrant]) -> Option<&'a Registrant> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let upper = query.to_uppercase();
    if let Some(hit) = registrants.iter().find(|r| r.ticker == upper) {
        return Some(hit);
    }

    if let Some(hit) = registrants
        .iter()
        .find(|r| r.title.eq_ignore_ascii_case(query))
    {
        return Some(hit);
    }

    let needle = query.to_lowercase();
    let mut matches = registrants
        .iter()
        .filter(|r| r.title.to_lowercase().contains(&needle));
    match (matches.next(), matches.next()) {
        (Some(hit), None) => Some(hit),
        _ => None,
    }
}

pub fn resolve_against(query: &str, registrants: &[Registrant]) -> Result<Registrant> {
    resolve(query, registrants)
        .cloned()
        .ok_or_else(|| Error::CompanyNotFound(query.to_string()))
}

pub async fn resolve_company(
    client: &Client,
    query: &str,
    user_agent: &str,
) -> Result<Registrant> {
    let registrants = fetch_registrants(client, user_agent).await?;
    let registrant = resolve_against(query, &registrants)?;
    log::info!(
        "Resolved \"{}\" to {} (CIK {})",
        query,
        registrant.title,
        registrant.cik
    );
    Ok(registrant)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registrants() -> Vec<Registrant> {
        vec![
            Registrant {
                cik: "0000320193".to_string(),
                ticker: "AAPL".to_string(),
                title: "Apple Inc.".to_string(),
            },
            Registrant {
                cik: "0000789019".to_string(),
                ticker: "MSFT".to_string(),
                title: "Microsoft Corp".to_string(),
            },
            Registrant {
                cik: "0001018724".to_string(),
                ticker: "AMZN".to_string(),
                title: "Amazon.com Inc".to_string(),
            },
        ]
    }

    #[test]
    fn resolves_ticker_case_insensitively() {
        let all = registrants();
        assert_eq!(resolve("aapl", &all).unwrap().cik, "0000320193");
    }

    #[test]
    fn resolves_exact_title() {
        let all = registrants();
        assert_eq!(resolve("microsoft corp", &all).unwrap().ticker, "MSFT");
    }

    #[test]
    fn resolves_unique_title_substring() {
        let all = registrants();
        assert_eq!(resolve("Amazon", &all).unwrap().ticker, "AMZN");
    }

    #[test]
    fn ambiguous_substring_is_no_match() {
        let mut all = registrants();
        all.push(Registrant {
            cik: "0000000001".to_string(),
            ticker: "APLE".to_string(),
            title: "Apple Hospitality REIT Inc".to_string(),
        });
        assert!(resolve("Apple", &all).is_none());
    }

    #[test]
    fn unknown_query_errors_with_company_not_found() {
        let err = resolve_against("No Such Company", &registrants()).unwrap_err();
        assert!(matches!(err, Error::CompanyNotFound(q) if q == "No Such Company"));
    }
}
