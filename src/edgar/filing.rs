use chrono::NaiveDate;
use itertools::izip;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::report::FormType;
use super::tickers::Registrant;
use crate::errors::{Error, Result};

pub const EDGAR_DATA_URL: &str = "https://data.sec.gov";
pub const EDGAR_ARCHIVES_URL: &str = "https://www.sec.gov/Archives/edgar/data";

/// The `recent` block of a submissions response. EDGAR serves the filing
/// index as parallel arrays, one entry per filing, newest first.
#[derive(Debug, Deserialize)]
pub struct RecentFilings {
    #[serde(rename = "accessionNumber")]
    pub accession_number: Vec<String>,
    #[serde(rename = "filingDate")]
    pub filing_date: Vec<NaiveDate>,
    #[serde(rename = "form")]
    pub form: Vec<FormType>,
    pub items: Vec<String>,
    #[serde(rename = "primaryDocument")]
    pub primary_document: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FilingsData {
    pub recent: RecentFilings,
}

#[derive(Debug, Deserialize)]
pub struct CompanyFilings {
    pub cik: String,
    pub name: String,
    pub filings: FilingsData,
}

/// One row of the filing index, re-assembled from the columnar form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingRef {
    pub accession_number: String,
    pub filing_date: NaiveDate,
    pub items: Vec<String>,
    pub primary_document: String,
}

/// The fetched filing, ready for analysis. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct FilingDocument {
    pub cik: String,
    pub company_name: String,
    pub accession_number: String,
    pub filing_date: NaiveDate,
    /// Item numbers the filing index reports for this submission.
    pub items: Vec<String>,
    pub raw_text: String,
}

pub async fn get_company_filings(
    client: &Client,
    cik: &str,
    user_agent: &str,
) -> Result<CompanyFilings> {
    // Ensure CIK is 10 digits with leading zeros
    let padded_cik = format!("{:0>10}", cik);
    let url = format!("{}/submissions/CIK{}.json", EDGAR_DATA_URL, padded_cik);
    log::info!("Fetching company filings from {}", url);

    let url = Url::parse(&url).map_err(Error::upstream)?;
    let body = super::fetch_text(client, &url, user_agent).await?;

    serde_json::from_str(&body)
        .map_err(|e| Error::Upstream(format!("failed to parse submissions JSON: {}", e)))
}

/// Select the most recent 8-K row from the filing index. Pure over the
/// decoded response so selection is testable on fixtures.
pub fn latest_8k(filings: &CompanyFilings) -> Option<FilingRef> {
    let recent = &filings.filings.recent;
    izip!(
        &recent.accession_number,
        &recent.filing_date,
        &recent.form,
        &recent.items,
        &recent.primary_document,
    )
    .filter(|(_, _, form, _, _)| form.is_8k())
    .max_by_key(|(_, date, _, _, _)| **date)
    .map(
        |(accession_number, filing_date, _, items, primary_document)| FilingRef {
            accession_number: accession_number.clone(),
            filing_date: *filing_date,
            items: items
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            primary_document: primary_document.clone(),
        },
    )
}

/// Archives URL of the filing's primary document: the accession number with
/// dashes removed names the directory, the CIK appears unpadded.
pub fn document_url(cik: &str, filing: &FilingRef) -> Result<Url> {
    let cik_number = cik
        .parse::<u64>()
        .map_err(|_| Error::Upstream(format!("CIK is not numeric: {}", cik)))?;
    let accession = filing.accession_number.replace('-', "");
    let url = format!(
        "{}/{}/{}/{}",
        EDGAR_ARCHIVES_URL, cik_number, accession, filing.primary_document
    );
    Url::parse(&url).map_err(Error::upstream)
}

/// Fetch the registrant's most recent 8-K as plain text.
pub async fn fetch_latest_8k(
    client: &Client,
    registrant: &Registrant,
    user_agent: &str,
) -> Result<FilingDocument> {
    let filings = get_company_filings(client, &registrant.cik, user_agent).await?;

    let filing = latest_8k(&filings)
        .ok_or_else(|| Error::NoRecentFiling(registrant.title.clone()))?;
    log::info!(
        "Latest 8-K for {}: {} filed {}",
        registrant.title,
        filing.accession_number,
        filing.filing_date
    );

    let url = document_url(&filings.cik, &filing)?;
    let html = super::fetch_text(client, &url, user_agent).await?;
    let raw_text = super::text::extract_text(&html);
    log::debug!("Extracted {} chars of filing text", raw_text.len());

    Ok(FilingDocument {
        cik: filings.cik,
        company_name: filings.name,
        accession_number: filing.accession_number,
        filing_date: filing.filing_date,
        items: filing.items,
        raw_text,
    })
}
