use std::time::Duration;

use crate::analysis::{self, ParsedFiling};
use crate::core::config::Config;
use crate::edgar::{self, FilingDocument};
use crate::errors::{Error, Result};
use crate::llm::{build_prompt, CompletionClient};

/// Analyze an already-fetched filing: build the prompt, make one completion
/// call, validate the answer. A failure at any stage discards the run.
pub async fn analyze_filing(
    document: &FilingDocument,
    llm: &dyn CompletionClient,
    max_filing_chars: usize,
) -> Result<ParsedFiling> {
    let prompt = build_prompt(&document.raw_text, &document.items, max_filing_chars);
    let completion = llm.complete(&prompt).await?;
    let parsed = analysis::parse_analysis(&completion, &document.items)?;

    for item in &parsed.items {
        log::info!(
            "Item {}: {} sentiment",
            item.item_number,
            item.event_sentiment
        );
    }
    Ok(parsed)
}

/// Full pipeline for one company query: resolve the registrant, fetch its
/// latest 8-K, analyze it.
pub async fn run(query: &str, config: &Config, llm: &dyn CompletionClient) -> Result<ParsedFiling> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(Error::upstream)?;

    let registrant = edgar::resolve_company(&http_client, query, &config.user_agent).await?;
    let document = edgar::fetch_latest_8k(&http_client, &registrant, &config.user_agent).await?;
    log::info!(
        "Analyzing {} 8-K {} ({} items)",
        document.company_name,
        document.accession_number,
        document.items.len()
    );

    analyze_filing(&document, llm, config.max_filing_chars).await
}
