use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

use crate::errors::{Error, Result};

/// Whether the market could have anticipated the event. The model may
/// answer `unknown` when the filing gives no basis for a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
pub enum EventExpected {
    #[serde(rename = "expected")]
    Expected,
    #[serde(rename = "unexpected")]
    Unexpected,
    #[serde(rename = "unknown")]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
pub enum EventMaterial {
    #[serde(rename = "material")]
    Material,
    #[serde(rename = "non-material")]
    NonMaterial,
    #[serde(rename = "unknown")]
    Unknown,
}

/// Sentiment is always three-valued; the prompt offers no unknown here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
pub enum EventSentiment {
    #[serde(rename = "positive")]
    Positive,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "negative")]
    Negative,
}

impl fmt::Display for EventSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventSentiment::Positive => write!(f, "positive"),
            EventSentiment::Neutral => write!(f, "neutral"),
            EventSentiment::Negative => write!(f, "negative"),
        }
    }
}

/// One classified 8-K item. Field order is the output key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingItem {
    pub item_number: String,
    pub event_expected: EventExpected,
    pub event_expected_rationale: String,
    pub event_material: EventMaterial,
    pub event_material_rationale: String,
    pub event_sentiment: EventSentiment,
    pub event_sentiment_rationale: String,
}

/// The validated analysis result; the pipeline's final output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFiling {
    pub summary: String,
    pub related_companies: Vec<String>,
    pub items: Vec<FilingItem>,
}

/// Decode and validate a model completion. No repair: a missing field, a
/// value outside the closed enums, an empty rationale, or an item number
/// absent from the source filing all fail hard.
pub fn parse_analysis(raw: &str, source_items: &[String]) -> Result<ParsedFiling> {
    let body = strip_code_fence(raw);

    let parsed: ParsedFiling = serde_json::from_str(body)
        .map_err(|e| Error::MalformedResponse(e.to_string()))?;

    for item in &parsed.items {
        if item.event_expected_rationale.trim().is_empty()
            || item.event_material_rationale.trim().is_empty()
            || item.event_sentiment_rationale.trim().is_empty()
        {
            return Err(Error::MalformedResponse(format!(
                "item {} is missing a rationale",
                item.item_number
            )));
        }
        if !source_items.is_empty()
            && !source_items
                .iter()
                .any(|s| s.as_str() == item.item_number.trim())
        {
            return Err(Error::MalformedResponse(format!(
                "item {} does not appear in the source filing (reported: {})",
                item.item_number,
                source_items.join(", ")
            )));
        }
    }

    Ok(parsed)
}

// Models under a "JSON only" instruction still occasionally wrap the object
// in a Markdown fence; unwrap that one framing, nothing else.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
