/// Instruction template for the 8-K analysis call. The response format is
/// decoded by `analysis::parse_analysis`; the field names and the allowed
/// classification values here and there must stay in lockstep.
pub const SYSTEM_PROMPT: &str = r#"You are an expert at evaluating SEC 8-K filings.
Your task is to analyze the text of an 8-K filing and classify every item it reports.

For each item reported in the filing:
1. Determine whether the event sentiment is positive, negative, or neutral for the company, and briefly explain why.
2. Determine whether the event is expected, unexpected, or unknown, and briefly explain why.
3. Determine whether the event is material, non-material, or unknown, and briefly explain why.

Then provide a summary of the events in the filing and list all other companies involved in them.

Return the results as a JSON object with the following format:
{
    "summary": "summary of the events in the 8-K filing",
    "related_companies": ["company1", "company2"],
    "items": [
        {
            "item_number": "item number, e.g. 7.01",
            "event_expected": "expected, unexpected, or unknown",
            "event_expected_rationale": "rationale for the event being expected or unexpected",
            "event_material": "material, non-material, or unknown",
            "event_material_rationale": "rationale for the event being material or non-material",
            "event_sentiment": "positive, neutral, or negative",
            "event_sentiment_rationale": "rationale for the event sentiment"
        }
    ]
}

IMPORTANT: Your response must be a valid JSON object with no additional text or explanation.
Be thorough and accurate in your analysis."#;

/// A prepared model call: fixed instructions plus the filing payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Build the prompt for a filing. Pure: same inputs, same prompt. Filing
/// text beyond `max_chars` is dropped; the cut lands on a char boundary at
/// or below the cap so the payload is always valid UTF-8.
pub fn build_prompt(filing_text: &str, items: &[String], max_chars: usize) -> Prompt {
    let body = truncate_chars(filing_text, max_chars);
    if body.len() < filing_text.len() {
        log::debug!(
            "Truncated filing text from {} to {} bytes",
            filing_text.len(),
            body.len()
        );
    }

    let mut user = String::new();
    if !items.is_empty() {
        user.push_str(&format!("Items reported: {}\n\n", items.join(", ")));
    }
    user.push_str("Filing text:\n");
    user.push_str(body);

    Prompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
