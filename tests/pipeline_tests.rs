use chrono::NaiveDate;
use std::fs;
use std::sync::Mutex;

use pulse8k::edgar::tickers::{resolve_against, Registrant};
use pulse8k::eval;
use pulse8k::llm::{CompletionClient, Prompt};
use pulse8k::{Error, FilingDocument, ParsedFiling};

/// Completion client that answers every call with a canned response and
/// records the prompts it saw.
struct ScriptedClient {
    response: String,
    prompts: Mutex<Vec<Prompt>>,
}

impl ScriptedClient {
    fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn last_prompt(&self) -> Prompt {
        self.prompts.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait::async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, prompt: &Prompt) -> pulse8k::Result<String> {
        self.prompts.lock().unwrap().push(prompt.clone());
        Ok(self.response.clone())
    }
}

fn document(raw_text: &str, items: &[&str]) -> FilingDocument {
    FilingDocument {
        cik: "0000320193".to_string(),
        company_name: "Apple Inc.".to_string(),
        accession_number: "0000320193-24-000069".to_string(),
        filing_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        items: items.iter().map(|s| s.to_string()).collect(),
        raw_text: raw_text.to_string(),
    }
}

const VALID_COMPLETION: &str = r#"{
    "summary": "Apple announced quarterly results.",
    "related_companies": [],
    "items": [
        {
            "item_number": "2.02",
            "event_expected": "expected",
            "event_expected_rationale": "Earnings releases follow a published schedule",
            "event_material": "material",
            "event_material_rationale": "Results affect valuation",
            "event_sentiment": "positive",
            "event_sentiment_rationale": "Revenue grew year over year"
        }
    ]
}"#;

#[tokio::test]
async fn valid_completion_is_returned_verbatim() {
    let llm = ScriptedClient::new(r#"{"summary":"X","related_companies":[],"items":[]}"#);
    let doc = document("Item 2.02 Results of Operations.", &["2.02"]);

    let result = eval::analyze_filing(&doc, &llm, 48_000).await.unwrap();
    assert_eq!(result.summary, "X");
    assert!(result.related_companies.is_empty());
    assert!(result.items.is_empty());
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn classified_items_survive_field_for_field() {
    let llm = ScriptedClient::new(VALID_COMPLETION);
    let doc = document("Item 2.02 Results of Operations.", &["2.02", "9.01"]);

    let result = eval::analyze_filing(&doc, &llm, 48_000).await.unwrap();
    let expected: ParsedFiling = serde_json::from_str(VALID_COMPLETION).unwrap();
    assert_eq!(result, expected);
}

#[tokio::test]
async fn non_json_completion_fails_and_writes_nothing() {
    let llm = ScriptedClient::new("Sorry, I cannot produce JSON today.");
    let doc = document("Item 2.02 Results of Operations.", &["2.02"]);

    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("analysis.json");

    // Mirror the CLI flow: the output file is only written on success.
    match eval::analyze_filing(&doc, &llm, 48_000).await {
        Ok(result) => fs::write(&out_path, serde_json::to_string(&result).unwrap()).unwrap(),
        Err(e) => assert!(matches!(e, Error::MalformedResponse(_))),
    }
    assert!(!out_path.exists());
}

#[tokio::test]
async fn missing_sentiment_field_is_malformed() {
    let completion = VALID_COMPLETION.replace(
        "\"event_sentiment\": \"positive\",\n            ",
        "",
    );
    assert!(!completion.contains("\"event_sentiment\":"));

    let llm = ScriptedClient::new(&completion);
    let doc = document("Item 2.02 Results of Operations.", &["2.02"]);

    let err = eval::analyze_filing(&doc, &llm, 48_000).await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse(_)));
}

#[tokio::test]
async fn oversized_filing_text_is_truncated_before_the_call() {
    let mut text = "Item 2.02 Results of Operations. ".repeat(200);
    text.push_str("TAIL-MARKER");
    let llm = ScriptedClient::new(VALID_COMPLETION);
    let doc = document(&text, &["2.02"]);

    let result = eval::analyze_filing(&doc, &llm, 1_000).await;
    assert!(result.is_ok());

    let prompt = llm.last_prompt();
    let body = prompt
        .user
        .split("Filing text:\n")
        .nth(1)
        .expect("prompt carries a filing body");
    assert_eq!(body.chars().count(), 1_000);
    assert!(!prompt.user.contains("TAIL-MARKER"));
}

#[tokio::test]
async fn unresolved_company_never_reaches_the_model() {
    let registrants = vec![Registrant {
        cik: "0000320193".to_string(),
        ticker: "AAPL".to_string(),
        title: "Apple Inc.".to_string(),
    }];
    let llm = ScriptedClient::new(VALID_COMPLETION);

    // Resolution is the first pipeline stage; when it fails nothing later
    // runs and the model sees no traffic.
    let err = resolve_against("Completely Unknown Holdings", &registrants).unwrap_err();
    assert!(matches!(err, Error::CompanyNotFound(_)));
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn successful_run_can_write_an_output_file() {
    let llm = ScriptedClient::new(VALID_COMPLETION);
    let doc = document("Item 2.02 Results of Operations.", &["2.02", "9.01"]);

    let result = eval::analyze_filing(&doc, &llm, 48_000).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("analysis.json");
    fs::write(&out_path, serde_json::to_string_pretty(&result).unwrap()).unwrap();

    let reread: ParsedFiling =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(reread, result);
}
