use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Filing form type as reported in the submissions index `form` column.
/// Only 8-K selection matters to the pipeline; everything else the index
/// lists is preserved as `Other` so decoding never fails on a new form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum FormType {
    Form8K,
    Form8KA,
    Form10K,
    Form10Q,
    Other(String),
}

impl FormType {
    pub fn is_8k(&self) -> bool {
        matches!(self, FormType::Form8K)
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormType::Form8K => write!(f, "8-K"),
            FormType::Form8KA => write!(f, "8-K/A"),
            FormType::Form10K => write!(f, "10-K"),
            FormType::Form10Q => write!(f, "10-Q"),
            FormType::Other(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for FormType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<FormType, String> {
        match s.to_uppercase().as_str() {
            "8-K" => Ok(FormType::Form8K),
            "8-K/A" => Ok(FormType::Form8KA),
            "10-K" => Ok(FormType::Form10K),
            "10-Q" => Ok(FormType::Form10Q),
            _ => Ok(FormType::Other(s.to_string())),
        }
    }
}

impl TryFrom<String> for FormType {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, String> {
        FormType::from_str(&s)
    }
}

impl From<FormType> for String {
    fn from(form: FormType) -> String {
        form.to_string()
    }
}
