//! Purpose: Provide the runtime JSON decode entrypoint and failure categories.
//! Exports: `from_str`, `ParseFailureCategory`, `categorize_error`, `categorize_message`, `hint_for_category`, `hint_for_error`.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Invariants: Categories are derived from the parser's classification, never from payload text.
//! Invariants: Depends only on serde/serde_json so tests can include it by path.
//! Notes: Error mapping into domain errors is done by callsites so context stays explicit.

use serde::de::DeserializeOwned;
use serde_json::error::Category;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseFailureCategory {
    Syntax,
    Eof,
    Data,
    Io,
    DepthLimit,
    NotAnObject,
    Unknown,
}

impl ParseFailureCategory {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Eof => "eof",
            ParseFailureCategory::Data => "data",
            ParseFailureCategory::Io => "io",
            ParseFailureCategory::DepthLimit => "depth-limit",
            ParseFailureCategory::NotAnObject => "not-object",
            ParseFailureCategory::Unknown => "unknown",
        }
    }
}

pub(crate) fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(input)
}

pub(crate) fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match categorize_message(&err.to_string()) {
        ParseFailureCategory::Unknown => match err.classify() {
            Category::Syntax => ParseFailureCategory::Syntax,
            Category::Eof => ParseFailureCategory::Eof,
            Category::Data => ParseFailureCategory::Data,
            Category::Io => ParseFailureCategory::Io,
        },
        category => category,
    }
}

pub(crate) fn categorize_message(message: &str) -> ParseFailureCategory {
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("recursion limit") {
        ParseFailureCategory::DepthLimit
    } else {
        ParseFailureCategory::Unknown
    }
}

pub(crate) fn hint_for_category(category: ParseFailureCategory, context: &str) -> String {
    format!("parse category: {}; context: {context}", category.as_str())
}

pub(crate) fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    format!(
        "{}; at line {}, column {}",
        hint_for_category(categorize_error(err), context),
        err.line(),
        err.column()
    )
}
