use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::domain::ParsedOutput;

static LABELED_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\s*([\s\S]*?)\s*```").expect("valid regex"));
static ANY_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```\s*([\s\S]*?)\s*```").expect("valid regex"));
static OBJECT_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("valid regex"));
static ARRAY_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[\s\S]*\]").expect("valid regex"));

/// One way of locating a JSON payload in model output, in the order tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    LabeledFence,
    AnyFence,
    ObjectSpan,
    ArraySpan,
    WholeText,
}

impl ExtractionStrategy {
    pub const ORDER: [ExtractionStrategy; 5] = [
        ExtractionStrategy::LabeledFence,
        ExtractionStrategy::AnyFence,
        ExtractionStrategy::ObjectSpan,
        ExtractionStrategy::ArraySpan,
        ExtractionStrategy::WholeText,
    ];

    /// First candidate substring this strategy finds. Later matches are ignored.
    pub fn candidate<'t>(&self, text: &'t str) -> Option<&'t str> {
        match self {
            ExtractionStrategy::LabeledFence => first_capture(&LABELED_FENCE, text),
            ExtractionStrategy::AnyFence => first_capture(&ANY_FENCE, text),
            ExtractionStrategy::ObjectSpan => OBJECT_SPAN.find(text).map(|m| m.as_str()),
            ExtractionStrategy::ArraySpan => ARRAY_SPAN.find(text).map(|m| m.as_str()),
            ExtractionStrategy::WholeText => Some(text.trim()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStrategy::LabeledFence => "json_fence",
            ExtractionStrategy::AnyFence => "code_fence",
            ExtractionStrategy::ObjectSpan => "object_span",
            ExtractionStrategy::ArraySpan => "array_span",
            ExtractionStrategy::WholeText => "whole_text",
        }
    }
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn first_capture<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parses `candidate` as JSON, accepting only object or array roots.
fn parse_container(candidate: &str) -> Result<Value, String> {
    let value: Value = serde_json::from_str(candidate).map_err(|e| e.to_string())?;
    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        other => Err(format!(
            "expected a JSON object or array, found {}",
            json_kind(&other)
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Runs the strategies in order and returns the first payload that parses.
pub fn locate_json(text: &str) -> Result<(ExtractionStrategy, Value), String> {
    let mut last_error = String::from("no candidate found");
    for strategy in ExtractionStrategy::ORDER {
        let Some(candidate) = strategy.candidate(text) else {
            continue;
        };
        match parse_container(candidate) {
            Ok(value) => return Ok((strategy, value)),
            Err(e) => {
                debug!("Extraction strategy {} rejected candidate: {}", strategy, e);
                last_error = e;
            }
        }
    }
    Err(last_error)
}

/// Best-effort recovery of a function-call payload from generated text.
///
/// Brace and bracket spans are greedy (first opener to last closer), so prose
/// with stray braces around the payload falls through to a parse error.
pub fn extract_json(text: &str) -> ParsedOutput {
    match locate_json(text) {
        Ok((strategy, value)) => {
            debug!("Extracted JSON payload via {}", strategy);
            ParsedOutput::parsed(text, value)
        }
        Err(e) => ParsedOutput::failed(text, format!("Could not parse JSON: {}", e)),
    }
}
