use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::fields::UNKNOWN_FIELD;

pub fn normalize_skills(value: &Value) -> String {
    let joined = match value {
        Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                match item.as_str() {
                    Some(text) => parts.push(text),
                    None => return UNKNOWN_FIELD.to_string(),
                }
            }
            parts.join(", ")
        }
        Value::String(text) => text.clone(),
        _ => return UNKNOWN_FIELD.to_string(),
    };

    tidy_skill_text(&joined)
}

fn tidy_skill_text(text: &str) -> String {
    let spaced = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let collapsed = match Regex::new(r",\s*,") {
        Ok(double_comma) => double_comma.replace_all(&spaced, ",").into_owned(),
        Err(error) => {
            warn!(%error, "double comma pattern failed to compile");
            spaced
        }
    };

    collapsed.replace(", ,", ",").trim().to_string()
}
