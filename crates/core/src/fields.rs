use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::llm::TextGenerator;
use crate::prompts::render_detail_extraction_prompt;
use crate::skills::normalize_skills;

pub const UNKNOWN_FIELD: &str = "Unknown";
pub const EMPTY_WORK_EXPERIENCE: &str = "No work experience found.";
pub const WORK_EXPERIENCE_FALLBACK: &str = "Unable to extract work experience.";
pub const SKILLS_FALLBACK: &str = "Unable to extract skills.";

const MISSING_JOB_DESCRIPTION: &str = "No description available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub full_name: String,
    pub phone_number: String,
    pub email_address: String,
    pub work_experience: String,
    pub skills: String,
}

impl CandidateRecord {
    pub fn extraction_failed() -> Self {
        Self {
            full_name: UNKNOWN_FIELD.to_string(),
            phone_number: UNKNOWN_FIELD.to_string(),
            email_address: UNKNOWN_FIELD.to_string(),
            work_experience: WORK_EXPERIENCE_FALLBACK.to_string(),
            skills: SKILLS_FALLBACK.to_string(),
        }
    }
}

pub struct FieldExtractor<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> FieldExtractor<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub async fn extract(&self, resume_text: &str) -> CandidateRecord {
        let prompt = render_detail_extraction_prompt(resume_text);

        let raw = match self.generator.generate(&prompt).await {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, "field extraction request failed");
                return CandidateRecord::extraction_failed();
            }
        };

        let raw = raw.trim();
        match serde_json::from_str::<Value>(raw) {
            Ok(parsed) if parsed.is_object() => record_from_json(&parsed),
            Ok(_) => {
                warn!("response parsed to json but not to an object");
                CandidateRecord::extraction_failed()
            }
            Err(error) => {
                warn!(%error, "response was not valid json, recovering with patterns");
                extract_with_patterns(raw)
            }
        }
    }
}

fn record_from_json(parsed: &Value) -> CandidateRecord {
    CandidateRecord {
        full_name: string_field(parsed, "Full Name"),
        phone_number: string_field(parsed, "Phone Number"),
        email_address: string_field(parsed, "Email Address"),
        work_experience: work_experience_from_json(parsed),
        skills: skills_from_json(parsed),
    }
}

fn string_field(parsed: &Value, key: &str) -> String {
    parsed
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_FIELD)
        .to_string()
}

fn work_experience_from_json(parsed: &Value) -> String {
    let entries = match parsed.get("Work Experience").and_then(Value::as_array) {
        Some(entries) => entries.as_slice(),
        None => &[],
    };

    let lines: Vec<String> = entries.iter().filter_map(work_entry_line).collect();
    if lines.is_empty() {
        EMPTY_WORK_EXPERIENCE.to_string()
    } else {
        lines.join("\n")
    }
}

fn work_entry_line(entry: &Value) -> Option<String> {
    let job = entry.as_object()?;
    let field = |key: &str, default: &str| {
        job.get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };

    Some(format!(
        "{} at {} ({} - {}): {}",
        field("Job Title", UNKNOWN_FIELD),
        field("Company Name", UNKNOWN_FIELD),
        field("Start Date", UNKNOWN_FIELD),
        field("End Date", UNKNOWN_FIELD),
        field("Job Description", MISSING_JOB_DESCRIPTION),
    ))
}

fn skills_from_json(parsed: &Value) -> String {
    match parsed.get("Skills") {
        Some(value) => normalize_skills(value),
        None => String::new(),
    }
}

pub fn extract_with_patterns(response: &str) -> CandidateRecord {
    match FallbackPatterns::compile() {
        Ok(patterns) => patterns.extract(response),
        Err(error) => {
            warn!(%error, "fallback patterns failed to compile");
            CandidateRecord::extraction_failed()
        }
    }
}

struct FallbackPatterns {
    full_name: Regex,
    phone_number: Regex,
    email_address: Regex,
    work_experience: Regex,
    work_entry: Regex,
    skills: Regex,
    quoted: Regex,
    brace_or_quote: Regex,
}

impl FallbackPatterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            full_name: Regex::new(r#""Full Name"\s*:\s*"([^"]+)""#)?,
            phone_number: Regex::new(r#""Phone Number"\s*:\s*"([^"]+)""#)?,
            email_address: Regex::new(r#""Email Address"\s*:\s*"([^"]+)""#)?,
            work_experience: Regex::new(r#"(?s)"Work Experience"\s*:\s*\[(.*?)\]"#)?,
            work_entry: Regex::new(r"(?s)\{(.*?)\}")?,
            skills: Regex::new(r#"(?s)"Skills"\s*:\s*\[(.*?)\]"#)?,
            quoted: Regex::new(r#""([^"]+)""#)?,
            brace_or_quote: Regex::new(r#"[{}"]"#)?,
        })
    }

    fn extract(&self, response: &str) -> CandidateRecord {
        let mut record = CandidateRecord::extraction_failed();

        if let Some(name) = first_group(&self.full_name, response) {
            record.full_name = name;
        }
        if let Some(phone) = first_group(&self.phone_number, response) {
            record.phone_number = phone;
        }
        if let Some(email) = first_group(&self.email_address, response) {
            record.email_address = email;
        }

        if let Some(listed) = first_group(&self.work_experience, response) {
            let entries: Vec<String> = self
                .work_entry
                .captures_iter(&listed)
                .filter_map(|capture| capture.get(1).map(|entry| entry.as_str()))
                .map(|entry| {
                    self.brace_or_quote
                        .replace_all(entry, "")
                        .replace(',', ", ")
                        .trim()
                        .to_string()
                })
                .collect();

            if !entries.is_empty() {
                record.work_experience = entries.join("\n");
            }
        }

        if let Some(listed) = first_group(&self.skills, response) {
            let skills: Vec<Value> = self
                .quoted
                .captures_iter(&listed)
                .filter_map(|capture| capture.get(1).map(|item| item.as_str()))
                .map(|item| Value::String(item.to_string()))
                .collect();

            record.skills = normalize_skills(&Value::Array(skills));
        }

        record
    }
}

fn first_group(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|capture| capture.get(1).map(|group| group.as_str().to_string()))
}
