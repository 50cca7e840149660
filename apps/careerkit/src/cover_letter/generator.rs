//! Cover letter generation: model-written body with a static fallback.
//!
//! The model is asked for three paragraphs only. Whatever comes back is
//! cleaned of `[Company]`-style placeholders; if it is still unusable the
//! fallback body is used and `used_llm` is false with a `fallback_reason`.

use std::sync::OnceLock;

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cover_letter::prompts::{
    cover_letter_prompt, cover_letter_system_prompt, fallback_body, COVER_LETTER_MAX_TOKENS,
    COVER_LETTER_TEMPERATURE,
};
use crate::errors::AppError;
use crate::llm_client::{GenerationRequest, TextGenerator};
use crate::resume::highlights::extract_highlights;

const MIN_BODY_CHARS: usize = 100;

fn default_name() -> String {
    "Candidate".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoverLetterRequest {
    pub company: String,
    pub role: String,
    #[serde(default = "default_name")]
    pub name: String,
    /// Already-extracted resume text. Files are read by the caller.
    #[serde(default)]
    pub resume_text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverLetterResult {
    pub success: bool,
    pub cover_letter: String,
    pub company: String,
    pub role: String,
    pub used_resume: bool,
    pub used_llm: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub extracted_skills: Vec<String>,
}

enum PlaceholderTarget {
    Company,
    Role,
    Name,
}

fn named_placeholder_res() -> &'static [(Regex, PlaceholderTarget)] {
    static RES: OnceLock<Vec<(Regex, PlaceholderTarget)>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            (r"(?i)\[company\]", PlaceholderTarget::Company),
            (r"(?i)\[position\]", PlaceholderTarget::Role),
            (r"(?i)\[role\]", PlaceholderTarget::Role),
            (r"(?i)\[name\]", PlaceholderTarget::Name),
            (r"(?i)\[your name\]", PlaceholderTarget::Name),
            (r"(?i)\[candidate\]", PlaceholderTarget::Name),
        ]
        .into_iter()
        .map(|(pattern, target)| (Regex::new(pattern).expect("valid regex"), target))
        .collect()
    })
}

fn leftover_placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[[\w\s]+\]").expect("valid regex"))
}

fn double_space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"  +").expect("valid regex"))
}

/// Fills the placeholders small models like to emit, drops any other
/// `[word word]` blanks and collapses the double spaces that leaves behind.
pub fn clean_generated_body(body: &str, company: &str, role: &str, name: &str) -> String {
    let mut cleaned = body.to_string();
    for (re, target) in named_placeholder_res() {
        let value = match target {
            PlaceholderTarget::Company => company,
            PlaceholderTarget::Role => role,
            PlaceholderTarget::Name => name,
        };
        cleaned = re.replace_all(&cleaned, NoExpand(value)).into_owned();
    }
    let cleaned = leftover_placeholder_re().replace_all(&cleaned, "");
    double_space_re().replace_all(&cleaned, " ").into_owned()
}

fn is_usable_body(body: &str) -> bool {
    body.trim().chars().count() >= MIN_BODY_CHARS && !body.contains('[')
}

fn wrap_letter(company: &str, name: &str, body: &str) -> String {
    format!(
        "Dear Hiring Manager at {company},\n\n{}\n\nBest regards,\n{name}",
        body.trim()
    )
}

pub async fn generate_cover_letter(
    request: &CoverLetterRequest,
    generator: Option<&dyn TextGenerator>,
) -> Result<CoverLetterResult, AppError> {
    let company = request.company.trim();
    let role = request.role.trim();
    let name = match request.name.trim() {
        "" => "Candidate",
        name => name,
    };
    if company.is_empty() || role.is_empty() {
        return Err(AppError::Validation(
            "company and role are both required".to_string(),
        ));
    }

    let highlights = request
        .resume_text
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(extract_highlights)
        .unwrap_or_default();
    let background = highlights.context_line();

    let (body, fallback_reason) = match generator {
        None => (None, Some("LLM disabled".to_string())),
        Some(generator) => {
            let prompt = cover_letter_prompt(company, role, name, &background);
            let system = cover_letter_system_prompt(company, role, name);
            let generation = GenerationRequest {
                prompt: &prompt,
                system: &system,
                max_tokens: COVER_LETTER_MAX_TOKENS,
                temperature: COVER_LETTER_TEMPERATURE,
            };
            match generator.generate(&generation).await {
                Ok(raw) => {
                    let cleaned = clean_generated_body(&raw, company, role, name);
                    if is_usable_body(&cleaned) {
                        (Some(cleaned), None)
                    } else {
                        warn!(
                            "Model cover letter unusable ({} chars), using template",
                            cleaned.len()
                        );
                        (
                            None,
                            Some("model output was too short or kept placeholders".to_string()),
                        )
                    }
                }
                Err(e) => {
                    warn!("Cover letter generation failed, using template: {e}");
                    (None, Some(format!("LLM error: {e}")))
                }
            }
        }
    };

    let used_llm = body.is_some();
    let body = body.unwrap_or_else(|| fallback_body(company, role, &background));
    info!("Cover letter for {role} at {company} (used_llm={used_llm})");

    Ok(CoverLetterResult {
        success: true,
        cover_letter: wrap_letter(company, name, &body),
        company: company.to_string(),
        role: role.to_string(),
        used_resume: !highlights.is_empty(),
        used_llm,
        fallback_reason,
        extracted_skills: highlights.skills,
    })
}
