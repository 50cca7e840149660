// Prompt templates for cover letter generation.

use crate::llm_client::prompts::NO_PLACEHOLDERS_INSTRUCTION;

pub const COVER_LETTER_MAX_TOKENS: u32 = 350;
pub const COVER_LETTER_TEMPERATURE: f32 = 0.8;

const DEFAULT_BACKGROUND: &str = "Experienced software professional";

pub fn cover_letter_system_prompt(company: &str, role: &str, name: &str) -> String {
    format!(
        "You are writing a cover letter for {name} applying to {company} for a {role} position. \
         Write naturally and professionally. {NO_PLACEHOLDERS_INSTRUCTION} \
         Be concise - 3 short paragraphs only."
    )
}

/// Body-only prompt: the greeting and signature are added afterwards.
pub fn cover_letter_prompt(company: &str, role: &str, name: &str, background: &str) -> String {
    let background = if background.is_empty() {
        DEFAULT_BACKGROUND
    } else {
        background
    };

    format!(
        r#"Write a cover letter body (3 paragraphs only, no greeting or signature).

Company: {company}
Position: {role}
Candidate name: {name}
Background: {background}

Paragraph 1: Express genuine enthusiasm for the {role} role at {company}.
Paragraph 2: Highlight relevant technical skills and a specific achievement with metrics.
Paragraph 3: Express interest in discussing how you can contribute to {company}.

Write ONLY the 3 paragraphs. No placeholders, no brackets, no [text like this]. Use the actual company name "{company}" and role "{role}"."#
    )
}

/// Static body used whenever the model is off, fails, or writes something
/// unusable.
pub fn fallback_body(company: &str, role: &str, background: &str) -> String {
    let lead_in = if background.is_empty() {
        " I".to_string()
    } else {
        format!(" With {}, I", background.to_lowercase())
    };

    format!(
        "I am excited to apply for the {role} position at {company}.{lead_in} believe I would be a strong addition to your team.

In my previous roles, I have successfully delivered projects that improved system performance and team productivity. I am particularly drawn to {company}'s mission and innovative approach to solving complex problems.

I would welcome the opportunity to discuss how my skills and experience align with your team's needs. Thank you for considering my application."
    )
}
