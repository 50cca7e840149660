// Prompt templates for personalized interview questions.

use crate::interview::bank::Category;

pub const QUESTIONS_MAX_TOKENS: u32 = 300;
pub const QUESTIONS_TEMPERATURE: f32 = 0.7;

/// Asks for one question per line so the reply can be parsed without JSON.
pub fn personalized_questions_prompt(
    category: Category,
    count: usize,
    skills: &[String],
) -> String {
    let kind = match category {
        Category::Behavioral => "behavioral",
        Category::Technical => "technical coding",
        Category::SystemDesign => "system design",
        Category::CultureFit => "culture fit",
    };

    format!(
        r#"Write {count} {kind} interview questions for a candidate whose skills are: {skills}.

Rules:
- One question per line, numbered "1.", "2.", ...
- Every question must end with a question mark.
- Make each question specific to the listed skills.
- No answers, no commentary, nothing else."#,
        skills = skills.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_skills_and_count() {
        let prompt = personalized_questions_prompt(
            Category::SystemDesign,
            3,
            &["rust".to_string(), "kafka".to_string()],
        );
        assert!(prompt.starts_with("Write 3 system design interview questions"));
        assert!(prompt.contains("skills are: rust, kafka."));
    }
}
