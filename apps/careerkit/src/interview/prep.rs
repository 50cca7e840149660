//! Question selection: random picks from the banks, optionally topped with
//! model-written questions tailored to the candidate's skills.

use std::sync::OnceLock;

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::interview::bank::{normalize_category, BankQuestion, Category};
use crate::interview::prompts::{
    personalized_questions_prompt, QUESTIONS_MAX_TOKENS, QUESTIONS_TEMPERATURE,
};
use crate::llm_client::prompts::CAREER_ADVISOR_SYSTEM;
use crate::llm_client::{GenerationRequest, TextGenerator};

pub const DEFAULT_COUNT: usize = 4;
const MIN_GENERATED_CHARS: usize = 15;

fn default_count() -> usize {
    DEFAULT_COUNT
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterviewRequest {
    pub category: String,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterviewQuestion {
    pub number: usize,
    pub question: String,
    pub tip: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewSet {
    pub success: bool,
    pub category: Category,
    pub questions: Vec<InterviewQuestion>,
    pub general_tip: &'static str,
    pub count: usize,
    pub personalized: bool,
}

fn list_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(?:[-*•]|\d+[.)]|q\d+[.:)]?)\s*").expect("valid regex")
    })
}

/// Samples up to `count` bank questions without replacement, numbered from 1.
pub fn pick_questions<R: Rng + ?Sized>(
    category: Category,
    count: usize,
    rng: &mut R,
) -> InterviewSet {
    let mut bank: Vec<&BankQuestion> = category.questions().iter().collect();
    let take = count.min(bank.len());
    let (picked, _) = bank.partial_shuffle(rng, take);

    let questions = picked
        .iter()
        .enumerate()
        .map(|(i, q)| InterviewQuestion {
            number: i + 1,
            question: q.question.to_string(),
            tip: q.tip.to_string(),
        })
        .collect();

    assemble(category, questions, false)
}

/// Pulls usable questions out of free-form model output: list markers are
/// stripped, lines without a `?` or shorter than 15 characters are dropped.
pub fn parse_generated_questions(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| list_marker_re().replace(line, "").trim().to_string())
        .filter(|line| line.chars().count() >= MIN_GENERATED_CHARS && line.contains('?'))
        .collect()
}

/// Model-written questions first, then bank questions until `count` is met.
/// Any generator failure degrades to a plain bank pick.
pub async fn personalized_questions<R: Rng + Send + ?Sized>(
    category: Category,
    count: usize,
    skills: &[String],
    generator: &dyn TextGenerator,
    rng: &mut R,
) -> InterviewSet {
    let prompt = personalized_questions_prompt(category, count, skills);
    let request = GenerationRequest {
        prompt: &prompt,
        system: CAREER_ADVISOR_SYSTEM,
        max_tokens: QUESTIONS_MAX_TOKENS,
        temperature: QUESTIONS_TEMPERATURE,
    };

    let generated = match generator.generate(&request).await {
        Ok(text) => parse_generated_questions(&text),
        Err(e) => {
            warn!("Personalized question generation failed, using bank: {e}");
            return pick_questions(category, count, rng);
        }
    };

    let top_skills = skills.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
    let tip = format!("Ground your answer in a concrete project that used {top_skills}");

    let mut questions: Vec<InterviewQuestion> = generated
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(i, question)| InterviewQuestion {
            number: i + 1,
            question,
            tip: tip.clone(),
        })
        .collect();
    let personalized = !questions.is_empty();

    if questions.len() < count {
        let fill = pick_questions(category, count, rng);
        for bank_question in fill.questions {
            if questions.len() >= count {
                break;
            }
            if questions.iter().any(|q| q.question == bank_question.question) {
                continue;
            }
            questions.push(InterviewQuestion {
                number: questions.len() + 1,
                ..bank_question
            });
        }
    }

    info!(
        "Prepared {} {} questions ({} personalized)",
        questions.len(),
        category.as_str(),
        if personalized { "some" } else { "none" }
    );
    assemble(category, questions, personalized)
}

/// Entry point shared by the CLI and the HTTP handler. The model is asked
/// only when both a generator and at least one skill are present.
pub async fn get_interview_questions<R: Rng + Send + ?Sized>(
    request: &InterviewRequest,
    generator: Option<&dyn TextGenerator>,
    rng: &mut R,
) -> Result<InterviewSet, AppError> {
    let category = normalize_category(&request.category)?;
    if request.count == 0 {
        return Err(AppError::Validation("count must be at least 1".to_string()));
    }

    let skills: Vec<String> = request
        .skills
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    match generator {
        Some(generator) if !skills.is_empty() => {
            Ok(personalized_questions(category, request.count, &skills, generator, rng).await)
        }
        _ => Ok(pick_questions(category, request.count, rng)),
    }
}

fn assemble(
    category: Category,
    questions: Vec<InterviewQuestion>,
    personalized: bool,
) -> InterviewSet {
    InterviewSet {
        success: true,
        category,
        count: questions.len(),
        questions,
        general_tip: category.general_tip(),
        personalized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    struct CannedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _request: &GenerationRequest<'_>) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct DownGenerator;

    #[async_trait]
    impl TextGenerator for DownGenerator {
        async fn generate(&self, _request: &GenerationRequest<'_>) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    fn request(category: &str, count: usize, skills: &[&str]) -> InterviewRequest {
        InterviewRequest {
            category: category.to_string(),
            count,
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_pick_is_unique_and_numbered() {
        let mut rng = StdRng::seed_from_u64(11);
        let set = pick_questions(Category::Technical, 4, &mut rng);

        assert_eq!(set.count, 4);
        assert_eq!(
            set.questions.iter().map(|q| q.number).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
        let unique: HashSet<_> = set.questions.iter().map(|q| &q.question).collect();
        assert_eq!(unique.len(), 4);
        assert!(!set.personalized);
        assert_eq!(set.general_tip, Category::Technical.general_tip());
    }

    #[test]
    fn test_pick_caps_at_bank_size() {
        let mut rng = StdRng::seed_from_u64(12);
        let set = pick_questions(Category::CultureFit, 50, &mut rng);
        assert_eq!(set.count, 10);
    }

    #[test]
    fn test_parse_generated_questions() {
        let text = "Here you go:\n\
                    1. How would you structure error handling in a large Rust service?\n\
                    2) Why?\n\
                    - What trade-offs come with async Rust on a multi-core server?\n\
                    Q3: Describe ownership in Rust.\n\
                    * How do you profile a slow tokio task in production?";
        assert_eq!(
            parse_generated_questions(text),
            vec![
                "How would you structure error handling in a large Rust service?",
                "What trade-offs come with async Rust on a multi-core server?",
                "How do you profile a slow tokio task in production?",
            ]
        );
    }

    #[tokio::test]
    async fn test_personalized_fills_from_bank() {
        let generator = CannedGenerator(
            "1. How have you used Rust lifetimes to avoid copies in a hot path?\n\
             2. What does Send + Sync mean for your tokio handlers?",
        );
        let mut rng = StdRng::seed_from_u64(13);

        let set = get_interview_questions(
            &request("technical", 4, &["rust", "tokio"]),
            Some(&generator),
            &mut rng,
        )
        .await
        .unwrap();

        assert!(set.personalized);
        assert_eq!(set.count, 4);
        assert!(set.questions[0].question.contains("lifetimes"));
        assert!(set.questions[0].tip.contains("rust, tokio"));
        assert_eq!(set.questions[3].number, 4);
        let bank: Vec<&str> = Category::Technical.questions().iter().map(|q| q.question).collect();
        assert!(bank.contains(&set.questions[2].question.as_str()));
    }

    #[tokio::test]
    async fn test_personalized_truncates_to_count() {
        let generator = CannedGenerator(
            "1. How would you shard a Postgres table that outgrew one node?\n\
             2. How would you design idempotent retries for a payment API?\n\
             3. How would you keep a cache consistent with its database?",
        );
        let mut rng = StdRng::seed_from_u64(14);
        let set = personalized_questions(
            Category::SystemDesign,
            2,
            &["postgres".to_string()],
            &generator,
            &mut rng,
        )
        .await;

        assert_eq!(set.count, 2);
        assert!(set.questions.iter().all(|q| q.question.starts_with("How would you")));
    }

    #[tokio::test]
    async fn test_generator_failure_falls_back_to_bank() {
        let mut rng = StdRng::seed_from_u64(15);
        let set = get_interview_questions(
            &request("behavioral", 3, &["rust"]),
            Some(&DownGenerator),
            &mut rng,
        )
        .await
        .unwrap();

        assert!(!set.personalized);
        assert_eq!(set.count, 3);
    }

    #[tokio::test]
    async fn test_no_skills_never_calls_model() {
        let generator = CannedGenerator("1. Would this ever be used in the output?");
        let mut rng = StdRng::seed_from_u64(16);
        let set =
            get_interview_questions(&request("technical", 2, &[" "]), Some(&generator), &mut rng)
                .await
                .unwrap();
        assert!(!set.personalized);
    }

    #[tokio::test]
    async fn test_invalid_requests() {
        let mut rng = StdRng::seed_from_u64(17);
        assert!(get_interview_questions(&request("astrology", 2, &[]), None, &mut rng)
            .await
            .is_err());
        assert!(get_interview_questions(&request("technical", 0, &[]), None, &mut rng)
            .await
            .is_err());
    }
}
