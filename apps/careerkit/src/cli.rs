//! Command-line surface. Each subcommand prints one JSON document on stdout
//! (template fill and clean print their text output instead).

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

use crate::code::analyzer::analyze_code_file;
use crate::config::Config;
use crate::cover_letter::formatter::format_structured_letter;
use crate::cover_letter::generator::{generate_cover_letter, CoverLetterRequest};
use crate::cover_letter::handlers::PlaceholderResponse;
use crate::cover_letter::placeholders::{apply_placeholders, find_placeholders};
use crate::documents::extract_text;
use crate::errors::AppError;
use crate::interview::prep::{get_interview_questions, InterviewRequest, DEFAULT_COUNT};
use crate::jobs::search::{search_jobs, JobSearchRequest};
use crate::llm_client::output::{clean, CleanMode};
use crate::output::{print_json, print_text};
use crate::resume::analyzer::analyze_resume;
use crate::routes;
use crate::state::AppState;
use crate::template::{fill, parse_assignment};

const STDIN_PATH: &str = "-";

#[derive(Debug, Parser)]
#[command(name = "careerkit", version)]
#[command(about = "Resume, job-match, code-review and interview helpers that speak JSON")]
pub struct Cli {
    /// Log at debug level (stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use the LLM runtime even if LLM_ENABLED is not set
    #[arg(long, global = true)]
    pub llm: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rank job postings against a comma-separated skills list
    Jobs(JobsArgs),

    /// Score a resume (PDF, DOCX, TXT or MD)
    Resume {
        /// Resume file
        file: PathBuf,
    },

    /// Guess complexity and review the style of a source file
    Code {
        /// Source file
        file: PathBuf,
    },

    /// Interview practice questions
    Interview(InterviewArgs),

    /// Generate, format, or fill in cover letters
    CoverLetter {
        #[command(subcommand)]
        command: CoverLetterCommand,
    },

    /// Fill placeholders in a text template
    Template {
        #[command(subcommand)]
        command: TemplateCommand,
    },

    /// Clean up raw model output
    Clean {
        /// Input file, or - for stdin
        #[arg(default_value = STDIN_PATH)]
        input: PathBuf,

        #[arg(long, value_enum, default_value = "json")]
        mode: CleanMode,
    },

    /// Serve the same operations over HTTP
    Serve {
        /// Overrides HOST
        #[arg(long)]
        host: Option<String>,

        /// Overrides PORT
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Debug, Args)]
pub struct JobsArgs {
    /// e.g. "rust, kubernetes, sql"
    #[arg(long)]
    pub skills: String,

    #[arg(long, default_value = "Remote")]
    pub location: String,

    /// Skip the cache lookup (the fresh result is still cached)
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Debug, Args)]
pub struct InterviewArgs {
    /// behavioral, technical, system_design or culture_fit (aliases accepted)
    #[arg(long, default_value = "behavioral")]
    pub category: String,

    #[arg(long, default_value_t = DEFAULT_COUNT)]
    pub count: usize,

    /// Comma-separated skills; with --llm, asks the model for tailored questions
    #[arg(long, value_delimiter = ',')]
    pub skills: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum CoverLetterCommand {
    /// Write a cover letter for a company and role
    Generate {
        #[arg(long)]
        company: String,

        #[arg(long)]
        role: String,

        #[arg(long, default_value = "Candidate")]
        name: String,

        /// Resume to pull skills and achievements from
        #[arg(long)]
        resume: Option<PathBuf>,
    },

    /// Turn structured model output into a dated letter
    Format {
        /// JSON or flattened text, or - for stdin
        #[arg(default_value = STDIN_PATH)]
        input: PathBuf,

        /// Signature name (defaults to a [Your Name] placeholder)
        #[arg(long)]
        name: Option<String>,

        /// Print only the letter text
        #[arg(long)]
        raw: bool,
    },

    /// List [bracketed] placeholders and optionally fill them
    Placeholders {
        /// Letter file, or - for stdin
        #[arg(default_value = STDIN_PATH)]
        input: PathBuf,

        /// "[Placeholder]=value" or "ph-N=value"; repeatable
        #[arg(long = "set")]
        values: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum TemplateCommand {
    /// Render a template to stdout
    Fill {
        /// Template file, or - for stdin
        #[arg(default_value = STDIN_PATH)]
        template: PathBuf,

        /// key=value; repeatable
        #[arg(long = "var")]
        vars: Vec<String>,
    },
}

/// Reads a whole file, or stdin for `-`.
fn read_input(path: &Path) -> Result<String, AppError> {
    if path == Path::new(STDIN_PATH) {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AppError::NotFound(path.display().to_string()),
        _ => AppError::Io(e),
    })
}

fn parse_placeholder_value(raw: &str) -> Result<(String, String), AppError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(AppError::Validation(format!(
            "Invalid placeholder value '{raw}' (expected [Placeholder]=value)"
        ))),
    }
}

pub async fn run(cli: Cli, config: Config) -> Result<(), AppError> {
    let state = AppState::from_config(config, cli.llm)?;

    match cli.command {
        Command::Jobs(args) => {
            let request = JobSearchRequest {
                skills: args.skills,
                location: args.location,
                use_cache: !args.no_cache,
            };
            let mut rng = StdRng::from_entropy();
            let result = search_jobs(
                &request,
                state.job_source.as_ref(),
                state.job_cache.as_ref(),
                &mut rng,
            )
            .await;
            print_json(&result)
        }

        Command::Resume { file } => {
            let text = extract_text(&file)?;
            print_json(&analyze_resume(&text))
        }

        Command::Code { file } => print_json(&analyze_code_file(&file)?),

        Command::Interview(args) => {
            let request = InterviewRequest {
                category: args.category,
                count: args.count,
                skills: args.skills,
            };
            let mut rng = StdRng::from_entropy();
            let set =
                get_interview_questions(&request, state.generator.as_deref(), &mut rng).await?;
            print_json(&set)
        }

        Command::CoverLetter { command } => run_cover_letter(command, &state).await,

        Command::Template {
            command: TemplateCommand::Fill { template, vars },
        } => {
            let vars = vars
                .iter()
                .map(|raw| parse_assignment(raw))
                .collect::<Result<HashMap<_, _>, _>>()?;
            let text = read_input(&template)?;
            print_text(&fill(&text, &vars)?)
        }

        Command::Clean { input, mode } => {
            let raw = read_input(&input)?;
            print_text(&clean(mode, &raw)?)
        }

        Command::Serve { host, port } => {
            let host = host.unwrap_or_else(|| state.config.host.clone());
            let port = port.unwrap_or(state.config.port);
            routes::serve(state, &host, port)
                .await
                .map_err(AppError::Internal)
        }
    }
}

async fn run_cover_letter(command: CoverLetterCommand, state: &AppState) -> Result<(), AppError> {
    match command {
        CoverLetterCommand::Generate {
            company,
            role,
            name,
            resume,
        } => {
            // An unreadable resume only costs personalization.
            let resume_text = resume.and_then(|path| match extract_text(&path) {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!("Ignoring resume {}: {e}", path.display());
                    None
                }
            });
            let request = CoverLetterRequest {
                company,
                role,
                name,
                resume_text,
            };
            let result = generate_cover_letter(&request, state.generator.as_deref()).await?;
            print_json(&result)
        }

        CoverLetterCommand::Format { input, name, raw } => {
            let text = read_input(&input)?;
            let today = Local::now().date_naive();
            let formatted = format_structured_letter(&text, name.as_deref(), today)?;
            if raw {
                print_text(&formatted.letter)
            } else {
                print_json(&formatted)
            }
        }

        CoverLetterCommand::Placeholders { input, values } => {
            let values = values
                .iter()
                .map(|raw| parse_placeholder_value(raw))
                .collect::<Result<HashMap<_, _>, _>>()?;
            let letter = apply_placeholders(&read_input(&input)?, &values);
            let placeholders = find_placeholders(&letter);
            print_json(&PlaceholderResponse {
                success: true,
                letter,
                placeholders,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_jobs_flags() {
        let cli = Cli::try_parse_from([
            "careerkit",
            "jobs",
            "--skills",
            "rust, go",
            "--no-cache",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Jobs(args) => {
                assert_eq!(args.skills, "rust, go");
                assert_eq!(args.location, "Remote");
                assert!(args.no_cache);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_interview_skills_list() {
        let cli = Cli::try_parse_from([
            "careerkit",
            "--llm",
            "interview",
            "--category",
            "coding",
            "--skills",
            "rust,sql",
        ])
        .unwrap();
        assert!(cli.llm);
        match cli.command {
            Command::Interview(args) => {
                assert_eq!(args.count, DEFAULT_COUNT);
                assert_eq!(args.skills, vec!["rust", "sql"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_placeholder_value() {
        assert_eq!(
            parse_placeholder_value("[Company]=Acme = Co").unwrap(),
            ("[Company]".to_string(), "Acme = Co".to_string())
        );
        assert!(parse_placeholder_value("=x").is_err());
        assert!(parse_placeholder_value("no-equals").is_err());
    }

    #[test]
    fn test_read_input_missing_file_is_not_found() {
        let err = read_input(Path::new("/no/such/template.txt")).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
