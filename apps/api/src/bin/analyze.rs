use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_analyzer::client::{format_file_size, ApiClient, ClientError, ResumeInput};
use resume_analyzer::render::render_report;

#[derive(Debug, Parser)]
#[command(
    name = "analyze",
    version,
    about = "Score a resume against a job description using the Resume Analyzer API"
)]
struct Cli {
    /// API base URL.
    #[arg(long, env = "RESUME_ANALYZER_URL", default_value = "http://127.0.0.1:8080")]
    api_url: String,

    /// Print raw JSON responses instead of formatted text.
    #[arg(long)]
    json: bool,

    /// Request timeout.
    #[arg(long, default_value = "60s", value_parser = parse_duration)]
    timeout: Duration,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that the API is up.
    Health,
    /// Extract text from a resume file and show a preview.
    Upload { file: PathBuf },
    /// Match a resume against a job description.
    Match(MatchArgs),
    /// List the skills the analyzer recognises.
    Skills,
    /// Show API usage statistics.
    Stats,
}

#[derive(Debug, Args)]
struct MatchArgs {
    #[command(flatten)]
    resume: ResumeSource,
    #[command(flatten)]
    job: JobSource,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct ResumeSource {
    /// Resume file (.pdf, .docx, .doc, .txt).
    #[arg(long)]
    resume: Option<PathBuf>,
    /// Resume text pasted inline.
    #[arg(long)]
    resume_text: Option<String>,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct JobSource {
    /// File holding the job description text.
    #[arg(long)]
    job: Option<PathBuf>,
    /// Job description text inline.
    #[arg(long)]
    job_text: Option<String>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Io { .. } => 3,
            Self::Client(_) => 4,
            Self::Output(_) => 5,
        }
    }
}

fn parse_duration(input: &str) -> Result<Duration, String> {
    humantime::parse_duration(input).map_err(|err| err.to_string())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let client = ApiClient::new(&cli.api_url, cli.timeout)?;
    let json = cli.json;

    match cli.command {
        Command::Health => {
            let health = client.health_check().await?;
            if json {
                return Ok(serde_json::to_string_pretty(&health)?);
            }
            Ok(format!(
                "{} v{} is {} ({})",
                health.service, health.version, health.status, client.base_url()
            ))
        }
        Command::Upload { file } => {
            let size = std::fs::metadata(&file)
                .map_err(|source| CliError::Io {
                    path: file.clone(),
                    source,
                })?
                .len();
            let upload = client.upload_resume(&file).await?;
            if json {
                return Ok(serde_json::to_string_pretty(&upload)?);
            }
            Ok(format!(
                "{} ({})\n{} words, {} characters\n\n{}",
                upload.filename,
                format_file_size(size),
                upload.word_count,
                upload.char_count,
                upload.text_preview
            ))
        }
        Command::Match(args) => {
            let resume = match (args.resume.resume, args.resume.resume_text) {
                (Some(path), _) => ResumeInput::File(path),
                (None, Some(text)) => ResumeInput::Text(text),
                (None, None) => {
                    return Err(CliError::Usage(
                        "provide --resume or --resume-text".to_string(),
                    ))
                }
            };
            let job_description = match (args.job.job, args.job.job_text) {
                (Some(path), _) => std::fs::read_to_string(&path)
                    .map_err(|source| CliError::Io { path, source })?,
                (None, Some(text)) => text,
                (None, None) => {
                    return Err(CliError::Usage("provide --job or --job-text".to_string()))
                }
            };

            let report = client.analyze(resume, &job_description).await?;
            if json {
                return Ok(serde_json::to_string_pretty(&report)?);
            }
            Ok(render_report(&report))
        }
        Command::Skills => {
            let skills = client.skills().await?;
            if json {
                return Ok(serde_json::to_string_pretty(&skills)?);
            }
            Ok(skills
                .iter()
                .map(|(category, names)| format!("{category}: {}", names.join(", ")))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        Command::Stats => {
            let stats = client.stats().await?;
            if json {
                return Ok(serde_json::to_string_pretty(&stats)?);
            }
            Ok(format!(
                "Total analyses:      {}\n\
                 Average score:       {:.1}\n\
                 Avg processing time: {}\n\
                 Supported formats:   {}\n\
                 Max file size:       {}",
                stats.total_analyses,
                stats.average_score,
                stats.avg_processing_time,
                stats.supported_formats.join(", "),
                stats.max_file_size
            ))
        }
    }
}
