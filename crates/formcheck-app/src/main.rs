use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use formcheck_agents::{CoachAgent, CoachInput, CoachOutput};
use formcheck_analysis::{Exercise, FormAnalyzer};
use formcheck_app::{replay, AppConfig, ReplayReport};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "formcheck", version, about = "Exercise form checker for recorded pose data")]
struct Cli {
    #[arg(long, global = true, help = "Configuration file (TOML, YAML or JSON)")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze newline-delimited pose JSON from a file or stdin
    Analyze {
        /// Pose recording; reads stdin when omitted
        input: Option<PathBuf>,
        #[arg(long, short, help = "Exercise to check (defaults to the configured one)")]
        exercise: Option<Exercise>,
        #[arg(long, help = "Output machine-readable JSON")]
        json: bool,
        #[arg(long, help = "Add coaching commentary to the verdict")]
        coach: bool,
    },
    /// List known exercises
    Exercises,
}

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    report: &'a ReplayReport,
    coach: Option<&'a CoachOutput>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let path = path.to_str().context("Config path is not valid UTF-8")?;
            AppConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {path}"))?
        }
        None => AppConfig::from_env().context("Failed to load config from environment")?,
    };

    init_tracing(&config.logging.filter);

    match cli.command {
        Commands::Analyze {
            input,
            exercise,
            json,
            coach,
        } => {
            let exercise = exercise.unwrap_or(config.analysis.exercise);
            let mut analyzer = FormAnalyzer::new(exercise);
            let sampling_rate = config.analysis.summary_sampling_rate;

            let report = match &input {
                Some(path) => {
                    let file = File::open(path)
                        .with_context(|| format!("Failed to open {}", path.display()))?;
                    replay(BufReader::new(file), &mut analyzer, sampling_rate)?
                }
                None => replay(io::stdin().lock(), &mut analyzer, sampling_rate)?,
            };

            let commentary = if coach || config.coach.enabled {
                run_coach(&config, &report).await
            } else {
                None
            };

            if json {
                let output = AnalyzeOutput {
                    report: &report,
                    coach: commentary.as_ref(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_report(&report, commentary.as_ref());
            }
        }
        Commands::Exercises => {
            for exercise in Exercise::ALL {
                let note = if exercise.is_supported() { "" } else { " (no form rules yet)" };
                println!("{}{}", exercise, note);
            }
        }
    }

    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Coaching is optional enrichment; failures are logged, never fatal
async fn run_coach(config: &AppConfig, report: &ReplayReport) -> Option<CoachOutput> {
    if report.summary.is_empty() {
        tracing::info!("Skipping coach: no analyzed frames");
        return None;
    }

    let agent = CoachAgent::new(config.coach.agent.clone());
    let input = CoachInput {
        summary: report.summary.clone(),
        verdict: report.verdict.clone(),
    };

    match agent.coach(&input).await {
        Ok(output) => Some(output),
        Err(e) => {
            tracing::warn!("Coach commentary unavailable: {}", e);
            None
        }
    }
}

fn print_report(report: &ReplayReport, commentary: Option<&CoachOutput>) {
    let started = report.summary.started_at.to_datetime();

    println!("Exercise: {}", report.exercise);
    println!("Session: {} (started {})", report.summary.session_id, started.to_rfc3339());
    println!(
        "Frames: {} read, {} measured, {} unreliable, {} rejected",
        report.frames_read, report.frames_measured, report.frames_unreliable, report.frames_rejected
    );
    let verdict = &report.verdict;
    if let (Some(highest), Some(lowest)) = (verdict.highest_angle, verdict.lowest_angle) {
        println!("Torso angle: highest {:.1}°, lowest {:.1}°", highest, lowest);
    }
    println!("Verdict: {}", report.verdict);

    if let Some(commentary) = commentary {
        println!();
        println!("Coach: {}", commentary.headline);
        for cue in &commentary.cues {
            println!("  - {}", cue);
        }
    }
}
