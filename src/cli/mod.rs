//! Command-line interface for training, prediction, and serving.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::PipelineConfig;
use crate::pipeline::{PredictPipeline, StudentRecord, TrainPipeline};
use crate::utils::read_csv;

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}
fn muted(s: &str) -> ColoredString {
    s.truecolor(140, 140, 140)
}
fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn step_run(msg: &str) {
    print!("  {} {}... ", "›".truecolor(120, 170, 255), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "scorecast")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Student math score prediction service")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the training pipeline
    Train {
        /// Source CSV (defaults to data/stud.csv)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Artifact output directory (defaults to artifact/)
        #[arg(long)]
        artifact_dir: Option<PathBuf>,
    },

    /// Predict a math score from the seven raw attributes
    Predict {
        #[arg(long)]
        gender: String,

        #[arg(long)]
        race_ethnicity: String,

        #[arg(long)]
        parental_level_of_education: String,

        #[arg(long)]
        lunch: String,

        #[arg(long)]
        test_preparation_course: String,

        #[arg(long)]
        reading_score: f64,

        #[arg(long)]
        writing_score: f64,
    },

    /// Start the web server (trains first if artifacts are missing)
    Serve {
        /// Server port
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Server host
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
    },

    /// Show source dataset information
    Info {
        /// Source CSV (defaults to data/stud.csv)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

fn build_config(data: Option<PathBuf>, artifact_dir: Option<PathBuf>) -> PipelineConfig {
    let mut config = PipelineConfig::default();
    if let Some(data) = data {
        config = config.with_source_path(data);
    }
    if let Some(dir) = artifact_dir {
        config = config.with_artifact_dir(dir);
    }
    config
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_train(data: Option<PathBuf>, artifact_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let config = build_config(data, artifact_dir);
    section("Train");

    step_run("Running pipeline");
    let start = Instant::now();
    let report = TrainPipeline::new(config).run()?;
    step_done(&format!("{:?}", start.elapsed()));

    println!();
    println!("  {:<24} {:>10}", muted("Model"), muted("R²"));
    println!("  {}", dim(&"─".repeat(36)));
    for entry in &report.leaderboard {
        println!("  {:<24} {:>10.4}", entry.model, entry.r2);
    }
    println!("  {}", dim(&"─".repeat(36)));
    println!();
    println!(
        "  {} {} {} {:.4}  {} {:.2}",
        ok("best"),
        report.best_model.white().bold(),
        muted("R²:"),
        report.r2,
        muted("RMSE:"),
        report.metrics.rmse
    );
    println!();

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_predict(
    gender: String,
    race_ethnicity: String,
    parental_level_of_education: String,
    lunch: String,
    test_preparation_course: String,
    reading_score: f64,
    writing_score: f64,
) -> anyhow::Result<()> {
    let record = StudentRecord {
        gender,
        race_ethnicity,
        parental_level_of_education,
        lunch,
        test_preparation_course,
        reading_score,
        writing_score,
    };

    section("Predict");
    let prediction = PredictPipeline::with_defaults().predict(&record)?;
    println!(
        "  {:<24} {}",
        muted("Predicted math score"),
        format!("{prediction:.2}").white().bold()
    );
    println!();

    Ok(())
}

pub fn cmd_info(data: Option<PathBuf>) -> anyhow::Result<()> {
    let config = build_config(data, None);
    section("Data Info");

    let df = read_csv(&config.source_path)?;

    println!("  {:<12} {}", muted("File"), config.source_path.display());
    println!("  {:<12} {}", muted("Rows"), df.height());
    println!("  {:<12} {}", muted("Columns"), df.width());
    println!();

    println!(
        "  {:<32} {:<12} {:>6} {:>8}",
        muted("Column"),
        muted("Type"),
        muted("Nulls"),
        muted("Unique")
    );
    println!("  {}", dim(&"─".repeat(62)));

    for col in df.get_columns() {
        println!(
            "  {:<32} {:<12} {:>6} {:>8}",
            col.name(),
            format!("{:?}", col.dtype()).truecolor(140, 140, 140),
            col.null_count(),
            col.n_unique().unwrap_or(0)
        );
    }

    println!();
    Ok(())
}

// ─── Serve ─────────────────────────────────────────────────────────────────────

pub async fn cmd_serve(host: &str, port: u16) -> anyhow::Result<()> {
    use crate::server::{run_server, ServerConfig};

    let pipeline = PipelineConfig::default();

    // Mirror the startup script behavior: make sure artifacts exist before
    // the form goes live.
    if !pipeline.artifacts_ready() {
        println!("  {}", "artifacts missing, training first".yellow());
        let config = pipeline.clone();
        let report = tokio::task::spawn_blocking(move || TrainPipeline::new(config).run()).await??;
        println!(
            "  {} trained {} (R² {:.4})",
            ok("✓"),
            report.best_model,
            report.r2
        );
    }

    println!();
    println!("  {}", "scorecast".white().bold());
    println!("  {}", dim(&format!("v{}", env!("CARGO_PKG_VERSION"))));
    println!();
    println!("  {:<10} http://{}:{}", muted("Form"), host, port);
    println!("  {:<10} http://{}:{}/api/health", muted("Health"), host, port);
    println!();
    println!("  {}", dim("ctrl+c to stop"));
    println!();

    let config = ServerConfig {
        host: host.to_string(),
        port,
    };
    run_server(config, pipeline).await
}
