//! scorecast - Main entry point

use clap::Parser;
use scorecast::cli::{cmd_info, cmd_predict, cmd_serve, cmd_train, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = scorecast::logging::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Train { data, artifact_dir }) => {
            cmd_train(data, artifact_dir)?;
        }
        Some(Commands::Predict {
            gender,
            race_ethnicity,
            parental_level_of_education,
            lunch,
            test_preparation_course,
            reading_score,
            writing_score,
        }) => {
            cmd_predict(
                gender,
                race_ethnicity,
                parental_level_of_education,
                lunch,
                test_preparation_course,
                reading_score,
                writing_score,
            )?;
        }
        Some(Commands::Info { data }) => {
            cmd_info(data)?;
        }
        Some(Commands::Serve { port, host }) => {
            cmd_serve(&host, port).await?;
        }
        None => {
            // Default: train if needed, then serve (matches the original
            // startup script behavior).
            cmd_serve("0.0.0.0", 8080).await?;
        }
    }

    Ok(())
}
