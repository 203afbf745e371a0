//! ats-match: score a CV against a job description

use anyhow::Context;
use ats_match::analysis::dispatcher::BUSY_LABEL;
use ats_match::analysis::{HttpScoringClient, ScoringClient};
use ats_match::cli::{Cli, Commands, ConfigAction, DisclaimerAction};
use ats_match::config::{parse_output_format, Config};
use ats_match::disclaimer::{DisclaimerStore, DISCLAIMER_NOTICE};
use ats_match::input::job_source::read_job_description;
use ats_match::input::{FileFormat, TextExtractor, UploadedFile};
use ats_match::output::formatter::formatter_for;
use ats_match::output::WriterPresenter;
use ats_match::{AnalysisSession, AtsMatchError};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let disclaimer = DisclaimerStore::default_location();
    if !disclaimer.is_accepted() && !matches!(cli.command, Commands::Disclaimer { .. }) {
        eprintln!("⚠️  {}", DISCLAIMER_NOTICE);
        eprintln!("💡 Run `ats-match disclaimer accept` to hide this notice.\n");
    }

    if let Err(e) = run_command(cli.command, config, config_path, disclaimer).await {
        match e.downcast_ref::<AtsMatchError>() {
            Some(app_error) => {
                error!("Command failed: {}", app_error);
                eprintln!("❌ {}", app_error.user_notice());
            }
            None => {
                error!("Command failed: {:#}", e);
            }
        }
        process::exit(1);
    }
}

async fn run_command(
    command: Commands,
    config: Config,
    config_path: PathBuf,
    disclaimer: DisclaimerStore,
) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            job,
            job_text,
            cv,
            cv_text,
            output,
        } => {
            info!("Starting ATS match analysis");

            let output_format = match output {
                Some(format) => parse_output_format(&format)?,
                None => config.output.format.clone(),
            };

            let client: Arc<dyn ScoringClient> = Arc::new(HttpScoringClient::new(&config.service)?);
            let mut session = AnalysisSession::new(client, TextExtractor::shared());

            let job_description = match (job, job_text) {
                (Some(path), _) => read_job_description(&path)
                    .await
                    .with_context(|| format!("Job description file: {}", path.display()))?,
                (None, Some(text)) => text,
                (None, None) => return Err(AtsMatchError::MissingJobDescription.into()),
            };
            session.set_job_description(job_description);

            match (cv, cv_text) {
                (Some(path), _) => {
                    println!("📄 Processing CV: {}", path.display());
                    let file = UploadedFile::read(&path).await?;
                    session.upload(file).await?;
                }
                (None, Some(text)) => session.cv_mut().set_typed_text(text),
                (None, None) => return Err(AtsMatchError::MissingCv.into()),
            }

            println!(
                "📊 Job description: {} words | CV: {} words",
                session.job_description_word_count(),
                session.cv_word_count()
            );

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message(BUSY_LABEL);
            spinner.enable_steady_tick(Duration::from_millis(100));

            let mut presenter = WriterPresenter::new(
                formatter_for(&output_format, config.output.color_output),
                std::io::stdout(),
            );
            let result = session.submit(&mut presenter).await;
            spinner.finish_and_clear();
            result?;
        }

        Commands::Extract { file } => {
            let extractor = TextExtractor::shared();
            let upload = UploadedFile::read(&file).await?;
            let format = ats_match::input::file_detector::validate(&upload)?;

            println!("📄 Extracting {} text from {}", format.label(), upload.name());
            let text = extractor.extract(&upload, format).await?;
            println!("{}", text);

            if format == FileFormat::Pdf && text.trim().is_empty() {
                println!("⚠️  No text found. The PDF may be scanned images.");
            }
        }

        Commands::Industries => {
            let client = HttpScoringClient::new(&config.service)?;
            let industries = client.supported_industries().await?;

            println!("🏭 Supported industries:");
            for industry in industries {
                println!("  • {}", industry);
            }
        }

        Commands::Disclaimer { action } => match action {
            Some(DisclaimerAction::Show) | None => {
                println!("{}", DISCLAIMER_NOTICE);
                let status = if disclaimer.is_accepted() { "accepted" } else { "not accepted" };
                println!("\nStatus: {}", status);
            }
            Some(DisclaimerAction::Accept) => {
                disclaimer
                    .accept()
                    .with_context(|| format!("Writing {}", disclaimer.path().display()))?;
                println!("✅ Disclaimer accepted");
            }
        },

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                println!("Scoring service: {}", config.service.base_url);
                println!("  Analysis path: {}", config.service.analysis_path);
                println!("  Industries path: {}", config.service.industries_path);
                println!("Output format: {:?}", config.output.format);
                println!("Colors: {}", config.output.color_output);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Set { key, value }) => {
                let mut config = config;
                config.set(&key, &value)?;
                config.save_to(&config_path)?;
                println!("✅ Set {} = {}", key, value);
            }
        },
    }

    Ok(())
}
