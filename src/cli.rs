//! CLI interface for the ATS match client

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ats-match")]
#[command(about = "Score a CV against a job description with an ATS match service")]
#[command(long_about = "Extract text from a PDF or Word CV (or use pasted text), send it with a job description to the scoring service, and print the match report")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a CV against a job description
    #[command(group(ArgGroup::new("job_input").required(true).args(["job", "job_text"])))]
    #[command(group(ArgGroup::new("cv_input").required(true).args(["cv", "cv_text"])))]
    Analyze {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Job description text
        #[arg(long)]
        job_text: Option<String>,

        /// Path to CV file (PDF, DOC, DOCX, max 5MB)
        #[arg(long)]
        cv: Option<PathBuf>,

        /// CV text
        #[arg(long)]
        cv_text: Option<String>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Extract text from a CV file without scoring it
    Extract {
        /// Path to CV file (PDF, DOC, DOCX, max 5MB)
        file: PathBuf,
    },

    /// List industries the scoring service recognizes
    Industries,

    /// Show or accept the disclaimer
    Disclaimer {
        #[command(subcommand)]
        action: Option<DisclaimerAction>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum DisclaimerAction {
    /// Print the disclaimer
    Show,

    /// Accept the disclaimer so it is not shown again
    Accept,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "service.base_url")
        key: String,

        /// Configuration value
        value: String,
    },
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
    fn test_analyze_requires_both_inputs() {
        assert!(Cli::try_parse_from(["ats-match", "analyze", "--job-text", "Go"]).is_err());
        assert!(Cli::try_parse_from(["ats-match", "analyze", "--cv-text", "Go"]).is_err());
        assert!(Cli::try_parse_from([
            "ats-match", "analyze", "--job-text", "Go", "--cv", "cv.pdf", "--cv-text", "Go"
        ])
        .is_err());

        let cli = Cli::try_parse_from([
            "ats-match", "analyze", "--job-text", "Go engineer", "--cv", "cv.pdf",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Analyze { cv: Some(_), .. }));
    }
}
