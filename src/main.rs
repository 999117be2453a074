use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use party_predict::cli;
use party_predict::cli::predict::PredictArgs;

#[derive(Parser)]
#[command(name = "party-predict", version)]
#[command(about = "Predict a person's political party from name, country and year", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the party for one person
    Predict {
        /// Person's full name
        #[arg(long)]
        name: String,

        /// Country, exactly as it appears in the catalog
        #[arg(long)]
        country: String,

        /// Approximate year
        #[arg(long, allow_negative_numbers = true)]
        year: i32,

        /// Model variant: heuristic or remote
        #[arg(long, default_value = "heuristic")]
        variant: String,

        /// Path to config file (defaults to ./party-predict.toml or ~/.config/party-predict/config.toml)
        #[arg(long)]
        config: Option<String>,

        /// Path to a TOML party catalog (overrides the config file)
        #[arg(long)]
        catalog: Option<String>,

        /// Override LLM model for the remote variant
        #[arg(long)]
        model: Option<String>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Also print the prompt and raw model output
        #[arg(long)]
        show_prompt: bool,
    },

    /// List catalog countries and their candidate parties
    Countries {
        #[arg(long)]
        config: Option<String>,

        #[arg(long)]
        catalog: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Predict {
            name,
            country,
            year,
            variant,
            config,
            catalog,
            model,
            json,
            show_prompt,
        } => {
            cli::predict::run(PredictArgs {
                name,
                country,
                year,
                variant,
                config,
                catalog,
                model,
                json,
                show_prompt,
            })
            .await?;
        }
        Commands::Countries { config, catalog } => {
            cli::countries::run(config, catalog)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_predict_defaults() {
        let cli = Cli::try_parse_from([
            "party-predict",
            "predict",
            "--name",
            "Jane Doe",
            "--country",
            "India",
            "--year",
            "2014",
        ])
        .unwrap();
        match cli.command {
            Commands::Predict {
                name,
                country,
                year,
                variant,
                json,
                show_prompt,
                ..
            } => {
                assert_eq!(name, "Jane Doe");
                assert_eq!(country, "India");
                assert_eq!(year, 2014);
                assert_eq!(variant, "heuristic");
                assert!(!json);
                assert!(!show_prompt);
            }
            Commands::Countries { .. } => panic!("expected predict"),
        }
    }

    #[test]
    fn test_parse_predict_with_all_args() {
        let cli = Cli::try_parse_from([
            "party-predict",
            "predict",
            "--name",
            "Jane Doe",
            "--country",
            "India",
            "--year",
            "2014",
            "--variant",
            "remote",
            "--config",
            "pp.toml",
            "--catalog",
            "parties.toml",
            "--model",
            "gpt-4o",
            "--json",
            "--show-prompt",
        ])
        .unwrap();
        match cli.command {
            Commands::Predict {
                variant,
                config,
                catalog,
                model,
                json,
                show_prompt,
                ..
            } => {
                assert_eq!(variant, "remote");
                assert_eq!(config.unwrap(), "pp.toml");
                assert_eq!(catalog.unwrap(), "parties.toml");
                assert_eq!(model.unwrap(), "gpt-4o");
                assert!(json);
                assert!(show_prompt);
            }
            Commands::Countries { .. } => panic!("expected predict"),
        }
    }

    #[test]
    fn test_parse_predict_requires_year() {
        let result = Cli::try_parse_from([
            "party-predict",
            "predict",
            "--name",
            "Jane Doe",
            "--country",
            "India",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_countries() {
        let cli = Cli::try_parse_from(["party-predict", "countries", "--catalog", "c.toml"]).unwrap();
        match cli.command {
            Commands::Countries { catalog, config } => {
                assert_eq!(catalog.unwrap(), "c.toml");
                assert!(config.is_none());
            }
            Commands::Predict { .. } => panic!("expected countries"),
        }
    }

    #[test]
    fn test_parse_missing_subcommand() {
        assert!(Cli::try_parse_from(["party-predict"]).is_err());
    }
}
