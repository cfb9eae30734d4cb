mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pagelinks_core::{init_logging, AppConfig, AppConfigTrait};

use commands::{check, related};

#[derive(Parser)]
#[command(name = "pagelinks")]
#[command(about = "Find the pages that reference a page through relationship fields")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the pages related to a page as JSON
    Related(related::RelatedArgs),

    /// Validate configuration and check the database connection
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("failed to load configuration from the environment")?;
    if let Commands::Related(args) = &cli.command {
        args.apply_overrides(&mut config.resolver);
    }
    config.validate().context("invalid configuration")?;

    init_logging(&config.logging).map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))?;
    tracing::debug!(environment = %config.environment, "configuration loaded");

    match cli.command {
        Commands::Related(args) => related::run(&config, &args).await,
        Commands::Check => check::run(&config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_related_requires_both_ids() {
        assert!(Cli::try_parse_from(["pagelinks", "related", "--page-id", "42"]).is_err());

        let cli = Cli::try_parse_from(["pagelinks", "related", "--page-id", "42", "--stream-id", "5", "--pretty"]).unwrap();
        match cli.command {
            Commands::Related(args) => {
                assert_eq!(args.page_id, 42);
                assert_eq!(args.stream_id, 5);
                assert!(args.pretty);
                assert_eq!(args.fan_out, None);
            }
            Commands::Check => panic!("expected the related command"),
        }
    }

    #[test]
    fn test_check_takes_no_arguments() {
        assert!(matches!(Cli::try_parse_from(["pagelinks", "check"]).unwrap().command, Commands::Check));
        assert!(Cli::try_parse_from(["pagelinks", "check", "--pretty"]).is_err());
    }
}
