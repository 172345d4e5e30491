//! Currency CLI
//!
//! Command-line interface for the Currency Conversion API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use currency_client::CurrencyClient;

#[derive(Parser)]
#[command(name = "fx")]
#[command(author, version, about = "Currency conversion API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Currency API
    #[arg(
        long,
        env = "CURRENCY_API_URL",
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    /// Print raw JSON responses
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        value: f64,
        /// Currency code to convert from (e.g. USD)
        from: String,
        /// Currency code to convert to (e.g. AUD)
        to: String,
    },
    /// Show the exchange rates the server is serving
    Rates,
    /// Check API health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = CurrencyClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }
        Commands::Convert { value, from, to } => {
            let result = client.convert(value, &from, &to).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{} {} = {} {}", value, result.from, result.value, result.to);
            }
        }
        Commands::Rates => {
            let rates = client.rates().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rates)?);
            } else {
                println!(
                    "Base {} ({}), valid until {}",
                    rates.base, rates.date, rates.valid_until
                );
                for (code, rate) in &rates.rates {
                    println!("  {code:<6} {rate}");
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from(["fx", "convert", "50", "USD", "AUD"]).unwrap();
        assert_eq!(cli.api_url, "http://localhost:8080");
        match cli.command {
            Commands::Convert { value, from, to } => {
                assert_eq!(value, 50.0);
                assert_eq!(from, "USD");
                assert_eq!(to, "AUD");
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_parse_rejects_non_numeric_value() {
        assert!(Cli::try_parse_from(["fx", "convert", "fifty", "USD", "AUD"]).is_err());
    }

    #[test]
    fn test_parse_api_url_flag() {
        let cli = Cli::try_parse_from(["fx", "--api-url", "http://fx:9000", "--json", "rates"])
            .unwrap();
        assert_eq!(cli.api_url, "http://fx:9000");
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Rates));
    }
}
