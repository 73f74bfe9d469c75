//! Authnet CLI
//!
//! Sends authorize and purchase requests to Authorize.Net from the command line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use authnet_client::{AuthnetClient, ClientConfig};
use authnet_hex::GatewayService;
use authnet_types::{AuthorizeParams, Card, Currency, DeviceType, MarketType, TransactionType};

#[derive(Parser)]
#[command(name = "authnet")]
#[command(author, version, about = "Authorize.Net gateway CLI", long_about = None)]
struct Cli {
    /// API login ID
    #[arg(long, env = "AUTHNET_AUTH_NAME")]
    auth_name: Option<String>,

    /// Transaction key
    #[arg(long, env = "AUTHNET_TRANSACTION_KEY", hide_env_values = true)]
    transaction_key: Option<String>,

    /// Use the sandbox endpoint (true/1/yes); overrides the parameters document
    #[arg(long, env = "AUTHNET_TEST_MODE", value_parser = parse_flag, action = ArgAction::Set)]
    test_mode: Option<bool>,

    /// Post to this URL instead of the sandbox or live endpoint
    #[arg(long, env = "AUTHNET_ENDPOINT")]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authorize funds without capturing them
    Authorize(TransactionArgs),
    /// Authorize and capture funds
    Purchase(TransactionArgs),
}

#[derive(Args, Default)]
struct TransactionArgs {
    /// JSON parameters document; flags given alongside override its values
    #[arg(long)]
    params: Option<PathBuf>,

    /// Amount in major units, e.g. 10.00
    #[arg(long, conflicts_with = "amount_integer")]
    amount: Option<String>,
    /// Amount in minor units, e.g. 1000
    #[arg(long)]
    amount_integer: Option<i64>,
    /// Currency (USD, EUR, GBP, ...)
    #[arg(long)]
    currency: Option<String>,

    #[arg(long)]
    card_number: Option<String>,
    #[arg(long)]
    expiry_month: Option<u32>,
    #[arg(long)]
    expiry_year: Option<i32>,
    #[arg(long)]
    cvv: Option<String>,
    /// Raw magnetic-stripe data
    #[arg(long)]
    tracks: Option<String>,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    address1: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    postcode: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    invoice_number: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    client_ip: Option<String>,
    #[arg(long)]
    terminal_number: Option<String>,
    /// Device type name or code (unknown=1 ... virtual_terminal=10)
    #[arg(long)]
    device_type: Option<String>,
    /// Market type name or code (ecommerce=0, moto=1, retail=2)
    #[arg(long)]
    market_type: Option<String>,
}

fn parse_flag(value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(format!("expected true/false, got '{}'", other)),
    }
}

impl Cli {
    /// Resolves the subcommand into a transaction type and its parameters,
    /// with the global flags taking precedence over the parameters document.
    fn into_request(self) -> Result<(TransactionType, AuthorizeParams)> {
        let (transaction_type, args) = match self.command {
            Commands::Authorize(args) => (TransactionType::AuthOnly, args),
            Commands::Purchase(args) => (TransactionType::AuthCapture, args),
        };

        let mut params = args.into_params()?;
        if let Some(auth_name) = self.auth_name {
            params.auth_name = Some(auth_name);
        }
        if let Some(transaction_key) = self.transaction_key {
            params.transaction_key = Some(transaction_key);
        }
        if let Some(test_mode) = self.test_mode {
            params.test_mode = test_mode;
        }

        Ok((transaction_type, params))
    }
}

impl TransactionArgs {
    /// Merges the parameters document (if any) with the flags.
    fn into_params(self) -> Result<AuthorizeParams> {
        let mut params = match &self.params {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let document = serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?;
                AuthorizeParams::from_json(document)?
            }
            None => AuthorizeParams::new(),
        };

        if let Some(amount) = self.amount {
            params = params.with_amount(amount);
        }
        if let Some(amount) = self.amount_integer {
            params = params.with_amount_integer(amount);
        }
        if let Some(currency) = self.currency {
            params = params.with_currency(currency.parse::<Currency>()?);
        }
        if let Some(device_type) = self.device_type {
            params = params.with_device_type(device_type.parse::<DeviceType>()?);
        }
        if let Some(market_type) = self.market_type {
            params = params.with_market_type(market_type.parse::<MarketType>()?);
        }
        if let Some(invoice_number) = self.invoice_number {
            params = params.with_invoice_number(invoice_number);
        }
        if let Some(description) = self.description {
            params = params.with_description(description);
        }
        if let Some(client_ip) = self.client_ip {
            params = params.with_client_ip(client_ip);
        }
        if let Some(terminal_number) = self.terminal_number {
            params = params.with_terminal_number(terminal_number);
        }

        let mut card = params.card.take().unwrap_or_default();
        let overrides = [
            (&mut card.number, self.card_number),
            (&mut card.cvv, self.cvv),
            (&mut card.tracks, self.tracks),
            (&mut card.billing_address1, self.address1),
            (&mut card.billing_city, self.city),
            (&mut card.billing_state, self.state),
            (&mut card.billing_postcode, self.postcode),
            (&mut card.billing_country, self.country),
            (&mut card.email, self.email),
        ];
        for (field, value) in overrides {
            if value.is_some() {
                *field = value;
            }
        }
        if self.expiry_month.is_some() {
            card.expiry_month = self.expiry_month;
        }
        if self.expiry_year.is_some() {
            card.expiry_year = self.expiry_year;
        }
        if let Some(first_name) = self.first_name {
            card = card.with_first_name(first_name);
        }
        if let Some(last_name) = self.last_name {
            card = card.with_last_name(last_name);
        }
        if card != Card::default() {
            params = params.with_card(card);
        }

        Ok(params)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only the response document
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,authnet_hex=debug,authnet_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.endpoint {
        Some(endpoint) => ClientConfig {
            endpoint: Some(endpoint.clone()),
        },
        None => ClientConfig::from_env()?,
    };
    let service = GatewayService::new(AuthnetClient::from_config(&config));

    let (transaction_type, params) = cli.into_request()?;

    tracing::debug!(?params, "Resolved parameters");

    let response = service.execute(transaction_type, &params).await?;
    println!("{}", serde_json::to_string_pretty(&response.data())?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("yes"), Ok(true));
        assert_eq!(parse_flag("1"), Ok(true));
        assert_eq!(parse_flag("TRUE"), Ok(true));
        assert_eq!(parse_flag("0"), Ok(false));
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn test_flags_build_params() {
        let cli = Cli::try_parse_from([
            "authnet",
            "--auth-name",
            "login",
            "authorize",
            "--amount",
            "10.00",
            "--currency",
            "usd",
            "--card-number",
            "4111111111111111",
            "--expiry-month",
            "12",
            "--expiry-year",
            "2099",
            "--city",
            "Springfield",
            "--device-type",
            "wireless_pos",
        ])
        .unwrap();

        assert_eq!(cli.auth_name.as_deref(), Some("login"));
        let Commands::Authorize(args) = cli.command else {
            panic!("Expected authorize command");
        };
        let params = args.into_params().unwrap();

        assert_eq!(params.money().unwrap().amount(), 1000);
        assert_eq!(params.device_type, Some(DeviceType::WirelessPos));
        let card = params.card.unwrap();
        assert_eq!(card.billing_city.as_deref(), Some("Springfield"));
        assert_eq!(card.expiry_mmyy().as_deref(), Some("1299"));
    }

    #[test]
    fn test_no_card_flags_means_no_card() {
        let params = TransactionArgs {
            amount_integer: Some(500),
            currency: Some("EUR".into()),
            ..Default::default()
        }
        .into_params()
        .unwrap();

        assert!(params.card.is_none());
    }

    #[test]
    fn test_amount_flags_conflict() {
        let result = Cli::try_parse_from([
            "authnet",
            "purchase",
            "--amount",
            "1.00",
            "--amount-integer",
            "100",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_params_document_with_flag_override() {
        let path = std::env::temp_dir().join(format!("authnet-params-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"amount": "5.00", "currency": "USD", "invoiceNumber": "INV-1"}"#,
        )
        .unwrap();

        let params = TransactionArgs {
            params: Some(path.clone()),
            amount: Some("7.50".into()),
            ..Default::default()
        }
        .into_params()
        .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(params.money().unwrap().amount(), 750);
        assert_eq!(params.invoice_number.as_deref(), Some("INV-1"));
    }

    #[test]
    fn test_test_mode_flag_overrides_document() {
        let path = std::env::temp_dir().join(format!("authnet-mode-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"testMode": true, "amount": "1.00", "currency": "USD"}"#).unwrap();
        let path_arg = path.to_string_lossy().into_owned();

        let cli = Cli::try_parse_from([
            "authnet",
            "--test-mode",
            "false",
            "purchase",
            "--params",
            path_arg.as_str(),
        ])
        .unwrap();
        let (transaction_type, params) = cli.into_request().unwrap();

        let cli = Cli::try_parse_from(["authnet", "purchase", "--params", path_arg.as_str()]).unwrap();
        let untouched = cli.test_mode.is_none().then(|| cli.into_request().unwrap().1);
        std::fs::remove_file(&path).ok();

        assert_eq!(transaction_type, TransactionType::AuthCapture);
        assert!(!params.test_mode);
        if let Some(untouched) = untouched {
            assert!(untouched.test_mode);
        }
    }

    #[test]
    fn test_unknown_device_type_is_rejected() {
        let result = TransactionArgs {
            device_type: Some("kiosk".into()),
            ..Default::default()
        }
        .into_params();
        assert!(result.is_err());
    }
}
