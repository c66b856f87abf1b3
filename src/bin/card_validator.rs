//! CLI tool for card validation.
//!
//! # Usage
//!
//! ```bash
//! # Validate a card number offline
//! card-validator validate "4111 1111 1111 1111"
//!
//! # Validate and look up issuer data
//! card-validator validate 4571736000000075 --enrich --output json
//!
//! # Checksum, network, masking
//! card-validator luhn 4111111111111111
//! card-validator detect 378282246310005
//! card-validator mask 4111111111111111
//!
//! # Check digit for a partial number
//! card-validator check-digit 411111111111111
//! ```

use std::process::ExitCode;
use std::time::Duration;

use card_validator::config::{DEFAULT_BIN_SERVICE_URL, DEFAULT_HTTP_TIMEOUT};
use card_validator::luhn::generate_check_digit;
use card_validator::{
    classify, luhn_check, mask_for_logging, sanitize, ValidationResult, Validator,
    ValidatorConfig,
};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "card-validator")]
#[command(author, version, about = "Payment card validation tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a card number
    Validate {
        /// Card number to validate (spaces and dashes allowed)
        card_number: String,

        /// Look up issuer data for valid numbers
        #[arg(short, long)]
        enrich: bool,

        /// BIN lookup timeout in seconds
        #[arg(long, default_value_t = DEFAULT_HTTP_TIMEOUT.as_secs())]
        timeout: u64,

        /// Base URL of the BIN lookup service
        #[arg(long, default_value = DEFAULT_BIN_SERVICE_URL)]
        bin_service_url: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Check if a card passes the Luhn algorithm
    Luhn {
        /// Card number to check
        card_number: String,
    },

    /// Detect the card network
    Detect {
        /// Card number to classify
        card_number: String,
    },

    /// Mask a card number for logs
    Mask {
        /// Card number to mask
        card_number: String,
    },

    /// Compute the Luhn check digit for a partial number
    CheckDigit {
        /// Digits without the check digit
        partial: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            card_number,
            enrich,
            timeout,
            bin_service_url,
            output,
        } => {
            let config = ValidatorConfig::default()
                .with_bin_lookup(enrich)
                .with_timeout(Duration::from_secs(timeout))
                .with_service_url(bin_service_url);
            cmd_validate(&card_number, config, output).await
        }
        Commands::Luhn { card_number } => cmd_luhn(&card_number),
        Commands::Detect { card_number } => cmd_detect(&card_number),
        Commands::Mask { card_number } => cmd_mask(&card_number),
        Commands::CheckDigit { partial } => cmd_check_digit(&partial),
    }
}

async fn cmd_validate(card_number: &str, config: ValidatorConfig, output: OutputFormat) -> ExitCode {
    let validator = match Validator::new(config) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match validator.validate_card(card_number).await {
        Ok(result) => {
            match output {
                OutputFormat::Text => print_text(&result),
                OutputFormat::Json => print_json(&result),
            }
            if result.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            match output {
                OutputFormat::Text => {
                    println!("Valid: no");
                    println!("Error: {}", e);
                }
                OutputFormat::Json => {
                    let body = serde_json::json!({ "valid": false, "error": e.to_string() });
                    println!("{:#}", body);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn print_text(result: &ValidationResult) {
    println!("Valid: {}", if result.valid { "yes" } else { "no" });
    println!("Card Type: {}", result.card_type.name());
    println!("Masked: {}", result.masked());
    println!("BIN: {}", result.bin);
    println!("Last Four: {}", result.last_four);

    if result.is_enriched() {
        println!("Scheme: {}", result.scheme);
        println!("Brand: {}", result.card_brand);
        println!("Kind: {}", result.card_kind);
        println!("Country: {} {}", result.country.name, result.country.emoji);
        println!("Bank: {}", result.bank.name);
    }
}

fn print_json(result: &ValidationResult) {
    // Full digits never leave the process.
    let mut shown = result.clone();
    shown.card_number = result.masked();

    match serde_json::to_string_pretty(&shown) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn cmd_luhn(card_number: &str) -> ExitCode {
    let passes = sanitize(card_number)
        .map(|digits| luhn_check(&digits))
        .unwrap_or(false);

    if passes {
        println!("Luhn check: PASS");
        ExitCode::SUCCESS
    } else {
        println!("Luhn check: FAIL");
        ExitCode::FAILURE
    }
}

fn cmd_detect(card_number: &str) -> ExitCode {
    match sanitize(card_number) {
        Ok(digits) => {
            let card_type = classify(&digits);
            println!("Card Type: {}", card_type.name());
            if card_type.is_known() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_mask(card_number: &str) -> ExitCode {
    match sanitize(card_number) {
        Ok(digits) => {
            println!("{}", mask_for_logging(&digits));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_check_digit(partial: &str) -> ExitCode {
    let digits: Vec<u8> = partial
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as u8)
        .collect();

    if digits.is_empty() {
        eprintln!("Error: No digits provided");
        return ExitCode::FAILURE;
    }

    let check = generate_check_digit(&digits);
    let full: String = digits
        .iter()
        .chain(std::iter::once(&check))
        .map(|d| char::from(b'0' + d))
        .collect();

    println!("Check Digit: {}", check);
    println!("Full Number: {}", full);
    ExitCode::SUCCESS
}
