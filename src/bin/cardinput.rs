//! CLI tool for card input validation and masking.
//!
//! # Usage
//!
//! ```bash
//! # Validate a (partial) card number
//! cardinput number "4111 1111 1111 1111"
//!
//! # Which brands could this be?
//! cardinput detect 3
//!
//! # Format as the user types, with the caret after the fifth digit
//! cardinput format 41111 --caret 5
//!
//! # Validate expiry, CVV and postal code
//! cardinput date 12/30
//! cardinput cvv 1234 --card-type american-express
//! cardinput postal 94107
//!
//! # Use custom brands and JSON output
//! cardinput --cards cards.json --output json detect 9999
//! ```
//!
//! Validators exit with 0 when the value is valid, 1 otherwise; usage and
//! configuration errors exit with 2. Set `RUST_LOG=debug` for diagnostics.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use card_input::expiry::{self, ExpirationDateInput};
use card_input::{
    cvv, detect, format, generate, luhn, name, postal, validate, CardTypeDefinition,
    CardTypeRegistry, DeletionKey, Formatter, Selection, Verification,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cardinput")]
#[command(author, version, about = "Card input validation and masking tool")]
struct Cli {
    /// JSON file with custom card definitions to register
    #[arg(long, global = true, value_name = "FILE")]
    cards: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the brands a (partial) card number could belong to
    Detect {
        /// Digits typed so far
        #[arg(default_value = "")]
        digits: String,
    },

    /// Validate a card number
    Number {
        /// Card number (spaces and dashes allowed)
        card_number: String,

        /// Maximum number of digits to accept
        #[arg(long)]
        max_length: Option<usize>,

        /// Require UnionPay numbers to pass the Luhn check
        #[arg(long)]
        luhn_union_pay: bool,

        /// Do not check the Luhn checksum
        #[arg(long)]
        skip_luhn: bool,
    },

    /// Validate a cardholder name
    Name {
        /// Name as typed
        name: String,
    },

    /// Validate an expiration month
    Month {
        /// Month (1-12)
        month: String,
    },

    /// Validate an expiration year
    Year {
        /// Two or four digit year
        year: String,

        /// Maximum years in the future to accept
        #[arg(short, long)]
        max_elapsed: Option<u32>,
    },

    /// Validate an expiration date
    Date {
        /// Date (MM/YY, MM/YYYY, MM YY, YYYY-MM, MMYY, ...)
        date: String,

        /// Year, if DATE holds only the month
        #[arg(long)]
        year: Option<String>,

        /// Maximum years in the future to accept
        #[arg(short, long)]
        max_elapsed: Option<u32>,
    },

    /// Validate a CVV/CVC
    Cvv {
        /// Security code
        cvv: String,

        /// Use the code size of this card type
        #[arg(short, long, conflicts_with = "size")]
        card_type: Option<String>,

        /// Accepted code sizes (default 3)
        #[arg(short, long, value_delimiter = ',')]
        size: Vec<usize>,
    },

    /// Validate a postal code
    Postal {
        /// Postal code
        code: String,

        /// Minimum length
        #[arg(long, default_value_t = postal::DEFAULT_MIN_POSTAL_CODE_LENGTH)]
        min_length: usize,
    },

    /// Insert spaces at the brand's gap positions
    Gaps {
        /// Card number
        card_number: String,

        /// Use the gaps of this card type instead of the detected one
        #[arg(short, long)]
        card_type: Option<String>,
    },

    /// Apply an input mask and report where the caret ends up
    Format {
        /// Raw value
        value: String,

        /// Mask pattern, e.g. "{{99}}/{{99}}" (default: card number mask)
        #[arg(short, long)]
        pattern: Option<String>,

        /// Card type whose number mask to use
        #[arg(short, long, conflicts_with = "pattern")]
        card_type: Option<String>,

        /// Caret position (default: end of value)
        #[arg(long)]
        caret: Option<usize>,

        /// Simulate a deletion key on VALUE (already formatted) first
        #[arg(long)]
        delete: Option<DeleteArg>,
    },

    /// Check a digit string with the Luhn algorithm
    Luhn {
        /// Digits to check
        digits: String,
    },

    /// Generate test card numbers (for testing only)
    Generate {
        /// Card type to generate
        #[arg(short, long, default_value = card_input::card::types::VISA)]
        card_type: String,

        /// Number of cards to generate
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Output formatted (with spaces)
        #[arg(short, long)]
        formatted: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum DeleteArg {
    Backspace,
    Delete,
}

impl From<DeleteArg> for DeletionKey {
    fn from(arg: DeleteArg) -> Self {
        match arg {
            DeleteArg::Backspace => DeletionKey::Backspace,
            DeleteArg::Delete => DeletionKey::Delete,
        }
    }
}

/// Ordered key/value output, printed as text lines or a JSON object.
struct Report {
    rows: Vec<(&'static str, Value)>,
}

impl Report {
    fn new() -> Self {
        Self { rows: Vec::new() }
    }

    fn verification(result: impl Into<Verification>) -> Self {
        let result = result.into();
        Self::new()
            .field("valid", result.is_valid)
            .field("potentially_valid", result.is_potentially_valid)
    }

    fn field(mut self, key: &'static str, value: impl Into<Value>) -> Self {
        self.rows.push((key, value.into()));
        self
    }

    fn print(&self, output: OutputFormat) {
        match output {
            OutputFormat::Text => {
                for (key, value) in &self.rows {
                    println!("{}: {}", label(key), text(value));
                }
            }
            OutputFormat::Json => {
                let object: serde_json::Map<String, Value> = self
                    .rows
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.clone()))
                    .collect();
                println!("{}", Value::Object(object));
            }
        }
    }
}

fn label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::Bool(true) => "yes".into(),
        Value::Bool(false) => "no".into(),
        Value::Null => "-".into(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(text).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

fn card_json(card: &CardTypeDefinition) -> Value {
    json!({
        "type": card.card_type,
        "niceType": card.nice_type,
        "gaps": card.gaps,
        "lengths": card.lengths,
        "code": { "name": card.code.name, "size": card.code.size },
    })
}

fn exit_for(valid: bool) -> ExitCode {
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn load_registry(cards: Option<&Path>) -> Result<CardTypeRegistry, String> {
    let mut registry = CardTypeRegistry::new();
    if let Some(path) = cards {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        let added = registry
            .add_cards_from_json(&json)
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        tracing::info!(path = %path.display(), added, "loaded custom card types");
    }
    Ok(registry)
}

fn lookup(registry: &CardTypeRegistry, key: &str) -> Result<CardTypeDefinition, String> {
    registry
        .get_type_info(key)
        .ok_or_else(|| format!("\"{}\" is not a recognized card type", key))
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = load_registry(cli.cards.as_deref())
        .and_then(|registry| run(&registry, cli.command, cli.output));

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(
    registry: &CardTypeRegistry,
    command: Commands,
    output: OutputFormat,
) -> Result<ExitCode, String> {
    match command {
        Commands::Detect { digits } => Ok(cmd_detect(registry, &digits, output)),
        Commands::Number {
            card_number,
            max_length,
            luhn_union_pay,
            skip_luhn,
        } => {
            let options = validate::CardNumberOptions {
                max_length,
                luhn_validate_union_pay: luhn_union_pay,
                skip_luhn_validation: skip_luhn,
            };
            Ok(cmd_number(registry, &card_number, &options, output))
        }
        Commands::Name { name: value } => {
            let result = name::validate_cardholder_name(&value);
            Report::verification(result).print(output);
            Ok(exit_for(result.is_valid))
        }
        Commands::Month { month } => {
            let result = expiry::validate_expiration_month(&month);
            Report::verification(result)
                .field("valid_for_this_year", result.is_valid_for_this_year)
                .print(output);
            Ok(exit_for(result.is_valid))
        }
        Commands::Year { year, max_elapsed } => {
            let result = expiry::validate_expiration_year(&year, max_elapsed);
            Report::verification(result)
                .field("current_year", result.is_current_year)
                .print(output);
            Ok(exit_for(result.is_valid))
        }
        Commands::Date {
            date,
            year,
            max_elapsed,
        } => {
            let input = match year {
                Some(year) => ExpirationDateInput::parts(date, year),
                None => ExpirationDateInput::Text(date),
            };
            let result = expiry::validate_expiration_date(input, max_elapsed);
            let valid = result.is_valid;
            Report::verification(result.clone())
                .field("month", result.month)
                .field("year", result.year)
                .print(output);
            Ok(exit_for(valid))
        }
        Commands::Cvv {
            cvv: code,
            card_type,
            size,
        } => {
            let result = match card_type {
                Some(key) => cvv::validate_cvv_for_card(&code, &lookup(registry, &key)?),
                None if size.is_empty() => cvv::validate_cvv(&code),
                None => cvv::validate_cvv_sizes(&code, &size),
            };
            Report::verification(result).print(output);
            Ok(exit_for(result.is_valid))
        }
        Commands::Postal { code, min_length } => {
            let options = postal::PostalCodeOptions { min_length };
            let result = postal::validate_postal_code_with(&code, &options);
            Report::verification(result).print(output);
            Ok(exit_for(result.is_valid))
        }
        Commands::Gaps {
            card_number,
            card_type,
        } => {
            let card = card_type.map(|key| lookup(registry, &key)).transpose()?;
            let spaced =
                format::add_gaps_to_card_number_with(registry, &card_number, card.as_ref());
            Report::new().field("formatted", spaced).print(output);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Format {
            value,
            pattern,
            card_type,
            caret,
            delete,
        } => cmd_format(registry, &value, pattern, card_type, caret, delete, output),
        Commands::Luhn { digits } => {
            let valid = luhn::is_valid_luhn(&digits);
            Report::new().field("passes_luhn", valid).print(output);
            Ok(exit_for(valid))
        }
        Commands::Generate {
            card_type,
            count,
            formatted,
        } => {
            let card = lookup(registry, &card_type)?;
            cmd_generate(&card, count, formatted)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_detect(registry: &CardTypeRegistry, digits: &str, output: OutputFormat) -> ExitCode {
    let cards = detect::detect_card_type_with(registry, digits);

    match output {
        OutputFormat::Text => {
            if cards.is_empty() {
                println!("No matching card type");
            }
            for card in &cards {
                println!("{} ({})", card.nice_type, card.card_type);
            }
        }
        OutputFormat::Json => {
            let cards: Vec<Value> = cards.iter().map(card_json).collect();
            println!("{}", Value::Array(cards));
        }
    }

    exit_for(!cards.is_empty())
}

fn cmd_number(
    registry: &CardTypeRegistry,
    card_number: &str,
    options: &validate::CardNumberOptions,
    output: OutputFormat,
) -> ExitCode {
    let result = validate::validate_card_number_with(registry, card_number, options);
    let valid = result.is_valid;

    let mut report = Report::verification(result.clone());
    report = match &result.card {
        Some(card) => report
            .field("brand", card.nice_type.clone())
            .field("type", card.card_type.clone())
            .field(
                "formatted",
                format::add_gaps_to_card_number(card_number, Some(card)),
            ),
        None => report.field("brand", Value::Null),
    };
    report.print(output);

    exit_for(valid)
}

fn cmd_format(
    registry: &CardTypeRegistry,
    value: &str,
    pattern: Option<String>,
    card_type: Option<String>,
    caret: Option<usize>,
    delete: Option<DeleteArg>,
    output: OutputFormat,
) -> Result<ExitCode, String> {
    let pattern = match (pattern, card_type) {
        (Some(pattern), _) => pattern,
        (None, Some(key)) => format::card_number_pattern(Some(&lookup(registry, &key)?)),
        (None, None) => {
            let digits = format::strip_formatting(value);
            let detected = detect::detect_card_type_with(registry, &digits);
            format::card_number_pattern(detected.first())
        }
    };
    let formatter = Formatter::new(&pattern).map_err(|e| e.to_string())?;

    let caret = caret.unwrap_or_else(|| value.chars().count());
    let raw = match delete {
        Some(key) => formatter.simulate_deletion(key.into(), value, Selection::caret(caret)),
        None => card_input::Formatted {
            value: value.to_string(),
            selection: Selection::caret(caret),
        },
    };
    let formatted = formatter.format(&raw.value, raw.selection);

    Report::new()
        .field("pattern", pattern)
        .field("formatted", formatted.value)
        .field("selection_start", formatted.selection.start)
        .field("selection_end", formatted.selection.end)
        .print(output);

    Ok(ExitCode::SUCCESS)
}

fn cmd_generate(card: &CardTypeDefinition, count: usize, formatted: bool) -> Result<(), String> {
    for _ in 0..count {
        let number = generate::generate_random_card_number(card)
            .ok_or_else(|| format!("cannot generate numbers for \"{}\"", card.card_type))?;
        if formatted {
            println!("{}", format::add_gaps_to_card_number(&number, Some(card)));
        } else {
            println!("{}", number);
        }
    }
    Ok(())
}
