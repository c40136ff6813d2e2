//! Expiration date validation.
//!
//! Month, year and combined date validators, each reporting the tri-state
//! outcome for input that may still be incomplete. "Today" is read from the
//! system clock (UTC); every validator has an `_at` variant that takes it
//! explicitly.
//!
//! # Accepted date forms
//!
//! - `MM/YY`, `MM/YYYY`, with optional spaces around the slash
//! - `MM YY`, `MM YYYY`
//! - `YYYY-MM`, `YYYY-M`
//! - `MMYY`, `MYY`, `MMYYYY`, `MYYYY` (month width inferred from the digits)
//!
//! # Example
//!
//! ```
//! use card_input::expiry::{validate_expiration_date_at, YearMonth};
//!
//! let today = YearMonth::new(2026, 6).unwrap();
//!
//! let result = validate_expiration_date_at("10/30", None, today);
//! assert!(result.is_valid);
//! assert_eq!(result.month.as_deref(), Some("10"));
//! assert_eq!(result.year.as_deref(), Some("30"));
//!
//! // Still typing.
//! let result = validate_expiration_date_at("1", None, today);
//! assert!(!result.is_valid);
//! assert!(result.is_potentially_valid);
//! ```

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::verification::Verification;

/// How many years past the current one an expiration year may lie.
pub const DEFAULT_MAX_ELAPSED_YEAR: u32 = 19;

/// A calendar month, used as "today" by the validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    /// Four-digit year.
    pub year: u32,
    /// Month (1-12).
    pub month: u32,
}

impl YearMonth {
    /// Creates a year-month; `None` if the month is not 1-12.
    pub fn new(year: u32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// The current UTC year and month.
    pub fn current() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let (year, month) = civil_from_days((secs / 86_400) as i64);
        Self {
            year: year.max(0) as u32,
            month,
        }
    }

    /// First two digits of the year, e.g. `"20"` for 2026.
    fn century_prefix(&self) -> String {
        self.year.to_string().chars().take(2).collect()
    }

    /// Last two digits of the year, e.g. `26` for 2026.
    fn two_digit_year(&self) -> u32 {
        self.year % 100
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Converts days since 1970-01-01 into a (year, month) pair.
fn civil_from_days(days: i64) -> (i64, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month as u32)
}

/// Outcome of [`validate_expiration_month`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthVerification {
    /// The month is 1-12.
    pub is_valid: bool,
    /// The month is valid or could become so.
    pub is_potentially_valid: bool,
    /// The month is valid and not earlier than the current month.
    pub is_valid_for_this_year: bool,
}

/// Outcome of [`validate_expiration_year`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YearVerification {
    /// The year lies within the accepted window.
    pub is_valid: bool,
    /// The year is valid or could become so.
    pub is_potentially_valid: bool,
    /// The year is the current year.
    pub is_current_year: bool,
}

/// Outcome of [`validate_expiration_date`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateVerification {
    /// The date is complete and not expired.
    pub is_valid: bool,
    /// The date is valid or could become so.
    pub is_potentially_valid: bool,
    /// The month as typed, once the month is valid.
    pub month: Option<String>,
    /// The year as typed, once the month is valid.
    pub year: Option<String>,
}

macro_rules! impl_into_verification {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Verification {
                fn from(result: $ty) -> Self {
                    Verification::new(result.is_valid, result.is_potentially_valid)
                }
            }
        )*
    };
}

impl_into_verification!(MonthVerification, YearVerification, DateVerification);

/// Month and year halves of an expiration date string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedDate {
    /// Month part, possibly empty.
    pub month: String,
    /// Year part, possibly empty.
    pub year: String,
}

/// Input to [`validate_expiration_date`]: either free text or separate parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpirationDateInput {
    /// A combined string such as `"10/30"`.
    Text(String),
    /// Month and year already split apart.
    Parts {
        /// Month text.
        month: String,
        /// Year text.
        year: String,
    },
}

impl ExpirationDateInput {
    /// Builds a `Parts` input from anything printable, e.g. integers.
    pub fn parts(month: impl fmt::Display, year: impl fmt::Display) -> Self {
        Self::Parts {
            month: month.to_string(),
            year: year.to_string(),
        }
    }
}

impl From<&str> for ExpirationDateInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ExpirationDateInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

fn is_blank(value: &str) -> bool {
    value.chars().all(char::is_whitespace)
}

fn is_digits(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a digit string, saturating values too large for `u32`.
fn parse_number(value: &str) -> u32 {
    value
        .bytes()
        .fold(0u32, |acc, b| acc.saturating_mul(10).saturating_add((b - b'0') as u32))
}

/// Validates an expiration month against the current date.
#[inline]
pub fn validate_expiration_month(value: &str) -> MonthVerification {
    validate_expiration_month_at(value, YearMonth::current())
}

/// Validates an expiration month.
///
/// A blank value or a lone `"0"` is incomplete; otherwise the value must be
/// digits forming a number from 1 to 12.
pub fn validate_expiration_month_at(value: &str, today: YearMonth) -> MonthVerification {
    if is_blank(value) || value == "0" {
        return MonthVerification {
            is_potentially_valid: true,
            ..Default::default()
        };
    }

    if !is_digits(value) {
        return MonthVerification::default();
    }

    let month = parse_number(value);
    let is_valid = (1..=12).contains(&month);

    MonthVerification {
        is_valid,
        is_potentially_valid: is_valid,
        is_valid_for_this_year: is_valid && month >= today.month,
    }
}

/// Validates an expiration year against the current date.
///
/// `max_elapsed_year` defaults to [`DEFAULT_MAX_ELAPSED_YEAR`].
#[inline]
pub fn validate_expiration_year(value: &str, max_elapsed_year: Option<u32>) -> YearVerification {
    validate_expiration_year_at(value, max_elapsed_year, YearMonth::current())
}

/// Validates a two or four digit expiration year.
///
/// The year must fall between the current year and `max_elapsed_year` years
/// later. A two digit value equal to the current century (`"20"`) is treated
/// as the start of a four digit year, as is any three digit value starting
/// with it.
pub fn validate_expiration_year_at(
    value: &str,
    max_elapsed_year: Option<u32>,
    today: YearMonth,
) -> YearVerification {
    let max_elapsed_year = max_elapsed_year.unwrap_or(DEFAULT_MAX_ELAPSED_YEAR);
    let incomplete = YearVerification {
        is_potentially_valid: true,
        ..Default::default()
    };

    if is_blank(value) {
        return incomplete;
    }
    if !is_digits(value) {
        return YearVerification::default();
    }

    let century = today.century_prefix();
    let (is_valid, is_current_year) = match value.len() {
        0 | 1 => return incomplete,
        3 if value[..2] == century => return incomplete,
        2 if value == century => return incomplete,
        2 => {
            let year = parse_number(value);
            let current = today.two_digit_year();
            (
                year >= current && year <= current.saturating_add(max_elapsed_year),
                year == current,
            )
        }
        4 => {
            let year = parse_number(value);
            (
                year >= today.year && year <= today.year.saturating_add(max_elapsed_year),
                year == today.year,
            )
        }
        _ => return YearVerification::default(),
    };

    YearVerification {
        is_valid,
        is_potentially_valid: is_valid,
        is_current_year,
    }
}

/// Splits an expiration date string into month and year using the current
/// date to resolve ambiguous digit runs.
#[inline]
pub fn parse_date(value: &str) -> ParsedDate {
    parse_date_at(value, YearMonth::current())
}

/// Splits an expiration date string into month and year.
///
/// - `YYYY-M` / `YYYY-MM`: year first, month second
/// - anything with `/`: split on the slash, ignoring surrounding whitespace
/// - anything with whitespace: split on runs of spaces
/// - bare digits: the month is one or two digits depending on what follows
///
/// When splitting yields more than two pieces, the extra pieces are joined
/// into the year with commas, which no year validator accepts.
pub fn parse_date_at(value: &str, today: YearMonth) -> ParsedDate {
    let parts = if is_year_dash_month(value) {
        let mut parts: Vec<String> = value.split('-').map(str::to_string).collect();
        parts.reverse();
        Some(parts)
    } else if value.contains('/') {
        Some(split_on_slash(value))
    } else if value.chars().any(char::is_whitespace) {
        Some(split_on_spaces(value))
    } else {
        None
    };

    if let Some(parts) = parts {
        return ParsedDate {
            month: parts.first().cloned().unwrap_or_default(),
            year: parts.get(1..).unwrap_or_default().join(","),
        };
    }

    let month_digits = month_digit_count(value, today);
    let month: String = value.chars().take(month_digits).collect();
    let year: String = value.chars().skip(month.chars().count()).collect();
    ParsedDate { month, year }
}

/// Matches `^\d{4}-\d{1,2}$`.
fn is_year_dash_month(value: &str) -> bool {
    match value.split_once('-') {
        Some((year, month)) => {
            year.len() == 4
                && is_digits(year)
                && (1..=2).contains(&month.len())
                && is_digits(month)
        }
        None => false,
    }
}

/// Splits on `/`, swallowing whitespace on either side of each slash.
fn split_on_slash(value: &str) -> Vec<String> {
    let chars: Vec<char> = value.chars().collect();
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let mut j = i;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        if j < chars.len() && chars[j] == '/' {
            j += 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            parts.push(std::mem::take(&mut current));
            i = j;
            continue;
        }
        current.push(chars[i]);
        i += 1;
    }

    parts.push(current);
    parts
}

/// Splits on runs of spaces.
fn split_on_spaces(value: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_separator = false;

    for c in value.chars() {
        if c == ' ' {
            if !in_separator {
                parts.push(std::mem::take(&mut current));
                in_separator = true;
            }
        } else {
            current.push(c);
            in_separator = false;
        }
    }

    parts.push(current);
    parts
}

/// Decides whether a separator-less date starts with a one or two digit month.
fn month_digit_count(value: &str, today: YearMonth) -> usize {
    let mut chars = value.chars();
    let first = chars.next().and_then(|c| c.to_digit(10));
    let second = chars.next().and_then(|c| c.to_digit(10));

    match first {
        Some(0) => 2,
        Some(d) if d > 1 => 1,
        Some(_) if matches!(second, Some(d) if d > 2) => 1,
        Some(_) => {
            // "10".."12" or "1" followed by a year: the leading 1 is a month
            // on its own only if what follows can still be a year.
            let assumed_year = &value[1..];
            if validate_expiration_year_at(assumed_year, None, today).is_potentially_valid {
                1
            } else {
                2
            }
        }
        None => match value.chars().count() {
            5 => 1,
            n if n > 5 => 2,
            _ => 1,
        },
    }
}

/// Validates an expiration date against the current date.
///
/// # Example
///
/// ```
/// use card_input::expiry::{validate_expiration_date, ExpirationDateInput};
///
/// assert!(validate_expiration_date("12/2099", Some(100)).is_valid);
/// assert!(validate_expiration_date(ExpirationDateInput::parts(12, 2099), Some(100)).is_valid);
/// assert!(!validate_expiration_date("12/2001", None).is_potentially_valid);
/// ```
#[inline]
pub fn validate_expiration_date(
    value: impl Into<ExpirationDateInput>,
    max_elapsed_year: Option<u32>,
) -> DateVerification {
    validate_expiration_date_at(value, max_elapsed_year, YearMonth::current())
}

/// Validates a combined expiration date.
///
/// The date is valid when the month is valid and either the year is valid
/// and in the future, or the year is the current one and the month has not
/// passed. A date in the current year whose month has passed is invalid.
/// Otherwise the date is potentially valid while both halves are.
pub fn validate_expiration_date_at(
    value: impl Into<ExpirationDateInput>,
    max_elapsed_year: Option<u32>,
    today: YearMonth,
) -> DateVerification {
    let date = match value.into() {
        ExpirationDateInput::Text(text) => parse_date_at(&normalize_spaced_date(&text), today),
        ExpirationDateInput::Parts { month, year } => ParsedDate { month, year },
    };

    let month = validate_expiration_month_at(&date.month, today);
    let year = validate_expiration_year_at(&date.year, max_elapsed_year, today);

    if month.is_valid {
        if year.is_current_year {
            let is_valid = month.is_valid_for_this_year;
            return DateVerification {
                is_valid,
                is_potentially_valid: is_valid,
                month: Some(date.month),
                year: Some(date.year),
            };
        }
        if year.is_valid {
            return DateVerification {
                is_valid: true,
                is_potentially_valid: true,
                month: Some(date.month),
                year: Some(date.year),
            };
        }
    }

    DateVerification {
        is_potentially_valid: month.is_potentially_valid && year.is_potentially_valid,
        ..Default::default()
    }
}

/// Rewrites `"MM YY"` and `"MM YYYY"` as `"MM/YY"` and `"MM/YYYY"`.
fn normalize_spaced_date(value: &str) -> String {
    if let Some((month, year)) = value.split_once(' ') {
        if month.len() == 2
            && is_digits(month)
            && (year.len() == 2 || year.len() == 4)
            && is_digits(year)
        {
            return format!("{}/{}", month, year);
        }
    }
    value.to_string()
}
