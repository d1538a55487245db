use std::fmt;

/// Money is represented as integer paisa to avoid floating-point precision issues.
/// 1 rupee = 100 paisa, so Rs. 250.00 = 25000 paisa.
pub type Paisa = i64;

pub const PAISA_PER_RUPEE: i64 = 100;

/// Convert a whole-rupee amount into paisa.
/// Example: rupees(25_000) -> 2_500_000
pub const fn rupees(amount: i64) -> Paisa {
    amount * PAISA_PER_RUPEE
}

/// Format paisa as a human-readable rupee string with thousands separators.
/// Whole-rupee amounts omit the decimal part.
/// Example: 2_500_000 -> "Rs. 25,000", 123_450 -> "Rs. 1,234.50"
pub fn format_rupees(amount: Paisa) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs_amount = amount.abs();
    let units = abs_amount / PAISA_PER_RUPEE;
    let remainder = abs_amount % PAISA_PER_RUPEE;
    if remainder == 0 {
        format!("{}Rs. {}", sign, group_thousands(units))
    } else {
        format!("{}Rs. {}.{:02}", sign, group_thousands(units), remainder)
    }
}

/// Insert comma separators every three digits, from the right.
fn group_thousands(units: i64) -> String {
    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Parse a rupee string into paisa. Accepts an optional "Rs." prefix,
/// comma separators, and up to two decimal places.
/// Example: "5,000" -> 500_000, "Rs. 1,200" -> 120_000, "12.5" -> 1250
pub fn parse_rupees(input: &str) -> Result<Paisa, ParseAmountError> {
    let input = input.trim();
    let negative = input.starts_with('-');
    let input = input.trim_start_matches('-').trim_start();
    let input = input
        .strip_prefix("Rs.")
        .or_else(|| input.strip_prefix("Rs"))
        .unwrap_or(input)
        .trim_start();
    let input = input.replace(',', "");

    if input.is_empty() {
        return Err(ParseAmountError::InvalidFormat);
    }

    let parts: Vec<&str> = input.split('.').collect();
    match parts.len() {
        1 => {
            // No decimal point, treat as whole rupees
            let units: i64 = parts[0]
                .parse()
                .map_err(|_| ParseAmountError::InvalidFormat)?;
            let paisa = units * PAISA_PER_RUPEE;
            Ok(if negative { -paisa } else { paisa })
        }
        2 => {
            let units: i64 = if parts[0].is_empty() {
                0
            } else {
                parts[0]
                    .parse()
                    .map_err(|_| ParseAmountError::InvalidFormat)?
            };

            // Handle decimal part - pad or truncate to 2 digits
            let decimal_str = parts[1];
            let decimal_paisa: i64 = match decimal_str.len() {
                0 => 0,
                1 => {
                    // Single digit like "5" means 50 paisa
                    decimal_str
                        .parse::<i64>()
                        .map_err(|_| ParseAmountError::InvalidFormat)?
                        * 10
                }
                2 => decimal_str
                    .parse()
                    .map_err(|_| ParseAmountError::InvalidFormat)?,
                _ => {
                    // More than 2 decimal places - truncate
                    decimal_str[..2]
                        .parse()
                        .map_err(|_| ParseAmountError::InvalidFormat)?
                }
            };

            let paisa = units * PAISA_PER_RUPEE + decimal_paisa;
            Ok(if negative { -paisa } else { paisa })
        }
        _ => Err(ParseAmountError::InvalidFormat),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid amount format"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
