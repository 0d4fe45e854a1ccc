//! Canonicalizer: turns a grammar's candidate into a `TransactionRecord`.
//!
//! Pure functions only. Every record's date passes through exactly one
//! parse/format round trip here, amounts lose their sign and any locale
//! artifacts, and the type collapses to CREDIT or DEBIT.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::str::FromStr;

use crate::candidate::{Candidate, Polarity};
use crate::error::IngestError;
use crate::record::{TransactionRecord, TransactionType};

/// Display format for every ledger date (dd-mm-yyyy).
pub const CANONICAL_DATE_FORMAT: &str = "%d-%m-%Y";

const CURRENCY_MARKERS: [&str; 4] = ["Rs.", "INR", "₹", "$"];

/// Fewest decimal places a ledger amount is written with.
pub const MIN_AMOUNT_SCALE: i64 = 2;

/// Pad `amount` to at least two decimal places; finer issuer precision is kept.
pub fn ledger_scale(amount: BigDecimal) -> BigDecimal {
    let (_, scale) = amount.as_bigint_and_exponent();
    if scale < MIN_AMOUNT_SCALE {
        amount.with_scale(MIN_AMOUNT_SCALE)
    } else {
        amount
    }
}

/// Parse `raw` with the grammar's `format`.
pub fn canonicalize_date(raw: &str, format: &'static str) -> Result<NaiveDate, IngestError> {
    NaiveDate::parse_from_str(raw.trim(), format).map_err(|_| IngestError::InvalidDate {
        value: raw.to_string(),
        format,
    })
}

/// Parse a signed amount, dropping thousands separators, currency glyphs and whitespace.
pub fn parse_amount(raw: &str) -> Result<BigDecimal, IngestError> {
    let mut cleaned = raw.replace(',', "");
    for marker in CURRENCY_MARKERS {
        cleaned = cleaned.replace(marker, "");
    }
    cleaned.retain(|c| !c.is_whitespace());

    BigDecimal::from_str(&cleaned).map_err(|_| IngestError::InvalidAmount {
        value: raw.to_string(),
    })
}

/// Canonicalize one candidate for `source_name`.
pub fn canonicalize(candidate: Candidate, source_name: &str) -> Result<TransactionRecord, IngestError> {
    let date = canonicalize_date(&candidate.date, candidate.date_format)?;
    let signed = parse_amount(&candidate.amount)?;

    let transaction_type = match candidate.polarity {
        Polarity::Typed(t) => t,
        Polarity::Label(label) => label.trim().to_uppercase().parse()?,
        Polarity::Signed => TransactionType::from_signed(&signed),
    };

    Ok(TransactionRecord {
        date,
        description: candidate.description,
        amount: ledger_scale(signed.abs()),
        transaction_type,
        source_name: source_name.to_string(),
    })
}
