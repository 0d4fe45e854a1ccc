//! Canonical transaction record written to every ledger table.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::canonical::{ledger_scale, CANONICAL_DATE_FORMAT};
use crate::error::IngestError;

/// Column order shared by the per-source tables and the unified ledger.
pub const LEDGER_COLUMNS: [&str; 5] = [
    "date",
    "description",
    "amount",
    "transaction_type",
    "source_name",
];

/// Direction of money movement as seen from the account holder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    #[serde(rename = "CREDIT")]
    Credit,
    #[serde(rename = "DEBIT")]
    Debit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "CREDIT",
            TransactionType::Debit => "DEBIT",
        }
    }

    /// Sign convention used by exports that carry a single signed amount column:
    /// charges are non-negative, refunds and repayments are negative.
    pub fn from_signed(amount: &BigDecimal) -> Self {
        if *amount < BigDecimal::from(0) {
            TransactionType::Credit
        } else {
            TransactionType::Debit
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREDIT" => Ok(TransactionType::Credit),
            "DEBIT" => Ok(TransactionType::Debit),
            other => Err(IngestError::UnknownTransactionType {
                value: other.to_string(),
            }),
        }
    }
}

/// A transaction after date, amount and type normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    /// Rendered as dd-mm-yyyy
    #[serde(with = "display_date")]
    pub date: NaiveDate,
    pub description: String,
    /// Non-negative magnitude at the issuer's precision, never fewer than two
    /// decimals; direction lives in `transaction_type`
    #[serde(with = "ledger_amount")]
    pub amount: BigDecimal,
    pub transaction_type: TransactionType,
    /// Institution directory the record was read from
    pub source_name: String,
}

impl TransactionRecord {
    /// Date in the ledger display format.
    pub fn display_date(&self) -> String {
        self.date.format(CANONICAL_DATE_FORMAT).to_string()
    }

    /// Amount as written to the ledger tables.
    pub fn display_amount(&self) -> String {
        ledger_scale(self.amount.clone()).to_string()
    }

    pub fn is_credit(&self) -> bool {
        self.transaction_type == TransactionType::Credit
    }
}

mod display_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::canonical::CANONICAL_DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&date.format(CANONICAL_DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDate::parse_from_str(&raw, CANONICAL_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

mod ledger_amount {
    use bigdecimal::BigDecimal;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::canonical::ledger_scale;

    pub fn serialize<S: Serializer>(amount: &BigDecimal, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ledger_scale(amount.clone()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BigDecimal, D::Error> {
        let raw = String::deserialize(d)?;
        raw.trim()
            .parse()
            .map(ledger_scale)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransactionRecord {
        TransactionRecord {
            date: NaiveDate::from_ymd_opt(2023, 3, 12).unwrap(),
            description: "COFFEE SHOP".to_string(),
            amount: "450".parse().unwrap(),
            transaction_type: TransactionType::Credit,
            source_name: "idfc_wow".to_string(),
        }
    }

    #[test]
    fn test_type_round_trips_through_label() {
        assert_eq!("CREDIT".parse::<TransactionType>().unwrap(), TransactionType::Credit);
        assert_eq!("DEBIT".parse::<TransactionType>().unwrap(), TransactionType::Debit);
        assert!("Debit".parse::<TransactionType>().is_err());
        assert!("".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_signed_convention() {
        let signed = |s: &str| TransactionType::from_signed(&s.parse().unwrap());
        assert_eq!(signed("10.00"), TransactionType::Debit);
        assert_eq!(signed("0"), TransactionType::Debit);
        assert_eq!(signed("-0.00"), TransactionType::Debit);
        assert_eq!(signed("-0.01"), TransactionType::Credit);
    }

    #[test]
    fn test_serializes_display_formats() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["date"], "12-03-2023");
        assert_eq!(json["amount"], "450.00");
        assert_eq!(json["transaction_type"], "CREDIT");
        assert_eq!(json["source_name"], "idfc_wow");
    }

    #[test]
    fn test_display_helpers() {
        let rec = sample();
        assert_eq!(rec.display_date(), "12-03-2023");
        assert_eq!(rec.display_amount(), "450.00");
        assert!(rec.is_credit());
    }

    #[test]
    fn test_amount_keeps_issuer_precision() {
        let mut rec = sample();
        rec.amount = "12.345".parse().unwrap();
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"amount\":\"12.345\""), "{json}");

        let back: TransactionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.display_amount(), "12.345");
        assert_eq!(back, rec);
    }
}
