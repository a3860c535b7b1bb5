use chrono::NaiveDate;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

/// Kind of investment transaction
///
/// `Unknown` is a defensive default: the parser rejects unrecognized
/// categories before construction, so it only appears on transactions
/// built by hand, and the renderer refuses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Buy,
    Sell,
    Dividend,
    Unknown,
}

impl TransactionKind {
    /// Look up a category string from the input, case-insensitively.
    /// Never yields `Unknown`; an unrecognized category is `None`.
    pub fn from_category(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "BUY" => Some(Self::Buy),
            "SELL" => Some(Self::Sell),
            "DIVIDEND" => Some(Self::Dividend),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Dividend => "DIVIDEND",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// One parsed statement row, immutable after construction
#[derive(Debug, Clone)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub security: String,
    pub quantity: String,
    pub unique_id: String,
}

impl Transaction {
    /// Create a transaction, deriving its unique id from the content hash
    pub fn new(
        kind: TransactionKind,
        date: NaiveDate,
        description: String,
        amount: Decimal,
        security: String,
        quantity: String,
    ) -> Self {
        let unique_id = derive_unique_id(kind, date, amount, &security, &quantity);
        Self {
            kind,
            date,
            description,
            amount,
            security,
            quantity,
            unique_id,
        }
    }

    /// Replace the derived id with an explicitly supplied one
    pub fn with_unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = unique_id.into();
        self
    }
}

/// SHA-256 over a fixed field order, hex-encoded.
/// Description is deliberately excluded, so two rows differing only in
/// description share an id; field-identical rows always collide.
fn derive_unique_id(
    kind: TransactionKind,
    date: NaiveDate,
    amount: Decimal,
    security: &str,
    quantity: &str,
) -> String {
    let date_part = date.format("%Y%m%d").to_string();
    let amount_part = amount.to_string();

    let mut hasher = Sha256::new();
    for part in [
        kind.as_str(),
        date_part.as_str(),
        amount_part.as_str(),
        security,
        quantity,
    ] {
        hasher.update(part.as_bytes());
        hasher.update(b"|");
    }
    hex::encode(hasher.finalize())
}
