//! Globally unique identifiers used throughout Equilib.
//!
//! All entity IDs are UUIDv7 newtypes for time-ordered lexicographic
//! sorting. Currency codes are a normalized string newtype: the code is
//! trimmed and uppercased at every construction point (including
//! deserialization), so case-insensitive comparison falls out of plain
//! equality.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// Unique identifier for an account in the user-management system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

impl AccountId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// TraderId
// ---------------------------------------------------------------------------

/// Unique identifier for the human trader driving a settlement workflow.
///
/// Always threaded explicitly into workflow and store calls — never read
/// from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TraderId(pub Uuid);

impl TraderId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TraderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TraderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// CounterpartyId
// ---------------------------------------------------------------------------

/// Unique identifier for a settlement counterparty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CounterpartyId(pub Uuid);

impl CounterpartyId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for CounterpartyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CounterpartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ProposalId
// ---------------------------------------------------------------------------

/// Globally unique proposal identifier. Uses UUIDv7 for time-ordered sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ProposalId(pub Uuid);

impl ProposalId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Extract the embedded timestamp (milliseconds since UNIX epoch) from UUIDv7.
    #[must_use]
    pub fn timestamp_ms(&self) -> u64 {
        let bytes = self.0.as_bytes();
        u64::from_be_bytes([
            0, 0, bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5],
        ])
    }
}

impl Default for ProposalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// TransactionId
// ---------------------------------------------------------------------------

/// Unique identifier for a settlement transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TransactionId(pub Uuid);

impl TransactionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ReceiptId
// ---------------------------------------------------------------------------

/// Unique identifier for an uploaded settlement receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ReceiptId(pub Uuid);

impl ReceiptId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ReceiptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rcpt:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// A currency code (e.g., "TOMAN", "USDT").
///
/// The set of currencies is discovered at runtime from observed balances,
/// never a compile-time enum: a new currency appearing in the data requires
/// no code change. Codes are normalized to trimmed uppercase on
/// construction, so `Currency::new("toman") == Currency::new("TOMAN")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize)]
pub struct Currency(String);

impl Currency {
    #[must_use]
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Manual impl so codes arriving over the wire are normalized too.
impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proposal_id_uniqueness() {
        let a = ProposalId::new();
        let b = ProposalId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn proposal_id_ordering() {
        let a = ProposalId::new();
        let b = ProposalId::new();
        assert!(a < b);
    }

    #[test]
    #[allow(clippy::cast_possible_truncation)]
    fn proposal_id_timestamp_extraction() {
        let before = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        let id = ProposalId::new();
        let after = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        let ts = id.timestamp_ms();
        assert!(
            ts >= before && ts <= after,
            "ts={ts}, before={before}, after={after}"
        );
    }

    #[test]
    fn currency_normalizes_case_and_whitespace() {
        assert_eq!(Currency::new("toman"), Currency::new("TOMAN"));
        assert_eq!(Currency::new(" usdt "), Currency::new("USDT"));
        assert_eq!(Currency::new("UsDt").as_str(), "USDT");
    }

    #[test]
    fn currency_deserialize_normalizes() {
        let c: Currency = serde_json::from_str("\"toman\"").unwrap();
        assert_eq!(c, Currency::new("TOMAN"));
    }

    #[test]
    fn currency_serialize_is_plain_string() {
        let json = serde_json::to_string(&Currency::new("usdt")).unwrap();
        assert_eq!(json, "\"USDT\"");
    }

    #[test]
    fn serde_roundtrips() {
        let pid = ProposalId::new();
        let json = serde_json::to_string(&pid).unwrap();
        let back: ProposalId = serde_json::from_str(&json).unwrap();
        assert_eq!(pid, back);

        let tid = TraderId::new();
        let json = serde_json::to_string(&tid).unwrap();
        let back: TraderId = serde_json::from_str(&json).unwrap();
        assert_eq!(tid, back);
    }

    #[test]
    fn transaction_id_display_prefix() {
        let id = TransactionId::new();
        assert!(format!("{id}").starts_with("tx:"));
    }
}
