use rusty_money::FormattableCurrency;
use serde::{Deserialize, Serialize};

crate::entity_id! { EntryId }
crate::entity_id! { LineId }
crate::entity_id! { TenantId }
crate::entity_id! { DocumentId }
crate::entity_id! { AccountableId }

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "DebitOrCredit", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DebitOrCredit {
    Debit,
    Credit,
}

impl Default for DebitOrCredit {
    fn default() -> Self {
        Self::Credit
    }
}

/// An ISO-4217 or crypto currency, resolved against the static tables.
#[derive(Debug, Clone, Copy)]
pub enum Currency {
    Iso(&'static rusty_money::iso::Currency),
    Crypto(&'static rusty_money::crypto::Currency),
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Iso(c) => c.code(),
            Currency::Crypto(c) => c.code(),
        }
    }

    pub fn exponent(&self) -> u32 {
        match self {
            Currency::Iso(c) => c.exponent(),
            Currency::Crypto(c) => c.exponent(),
        }
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for Currency {}

impl std::hash::Hash for Currency {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl PartialOrd for Currency {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Currency {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.code().cmp(other.code())
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ParseCurrencyError {
    #[error("Unknown currency '{0}'")]
    Unknown(String),
}

impl std::str::FromStr for Currency {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        rusty_money::iso::find(s)
            .map(Currency::Iso)
            .or_else(|| rusty_money::crypto::find(s).map(Currency::Crypto))
            .ok_or_else(|| ParseCurrencyError::Unknown(s.to_string()))
    }
}

impl Serialize for Currency {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

/// Reference to the external model instance that owns a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantRef {
    pub kind: String,
    pub id: TenantId,
}

impl TenantRef {
    pub fn new(kind: impl Into<String>, id: impl Into<TenantId>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

/// Reference to the external source document an entry is posted for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    pub kind: String,
    pub id: DocumentId,
}

impl DocumentRef {
    pub fn new(kind: impl Into<String>, id: impl Into<DocumentId>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

/// Reference to the external entity a balance leg is tracked against.
/// Absent on legs of non-accountable accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountableRef {
    pub kind: String,
    pub id: AccountableId,
}

impl AccountableRef {
    pub fn new(kind: impl Into<String>, id: impl Into<AccountableId>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_resolves_iso_and_crypto_codes() {
        let usd: Currency = "USD".parse().unwrap();
        assert_eq!(usd.code(), "USD");
        assert_eq!(usd.exponent(), 2);

        let btc: Currency = "BTC".parse().unwrap();
        assert_eq!(btc.code(), "BTC");

        assert!("XXQ".parse::<Currency>().is_err());
    }

    #[test]
    fn currency_equality_is_by_code() {
        let a: Currency = "EUR".parse().unwrap();
        let b: Currency = "EUR".parse().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, "USD".parse::<Currency>().unwrap());
    }
}
