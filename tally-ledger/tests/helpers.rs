#![allow(dead_code)]

use tally_ledger::{definition::*, primitives::*, store::MemoryLedgerStore, Money};

pub fn test_registry() -> DefinitionRegistry {
    DefinitionRegistry::builder()
        .tenant("company", "USD", |tenant| {
            tenant
                .asset("cash")?
                .income("revenue")?
                .expense("fees")?
                .account_in("btc_vault", AccountType::Asset, "BTC")?
                .equity("btc_reserves")?
                .entry("sale", "invoice", |entry| {
                    entry
                        .debit("cash", Some("customer"))?
                        .credit("revenue", None)
                })?
                .entry("sale_with_fees", "invoice", |entry| {
                    entry
                        .debit("cash", Some("customer"))?
                        .debit("fees", None)?
                        .credit("revenue", None)
                })?
                .entry("fx_sale", "invoice", |entry| {
                    entry
                        .debit("cash", Some("customer"))?
                        .credit("revenue", None)?
                        .debit("btc_vault", None)?
                        .credit("btc_reserves", None)
                })
        })
        .expect("test definitions are valid")
        .build()
        .expect("registry builds")
}

pub fn store() -> MemoryLedgerStore {
    MemoryLedgerStore::new()
}

pub fn company() -> TenantRef {
    TenantRef::new("company", TenantId::new())
}

pub fn invoice() -> DocumentRef {
    DocumentRef::new("invoice", DocumentId::new())
}

pub fn receipt() -> DocumentRef {
    DocumentRef::new("receipt", DocumentId::new())
}

pub fn customer() -> AccountableRef {
    AccountableRef::new("customer", AccountableId::new())
}

pub fn usd(minor_units: i64) -> Money {
    Money::new(minor_units, "USD".parse().unwrap())
}

pub fn btc(minor_units: i64) -> Money {
    Money::new(minor_units, "BTC".parse().unwrap())
}
