mod helpers;

use std::collections::HashMap;

use tally_ledger::execution::{error::ExecutionError, EntryExecutor, ExecutionOutcome};
use tally_ledger::primitives::*;
use tally_ledger::store::MemoryLedgerStore;

async fn post_sale(
    executor: &EntryExecutor<'_, MemoryLedgerStore>,
    tenant: &TenantRef,
    document: &DocumentRef,
    customer: &AccountableRef,
    amount: i64,
    effective: &str,
) -> Result<ExecutionOutcome, ExecutionError> {
    let mut entry = executor.entry(tenant, document.clone(), "sale", effective)?;
    entry.add_movement(
        DebitOrCredit::Debit,
        "cash",
        Some(customer.clone()),
        helpers::usd(amount),
    )?;
    entry.add_movement(DebitOrCredit::Credit, "revenue", None, helpers::usd(amount))?;
    executor.execute(entry).await
}

/// Net minor units per leg over every committed line, zero nets
/// dropped.
fn net_positions(
    store: &MemoryLedgerStore,
) -> HashMap<(String, DebitOrCredit, Option<AccountableRef>, String), i64> {
    let mut net: HashMap<_, i64> = HashMap::new();
    for line in store.lines() {
        *net.entry((
            line.account_name.clone(),
            line.direction,
            line.accountable.clone(),
            line.amount.currency().code().to_string(),
        ))
        .or_default() += line.amount.minor_units();
    }
    net.retain(|_, units| *units != 0);
    net
}

#[tokio::test]
async fn identical_reposting_is_a_noop() -> anyhow::Result<()> {
    let registry = helpers::test_registry();
    let store = helpers::store();
    let executor = EntryExecutor::new(&registry, &store);

    let tenant = helpers::company();
    let document = helpers::invoice();
    let customer = helpers::customer();

    post_sale(&executor, &tenant, &document, &customer, 1_000, "2026-08-01").await?;
    let outcome = post_sale(&executor, &tenant, &document, &customer, 1_000, "2026-08-01").await?;

    assert!(outcome.is_unchanged());
    assert!(outcome.entry().is_none());
    assert_eq!(store.entries().len(), 1);
    assert_eq!(store.lines().len(), 2);

    Ok(())
}

#[tokio::test]
async fn changed_amounts_emit_an_adjustment_entry() -> anyhow::Result<()> {
    let registry = helpers::test_registry();
    let store = helpers::store();
    let executor = EntryExecutor::new(&registry, &store);

    let tenant = helpers::company();
    let document = helpers::invoice();
    let customer = helpers::customer();

    let first = post_sale(&executor, &tenant, &document, &customer, 1_000, "2026-08-01").await?;
    let first_id = first.entry().unwrap().id;

    let outcome = post_sale(&executor, &tenant, &document, &customer, 1_500, "2026-08-05").await?;
    let adjustment = outcome.entry().expect("adjustment was posted");
    assert_ne!(adjustment.id, first_id);
    assert_eq!(adjustment.effective.to_string(), "2026-08-05");

    let lines = outcome.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|l| l.amount.minor_units() == 500));
    assert!(lines
        .iter()
        .any(|l| l.account_name == "cash" && l.direction == DebitOrCredit::Debit));
    assert!(lines
        .iter()
        .any(|l| l.account_name == "revenue" && l.direction == DebitOrCredit::Credit));

    assert_eq!(store.entries().len(), 2);
    assert_eq!(store.lines().len(), 4);

    Ok(())
}

#[tokio::test]
async fn adjustment_dated_before_the_original_is_rejected() -> anyhow::Result<()> {
    let registry = helpers::test_registry();
    let store = helpers::store();
    let executor = EntryExecutor::new(&registry, &store);

    let tenant = helpers::company();
    let document = helpers::invoice();
    let customer = helpers::customer();

    post_sale(&executor, &tenant, &document, &customer, 1_000, "2026-08-01").await?;
    let result = post_sale(&executor, &tenant, &document, &customer, 1_500, "2026-07-20").await;

    assert!(matches!(
        result,
        Err(ExecutionError::NonMonotonicAdjustment { .. })
    ));
    assert_eq!(store.entries().len(), 1);
    assert_eq!(store.lines().len(), 2);

    Ok(())
}

#[tokio::test]
async fn net_position_converges_to_the_latest_posting() -> anyhow::Result<()> {
    let registry = helpers::test_registry();
    let tenant = helpers::company();
    let document = helpers::invoice();
    let customer = helpers::customer();

    // Post A then B on one store; the fees leg disappears in B.
    let reposted = helpers::store();
    {
        let executor = EntryExecutor::new(&registry, &reposted);
        let mut entry = executor.entry(&tenant, document.clone(), "sale_with_fees", "2026-08-01")?;
        entry.add_movement(
            DebitOrCredit::Debit,
            "cash",
            Some(customer.clone()),
            helpers::usd(950),
        )?;
        entry.add_movement(DebitOrCredit::Debit, "fees", None, helpers::usd(50))?;
        entry.add_movement(DebitOrCredit::Credit, "revenue", None, helpers::usd(1_000))?;
        executor.execute(entry).await?;

        let mut entry = executor.entry(&tenant, document.clone(), "sale_with_fees", "2026-08-03")?;
        entry.add_movement(
            DebitOrCredit::Debit,
            "cash",
            Some(customer.clone()),
            helpers::usd(1_200),
        )?;
        entry.add_movement(DebitOrCredit::Credit, "revenue", None, helpers::usd(1_200))?;
        executor.execute(entry).await?;
    }

    // Post B alone on a fresh store.
    let fresh = helpers::store();
    {
        let executor = EntryExecutor::new(&registry, &fresh);
        let mut entry = executor.entry(&tenant, document.clone(), "sale_with_fees", "2026-08-03")?;
        entry.add_movement(
            DebitOrCredit::Debit,
            "cash",
            Some(customer.clone()),
            helpers::usd(1_200),
        )?;
        entry.add_movement(DebitOrCredit::Credit, "revenue", None, helpers::usd(1_200))?;
        executor.execute(entry).await?;
    }

    assert_eq!(net_positions(&reposted), net_positions(&fresh));

    Ok(())
}

#[tokio::test]
async fn prior_lines_are_never_touched() -> anyhow::Result<()> {
    let registry = helpers::test_registry();
    let store = helpers::store();
    let executor = EntryExecutor::new(&registry, &store);

    let tenant = helpers::company();
    let document = helpers::invoice();
    let customer = helpers::customer();

    post_sale(&executor, &tenant, &document, &customer, 1_000, "2026-08-01").await?;
    let before = store.lines();

    post_sale(&executor, &tenant, &document, &customer, 1_500, "2026-08-05").await?;
    let after = store.lines();

    assert_eq!(&after[..before.len()], &before[..]);
    assert_eq!(after.len(), before.len() + 2);

    Ok(())
}

#[tokio::test]
async fn commit_failure_leaves_no_partial_rows() -> anyhow::Result<()> {
    let registry = helpers::test_registry();
    let store = helpers::store();
    let executor = EntryExecutor::new(&registry, &store);

    let tenant = helpers::company();
    let document = helpers::invoice();
    let customer = helpers::customer();

    store.fail_next_commit();
    let result = post_sale(&executor, &tenant, &document, &customer, 1_000, "2026-08-01").await;
    assert!(matches!(result, Err(ExecutionError::Store(_))));
    assert!(store.entries().is_empty());
    assert!(store.lines().is_empty());

    // The same posting goes through once the store recovers.
    post_sale(&executor, &tenant, &document, &customer, 1_000, "2026-08-01").await?;
    assert_eq!(store.entries().len(), 1);

    store.fail_next_commit();
    let result = post_sale(&executor, &tenant, &document, &customer, 1_500, "2026-08-05").await;
    assert!(matches!(result, Err(ExecutionError::Store(_))));
    assert_eq!(store.entries().len(), 1);
    assert_eq!(store.lines().len(), 2);

    post_sale(&executor, &tenant, &document, &customer, 1_500, "2026-08-05").await?;
    assert_eq!(store.entries().len(), 2);

    Ok(())
}

#[tokio::test]
async fn reposting_after_an_adjustment_is_idempotent() -> anyhow::Result<()> {
    let registry = helpers::test_registry();
    let store = helpers::store();
    let executor = EntryExecutor::new(&registry, &store);

    let tenant = helpers::company();
    let document = helpers::invoice();
    let customer = helpers::customer();

    post_sale(&executor, &tenant, &document, &customer, 1_000, "2026-08-01").await?;
    post_sale(&executor, &tenant, &document, &customer, 1_500, "2026-08-05").await?;
    let outcome = post_sale(&executor, &tenant, &document, &customer, 1_500, "2026-08-05").await?;

    assert!(outcome.is_unchanged());
    assert_eq!(store.entries().len(), 2);

    Ok(())
}

#[tokio::test]
async fn a_leg_without_history_is_carried_into_the_adjustment() -> anyhow::Result<()> {
    let registry = helpers::test_registry();
    let store = helpers::store();
    let executor = EntryExecutor::new(&registry, &store);

    let tenant = helpers::company();
    let document = helpers::invoice();
    let customer = helpers::customer();

    let mut entry = executor.entry(&tenant, document.clone(), "sale_with_fees", "2026-08-01")?;
    entry.add_movement(
        DebitOrCredit::Debit,
        "cash",
        Some(customer.clone()),
        helpers::usd(1_000),
    )?;
    entry.add_movement(DebitOrCredit::Credit, "revenue", None, helpers::usd(1_000))?;
    executor.execute(entry).await?;

    // Re-post splitting the debit across cash and a fees leg that never
    // existed historically.
    let mut entry = executor.entry(&tenant, document.clone(), "sale_with_fees", "2026-08-02")?;
    entry.add_movement(
        DebitOrCredit::Debit,
        "cash",
        Some(customer.clone()),
        helpers::usd(950),
    )?;
    entry.add_movement(DebitOrCredit::Debit, "fees", None, helpers::usd(50))?;
    entry.add_movement(DebitOrCredit::Credit, "revenue", None, helpers::usd(1_000))?;
    let outcome = executor.execute(entry).await?;

    let lines = outcome.lines();
    assert_eq!(lines.len(), 2);
    let cash = lines.iter().find(|l| l.account_name == "cash").unwrap();
    assert_eq!(cash.amount.minor_units(), -50);
    let fees = lines.iter().find(|l| l.account_name == "fees").unwrap();
    assert_eq!(fees.amount.minor_units(), 50);

    Ok(())
}
