//! Concurrent access tests for the statement service.
//!
//! These tests verify that:
//! - Racing debits on one user cannot jointly overdraw the account
//! - Concurrent appends lose no operations
//! - Opposite-direction transfers conserve the combined balance and do not
//!   deadlock

use std::sync::Arc;

use futures::future::join_all;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::Barrier;

use finledger_core::statement::{StatementError, StatementService};
use finledger_store::{MemoryStatementStore, MemoryUserDirectory};

type Service = StatementService<MemoryUserDirectory, MemoryStatementStore>;

fn setup() -> (Arc<MemoryUserDirectory>, Arc<Service>) {
    let directory = Arc::new(MemoryUserDirectory::new());
    let store = Arc::new(MemoryStatementStore::new());
    let service = Arc::new(StatementService::new(Arc::clone(&directory), store));
    (directory, service)
}

#[tokio::test]
async fn test_racing_withdrawals_cannot_jointly_overdraw() {
    let (directory, service) = setup();
    let user = directory.create("racer", "racer@mail.com", "123").unwrap();

    service
        .deposit(user.id, dec!(1000), "seed".to_string())
        .await
        .unwrap();

    // Two withdrawals that individually fit but jointly exceed the balance.
    let barrier = Arc::new(Barrier::new(2));
    let tasks = (0..2).map(|_| {
        let service = Arc::clone(&service);
        let barrier = Arc::clone(&barrier);
        let user_id = user.id;
        tokio::spawn(async move {
            barrier.wait().await;
            service.withdraw(user_id, dec!(600), "race".to_string()).await
        })
    });

    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one withdrawal may pass the check");
    assert!(results.iter().any(|r| matches!(
        r,
        Err(StatementError::InsufficientFunds { .. })
    )));

    let report = service.balance(user.id).await.unwrap();
    assert_eq!(report.balance, dec!(400));
    // Deposit plus the single successful withdrawal.
    assert_eq!(report.statement.len(), 2);
}

#[tokio::test]
async fn test_concurrent_deposits_lose_nothing() {
    let (directory, service) = setup();
    let user = directory.create("saver", "saver@mail.com", "123").unwrap();

    let tasks = (0..50).map(|_| {
        let service = Arc::clone(&service);
        let user_id = user.id;
        tokio::spawn(async move { service.deposit(user_id, dec!(10), "drip".to_string()).await })
    });

    for joined in join_all(tasks).await {
        joined.expect("task panicked").expect("deposit failed");
    }

    let report = service.balance(user.id).await.unwrap();
    assert_eq!(report.balance, dec!(500));
    assert_eq!(report.statement.len(), 50);
}

#[tokio::test]
async fn test_withdrawal_racing_transfer_cannot_overdraw() {
    let (directory, service) = setup();
    let payer = directory.create("payer", "payer@mail.com", "123").unwrap();
    let receiver = directory.create("receiver", "receiver@mail.com", "123").unwrap();

    service
        .deposit(payer.id, dec!(1000), "seed".to_string())
        .await
        .unwrap();

    let barrier = Arc::new(Barrier::new(2));

    let withdraw = {
        let service = Arc::clone(&service);
        let barrier = Arc::clone(&barrier);
        let payer_id = payer.id;
        tokio::spawn(async move {
            barrier.wait().await;
            service
                .withdraw(payer_id, dec!(600), "race".to_string())
                .await
                .map(|_| ())
        })
    };
    let transfer = {
        let service = Arc::clone(&service);
        let barrier = Arc::clone(&barrier);
        let (payer_id, receiver_id) = (payer.id, receiver.id);
        tokio::spawn(async move {
            barrier.wait().await;
            service
                .transfer(payer_id, receiver_id, dec!(600), "race".to_string())
                .await
                .map(|_| ())
        })
    };

    let results = [
        withdraw.await.expect("task panicked"),
        transfer.await.expect("task panicked"),
    ];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "the payer's lock admits only one debit");

    let payer_balance = service.balance(payer.id).await.unwrap().balance;
    let receiver_balance = service.balance(receiver.id).await.unwrap().balance;
    assert_eq!(payer_balance, dec!(400));
    assert!(receiver_balance == dec!(0) || receiver_balance == dec!(600));
    assert!(payer_balance >= Decimal::ZERO);
}

#[tokio::test]
async fn test_opposite_direction_transfers_conserve_total() {
    let (directory, service) = setup();
    let alice = directory.create("alice", "alice@mail.com", "123").unwrap();
    let bob = directory.create("bob", "bob@mail.com", "123").unwrap();

    service
        .deposit(alice.id, dec!(500), "seed".to_string())
        .await
        .unwrap();
    service
        .deposit(bob.id, dec!(500), "seed".to_string())
        .await
        .unwrap();

    // Ten transfers each way, all racing. Each mutation takes only its own
    // sender's lock, so opposite directions cannot deadlock.
    let tasks: Vec<_> = (0..10)
        .flat_map(|_| {
            let a_to_b = {
                let service = Arc::clone(&service);
                let (from, to) = (alice.id, bob.id);
                tokio::spawn(async move {
                    service.transfer(from, to, dec!(50), "ping".to_string()).await
                })
            };
            let b_to_a = {
                let service = Arc::clone(&service);
                let (from, to) = (bob.id, alice.id);
                tokio::spawn(async move {
                    service.transfer(from, to, dec!(50), "pong".to_string()).await
                })
            };
            [a_to_b, b_to_a]
        })
        .collect();

    for joined in join_all(tasks).await {
        // Individual transfers may be refused if a burst drains one side;
        // the invariant under test is conservation, not success.
        let _ = joined.expect("task panicked");
    }

    let alice_balance = service.balance(alice.id).await.unwrap().balance;
    let bob_balance = service.balance(bob.id).await.unwrap().balance;
    assert_eq!(alice_balance + bob_balance, dec!(1000));
    assert!(alice_balance >= Decimal::ZERO);
    assert!(bob_balance >= Decimal::ZERO);
}
