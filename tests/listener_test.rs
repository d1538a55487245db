mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use anyhow::Result;
use common::{demo_ledger, ledger_with_rupees, payment};
use paisa::domain::rupees;

#[tokio::test(start_paused = true)]
async fn test_listener_fires_once_per_settlement() -> Result<()> {
    let service = demo_ledger();
    let calls = Arc::new(AtomicUsize::new(0));

    let _subscription = {
        let calls = Arc::clone(&calls);
        service.subscribe(move || {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };

    service.process_transaction(payment(rupees(1_000))).await?;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    service.process_transaction(payment(rupees(1_000))).await?;
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_listener_observes_fully_applied_state() -> Result<()> {
    let service = Arc::new(ledger_with_rupees(10_000));
    let seen_balance = Arc::new(AtomicI64::new(-1));
    let seen_records = Arc::new(AtomicUsize::new(0));

    let _subscription = {
        let observer = Arc::clone(&service);
        let seen_balance = Arc::clone(&seen_balance);
        let seen_records = Arc::clone(&seen_records);
        service.subscribe(move || {
            seen_balance.store(observer.get_balance(), Ordering::SeqCst);
            seen_records.store(observer.get_history().len(), Ordering::SeqCst);
        })
    };

    service.process_transaction(payment(rupees(4_000))).await?;

    // Both the debit and the new record were visible when the observer ran
    assert_eq!(seen_balance.load(Ordering::SeqCst), rupees(6_000));
    assert_eq!(seen_records.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_no_notification_on_rejected_payment() -> Result<()> {
    let service = demo_ledger();
    let calls = Arc::new(AtomicUsize::new(0));

    let _subscription = {
        let calls = Arc::clone(&calls);
        service.subscribe(move || {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };

    let _ = service.process_transaction(payment(0)).await;
    let _ = service.process_transaction(payment(rupees(90_000))).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_no_notification_on_balance_check() -> Result<()> {
    let service = demo_ledger();
    let calls = Arc::new(AtomicUsize::new(0));

    let _subscription = {
        let calls = Arc::clone(&calls);
        service.subscribe(move || {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };

    let _ = service.check_balance(rupees(5_000)).await;
    let _ = service.check_balance(rupees(90_000)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_unsubscribe_stops_notifications() -> Result<()> {
    let service = demo_ledger();
    let calls = Arc::new(AtomicUsize::new(0));

    let subscription = {
        let calls = Arc::clone(&calls);
        service.subscribe(move || {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };

    service.process_transaction(payment(rupees(1_000))).await?;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    subscription.unsubscribe();
    service.process_transaction(payment(rupees(1_000))).await?;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_unsubscribe_is_idempotent_and_isolated() -> Result<()> {
    let service = demo_ledger();
    let first_calls = Arc::new(AtomicUsize::new(0));
    let second_calls = Arc::new(AtomicUsize::new(0));

    let first = {
        let calls = Arc::clone(&first_calls);
        service.subscribe(move || {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };
    let _second = {
        let calls = Arc::clone(&second_calls);
        service.subscribe(move || {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };

    first.unsubscribe();
    first.unsubscribe(); // Second call is a no-op

    service.process_transaction(payment(rupees(1_000))).await?;

    assert_eq!(first_calls.load(Ordering::SeqCst), 0);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_keeps_listener_registered() -> Result<()> {
    let service = demo_ledger();
    let calls = Arc::new(AtomicUsize::new(0));

    {
        let calls = Arc::clone(&calls);
        let subscription = service.subscribe(move || {
            calls.fetch_add(1, Ordering::SeqCst);
        });
        drop(subscription);
    }

    service.process_transaction(payment(rupees(1_000))).await?;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_notification_follows_registration_order() -> Result<()> {
    let service = demo_ledger();
    let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

    for tag in 1..=3 {
        let order = Arc::clone(&order);
        let _ = service.subscribe(move || order.lock().push(tag));
    }

    service.process_transaction(payment(rupees(1_000))).await?;

    assert_eq!(*order.lock(), vec![1, 2, 3]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_panicking_listener_does_not_block_others() -> Result<()> {
    let service = demo_ledger();
    let calls = Arc::new(AtomicUsize::new(0));

    let _first = service.subscribe(|| panic!("listener failure"));
    let _second = {
        let calls = Arc::clone(&calls);
        service.subscribe(move || {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };

    service.process_transaction(payment(rupees(1_000))).await?;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // The ledger itself is unharmed
    assert_eq!(service.get_balance(), rupees(24_000));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_unsubscribe_after_service_drop_is_noop() -> Result<()> {
    let service = demo_ledger();
    let subscription = service.subscribe(|| {});

    drop(service);
    subscription.unsubscribe();

    Ok(())
}
