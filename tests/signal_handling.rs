//! Tests for signal-driven termination.
//!
//! Signals are process-global state, so these tests live in their own test
//! binary and serialize through a lock.

#![cfg(unix)]

use std::process::Command;
use std::sync::Mutex;
use std::time::Duration;

use service_bootstrap::lifecycle::signals;

static SIGNAL_LOCK: Mutex<()> = Mutex::new(());

fn locked() -> std::sync::MutexGuard<'static, ()> {
    SIGNAL_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Deliver a signal to this test process.
fn raise(signal: &str) {
    let status = Command::new("kill")
        .args([signal, &std::process::id().to_string()])
        .status()
        .unwrap();
    assert!(status.success(), "kill {signal} failed");
}

async fn wait_resolves_to(signal: &str, expected: &str) {
    let wait = tokio::spawn(signals::wait_for_signal());
    // Let the spawned task register its handlers before the signal lands.
    tokio::time::sleep(Duration::from_millis(200)).await;
    raise(signal);

    let name = tokio::time::timeout(Duration::from_secs(5), wait)
        .await
        .expect("signal wait did not resolve")
        .unwrap()
        .unwrap();
    assert_eq!(name, expected);
}

#[tokio::test]
async fn sigterm_resolves_the_signal_wait() {
    let _guard = locked();
    wait_resolves_to("-TERM", "SIGTERM").await;
}

#[tokio::test]
async fn sigint_resolves_the_signal_wait() {
    let _guard = locked();
    wait_resolves_to("-INT", "SIGINT").await;
}
