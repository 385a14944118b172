#![forbid(unsafe_code)]

//! Multi-threaded use of [`SharedChangeStack`].

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::thread;

use changekit::{Change, SharedChangeStack};

const THREADS: usize = 8;
const PER_THREAD: usize = 50;

/// Increment-style change: the snapshot is the amount to take back.
fn increment(counter: &Arc<AtomicI64>) -> Change<i64> {
    let (up, down) = (counter.clone(), counter.clone());
    Change::new(
        1,
        move || {
            up.fetch_add(1, Ordering::SeqCst);
        },
        move |amount: &i64| {
            down.fetch_sub(*amount, Ordering::SeqCst);
        },
    )
}

#[test]
fn concurrent_adds_are_all_recorded() {
    let counter = Arc::new(AtomicI64::new(0));
    let stack = SharedChangeStack::new(0);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let stack = stack.clone();
            let counter = counter.clone();
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    stack.add(increment(&counter));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let total = THREADS * PER_THREAD;
    assert_eq!(stack.undo_depth(), total);
    assert_eq!(counter.load(Ordering::SeqCst), total as i64);

    while stack.undo() {}
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert_eq!(stack.redo_depth(), total);
}

#[test]
fn concurrent_undo_redo_keeps_timeline_consistent() {
    let counter = Arc::new(AtomicI64::new(0));
    let stack = SharedChangeStack::new(10);
    for _ in 0..10 {
        stack.add(increment(&counter));
    }

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let stack = stack.clone();
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    if i % 2 == 0 {
                        stack.undo();
                    } else {
                        stack.redo();
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Every recorded increment is either applied (history) or reverted (redo).
    assert_eq!(stack.undo_depth() + stack.redo_depth(), 10);
    assert_eq!(counter.load(Ordering::SeqCst), stack.undo_depth() as i64);
}
