mod common;

use common::{call_counter, calls, count, Count, Journal};
use fluxstore::store::{LoggingMiddleware, Middleware, Next, Store, StoreError};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Records its label before and after the rest of the chain.
struct Trace {
    label: &'static str,
    journal: Journal,
}

impl Middleware<u32, Count> for Trace {
    fn handle(&self, _state: &u32, action: Count, next: Next<'_, u32, Count>) -> Result<Count, StoreError> {
        self.journal.push(format!("{}:before", self.label));
        let result = next.run(action);
        self.journal.push(format!("{}:after", self.label));
        result
    }
}

/// Swallows RESET while the counter is below the threshold.
struct GuardReset {
    below: u32,
}

impl Middleware<u32, Count> for GuardReset {
    fn handle(&self, state: &u32, action: Count, next: Next<'_, u32, Count>) -> Result<Count, StoreError> {
        if action == Count::Reset && *state < self.below {
            return Ok(action);
        }
        next.run(action)
    }
}

/// Turns every FAIL into an ADD.
struct Rewrite;

impl Middleware<u32, Count> for Rewrite {
    fn handle(&self, _state: &u32, action: Count, next: Next<'_, u32, Count>) -> Result<Count, StoreError> {
        match action {
            Count::Fail => next.run(Count::Add),
            other => next.run(other),
        }
    }
}

#[test]
fn middleware_runs_in_registration_order() {
    let journal = Journal::default();
    let store = Store::builder(count)
        .middleware(Trace {
            label: "outer",
            journal: journal.clone(),
        })
        .middleware(Trace {
            label: "inner",
            journal: journal.clone(),
        })
        .build();
    let _sub = journal.listen(&store, "listener");

    store.dispatch(Count::Add).unwrap();

    assert_eq!(
        journal.entries(),
        vec![
            "outer:before",
            "inner:before",
            "listener",
            "inner:after",
            "outer:after"
        ]
    );
}

#[test]
fn short_circuit_skips_reducer_and_listeners() {
    let store = Store::builder(count)
        .initial_state(3)
        .middleware(GuardReset { below: 5 })
        .build();
    let (hits, _sub) = call_counter(&store);

    assert_eq!(store.dispatch(Count::Reset).unwrap(), Count::Reset);

    assert_eq!(*store.get_state(), 3);
    assert_eq!(calls(&hits), 0);
}

#[test]
fn middleware_sees_current_state() {
    let store = Store::builder(count)
        .initial_state(4)
        .middleware(GuardReset { below: 5 })
        .build();

    store.dispatch(Count::Add).unwrap();
    store.dispatch(Count::Reset).unwrap();

    assert_eq!(*store.get_state(), 0);
}

#[test]
fn rewritten_action_is_reduced_and_returned() {
    let store = Store::builder(count).middleware(Rewrite).build();

    let dispatched = store.dispatch(Count::Fail).unwrap();

    assert_eq!(dispatched, Count::Add);
    assert_eq!(*store.get_state(), 1);
}

#[test]
fn logging_middleware_passes_results_through() {
    let store = Store::builder(count).middleware(LoggingMiddleware).build();

    store.dispatch(Count::Add).unwrap();
    let err = store.dispatch(Count::Fail).unwrap_err();

    assert!(matches!(err, StoreError::Reducer(_)));
    assert_eq!(*store.get_state(), 1);
}

/// Counts the actions that reach it.
struct Tally(Arc<AtomicUsize>);

impl Middleware<u32, Count> for Tally {
    fn handle(&self, _state: &u32, action: Count, next: Next<'_, u32, Count>) -> Result<Count, StoreError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        next.run(action)
    }
}

#[test]
fn unrecognized_json_action_notifies_without_middleware() {
    let seen = Arc::new(AtomicUsize::new(0));
    let store = Store::builder(count).middleware(Tally(Arc::clone(&seen))).build();
    let (hits, _sub) = call_counter(&store);

    assert_eq!(store.dispatch_value(json!({"type": "ADD"})).unwrap(), Some(Count::Add));
    assert_eq!(store.dispatch_value(json!({"type": "LOGOUT"})).unwrap(), None);

    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert_eq!(calls(&hits), 2);
    assert_eq!(*store.get_state(), 1);
}

#[test]
fn json_dispatch_returns_rewritten_action() {
    let store = Store::builder(count).middleware(Rewrite).build();

    let dispatched = store.dispatch_value(json!({"type": "FAIL"})).unwrap();

    assert_eq!(dispatched, Some(Count::Add));
    assert_eq!(*store.get_state(), 1);
}
