//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use fluxstore::store::{Action, DecodeAction, Reduction, Store, Subscription, Transition};
use parking_lot::Mutex;
use serde::Deserialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

// -- Counter fixture ----------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Count {
    Add,
    Reset,
    Fail,
}

impl Action for Count {
    fn kind(&self) -> &'static str {
        match self {
            Count::Add => "ADD",
            Count::Reset => "RESET",
            Count::Fail => "FAIL",
        }
    }
}

impl DecodeAction for Count {
    const KINDS: &'static [&'static str] = &["ADD", "RESET", "FAIL"];
}

/// `count(state = 0, action)`: ADD increments, RESET zeroes, FAIL errors.
pub fn count(state: &u32, action: &Count) -> Reduction<u32> {
    match action {
        Count::Add => Ok(Transition::Next(state + 1)),
        Count::Reset if *state == 0 => Ok(Transition::Unchanged),
        Count::Reset => Ok(Transition::Next(0)),
        Count::Fail => Err(fluxstore::store::ReducerError::new("FAIL", "refused")),
    }
}

pub fn counter_store() -> Store<u32, Count> {
    Store::new(count)
}

// -- Listener helpers ---------------------------------------------------------

/// Records labels pushed by listeners, in call order.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, label: impl Into<String>) {
        self.0.lock().push(label.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    /// Subscribe a listener that records `label` on each notification.
    pub fn listen<S, A>(&self, store: &Store<S, A>, label: &'static str) -> Subscription
    where
        S: Send + Sync + 'static,
        A: Action,
    {
        let journal = self.clone();
        store.subscribe(move || journal.push(label))
    }
}

/// Subscribe a listener that counts its calls.
pub fn call_counter<S, A>(store: &Store<S, A>) -> (Arc<AtomicUsize>, Subscription)
where
    S: Send + Sync + 'static,
    A: Action,
{
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let subscription = store.subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (calls, subscription)
}

pub fn calls(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

// -- Files --------------------------------------------------------------------

/// Write `content` to `name` inside a fresh temp dir.
pub fn temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("Failed to create file");
    file.write_all(content.as_bytes())
        .expect("Failed to write file");
    (temp_dir, path)
}
