//! Dispatch middleware.
//!
//! A middleware wraps the store's dispatch: it sees each action before
//! the reducer does, may rewrite or swallow it, and observes the result.
//! Middlewares run in registration order; the innermost step reduces the
//! action, commits the new state and notifies subscribers.

use std::time::Instant;

use super::action::Action;
use super::error::StoreError;

pub trait Middleware<S, A>: Send + Sync + 'static {
    /// Handle one dispatch. Call `next.run(action)` to continue the chain;
    /// returning without calling it short-circuits the dispatch and the
    /// reducer never sees the action.
    fn handle(&self, state: &S, action: A, next: Next<'_, S, A>) -> Result<A, StoreError>;
}

/// The remainder of the middleware chain.
pub struct Next<'a, S, A> {
    chain: &'a [Box<dyn Middleware<S, A>>],
    state: &'a S,
    core: &'a dyn Fn(A) -> Result<A, StoreError>,
}

impl<'a, S, A> Next<'a, S, A>
where
    S: 'static,
    A: 'static,
{
    pub(crate) fn new(
        chain: &'a [Box<dyn Middleware<S, A>>],
        state: &'a S,
        core: &'a dyn Fn(A) -> Result<A, StoreError>,
    ) -> Self {
        Self { chain, state, core }
    }

    pub fn run(self, action: A) -> Result<A, StoreError> {
        match self.chain.split_first() {
            Some((head, rest)) => head.handle(
                self.state,
                action,
                Next {
                    chain: rest,
                    state: self.state,
                    core: self.core,
                },
            ),
            None => (self.core)(action),
        }
    }
}

/// Logs every dispatched action and how it ended.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMiddleware;

impl<S, A> Middleware<S, A> for LoggingMiddleware
where
    S: 'static,
    A: Action,
{
    fn handle(&self, _state: &S, action: A, next: Next<'_, S, A>) -> Result<A, StoreError> {
        let kind = action.kind();
        let started = Instant::now();
        let result = next.run(action);
        let elapsed_us = started.elapsed().as_micros() as u64;
        match &result {
            Ok(_) => tracing::debug!(action = kind, elapsed_us, "action dispatched"),
            Err(err) => tracing::warn!(action = kind, elapsed_us, error = %err, "action rejected"),
        }
        result
    }
}
