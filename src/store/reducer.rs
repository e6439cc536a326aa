//! Reducer trait for the state container.

use std::marker::PhantomData;

use super::error::ReducerError;

/// Outcome of a successful reduction.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition<S> {
    /// The action did not affect this state. The store keeps the exact
    /// same snapshot.
    Unchanged,
    /// Replace the state with a freshly built value.
    Next(S),
}

impl<S> Transition<S> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Transition::Unchanged)
    }

    /// Resolves the transition against the state it was computed from.
    pub fn resolve(self, previous: &S) -> S
    where
        S: Clone,
    {
        match self {
            Transition::Unchanged => previous.clone(),
            Transition::Next(next) => next,
        }
    }
}

pub type Reduction<S> = Result<Transition<S>, ReducerError>;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions are computed.
/// It receives the current state by shared reference, so it cannot edit
/// it in place; it either reports [`Transition::Unchanged`] or builds a
/// new value.
///
/// Any `Fn(&S, &A) -> Reduction<S>` whose state implements `Default` is a
/// reducer; its initial state is `S::default()`.
pub trait Reducer<S, A>: Send + Sync + 'static {
    /// The state produced before any action has been seen.
    fn init(&self) -> S;

    /// Process an action and describe the resulting transition.
    ///
    /// Kinds the reducer does not care about must yield
    /// `Transition::Unchanged`.
    fn reduce(&self, state: &S, action: &A) -> Reduction<S>;
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(&S, &A) -> Reduction<S> + Send + Sync + 'static,
    S: Default,
{
    fn init(&self) -> S {
        S::default()
    }

    fn reduce(&self, state: &S, action: &A) -> Reduction<S> {
        self(state, action)
    }
}

/// Reducer with an explicit initial state, for closures over state types
/// without a meaningful `Default`.
pub struct WithInit<F, S> {
    init: S,
    reduce: F,
}

impl<F, S> WithInit<F, S> {
    pub fn new(init: S, reduce: F) -> Self {
        Self { init, reduce }
    }
}

impl<S, A, F> Reducer<S, A> for WithInit<F, S>
where
    F: Fn(&S, &A) -> Reduction<S> + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    fn init(&self) -> S {
        self.init.clone()
    }

    fn reduce(&self, state: &S, action: &A) -> Reduction<S> {
        (self.reduce)(state, action)
    }
}

/// Adapts a reducer over `A` to a wider action type `B`.
///
/// Actions that `extract` does not map to an `A` leave the state
/// unchanged. Used to plug slice reducers into a combined reducer whose
/// action enum wraps theirs.
pub struct Narrow<R, S, A, B> {
    reducer: R,
    extract: fn(&B) -> Option<&A>,
    _state: PhantomData<fn() -> S>,
}

pub fn narrow<R, S, A, B>(reducer: R, extract: fn(&B) -> Option<&A>) -> Narrow<R, S, A, B>
where
    R: Reducer<S, A>,
{
    Narrow {
        reducer,
        extract,
        _state: PhantomData,
    }
}

impl<R, S, A, B> Reducer<S, B> for Narrow<R, S, A, B>
where
    R: Reducer<S, A>,
    S: 'static,
    A: 'static,
    B: 'static,
{
    fn init(&self) -> S {
        self.reducer.init()
    }

    fn reduce(&self, state: &S, action: &B) -> Reduction<S> {
        match (self.extract)(action) {
            Some(inner) => self.reducer.reduce(state, inner),
            None => Ok(Transition::Unchanged),
        }
    }
}
