//! Composite reducers.
//!
//! [`Combine`] builds one reducer over a struct whose fields are slices,
//! each owned by its own reducer. Every slice sees every action; the
//! composite is rebuilt only when at least one slice changed.

use std::marker::PhantomData;

use super::error::ReducerError;
use super::reducer::{Reducer, Reduction, Transition};

trait SliceReducer<S, A>: Send + Sync {
    fn key(&self) -> &'static str;

    fn init_into(&self, composite: &mut S);

    /// Reduce this slice of `previous` and store the result in `next`.
    /// Returns whether the slice changed.
    fn reduce_into(&self, previous: &S, next: &mut S, action: &A) -> Result<bool, ReducerError>;
}

struct Slice<S, T, A, R> {
    key: &'static str,
    get: fn(&S) -> &T,
    set: fn(&mut S, T),
    reducer: R,
    _action: PhantomData<fn(&A)>,
}

impl<S, T, A, R> SliceReducer<S, A> for Slice<S, T, A, R>
where
    R: Reducer<T, A>,
    T: Clone + 'static,
    S: 'static,
    A: 'static,
{
    fn key(&self) -> &'static str {
        self.key
    }

    fn init_into(&self, composite: &mut S) {
        (self.set)(composite, self.reducer.init());
    }

    fn reduce_into(&self, previous: &S, next: &mut S, action: &A) -> Result<bool, ReducerError> {
        let slice = (self.get)(previous);
        match self.reducer.reduce(slice, action)? {
            Transition::Unchanged => {
                (self.set)(next, slice.clone());
                Ok(false)
            }
            Transition::Next(value) => {
                (self.set)(next, value);
                Ok(true)
            }
        }
    }
}

/// Reducer over a composite state built from per-key slice reducers.
///
/// When a slice changes, the composite is rebuilt from `S::default()` with
/// every registered slice copied in, so fields without a slice reducer do
/// not survive a transition.
pub struct Combine<S, A> {
    slices: Vec<Box<dyn SliceReducer<S, A>>>,
}

impl<S, A> Default for Combine<S, A> {
    fn default() -> Self {
        Self { slices: Vec::new() }
    }
}

impl<S, A> Combine<S, A>
where
    S: 'static,
    A: 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the reducer for one slice. Registering a key again
    /// replaces the earlier reducer.
    pub fn slice<T, R>(
        mut self,
        key: &'static str,
        get: fn(&S) -> &T,
        set: fn(&mut S, T),
        reducer: R,
    ) -> Self
    where
        R: Reducer<T, A>,
        T: Clone + 'static,
    {
        self.slices.retain(|slice| slice.key() != key);
        self.slices.push(Box::new(Slice {
            key,
            get,
            set,
            reducer,
            _action: PhantomData,
        }));
        self
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.slices.iter().map(|slice| slice.key()).collect()
    }
}

impl<S, A> Reducer<S, A> for Combine<S, A>
where
    S: Default + Send + Sync + 'static,
    A: Send + Sync + 'static,
{
    fn init(&self) -> S {
        let mut state = S::default();
        for slice in &self.slices {
            slice.init_into(&mut state);
        }
        state
    }

    fn reduce(&self, state: &S, action: &A) -> Reduction<S> {
        let mut next = S::default();
        let mut changed = false;
        for slice in &self.slices {
            changed |= slice.reduce_into(state, &mut next, action)?;
        }
        if changed {
            Ok(Transition::Next(next))
        } else {
            Ok(Transition::Unchanged)
        }
    }
}

/// Builds a [`Combine`] reducer with one slice per struct field.
///
/// ```
/// use fluxstore::combine_reducers;
/// use fluxstore::store::{Reducer, Reduction, Transition};
///
/// #[derive(Debug, Default, Clone, PartialEq)]
/// struct Root {
///     a: u32,
///     b: u32,
/// }
///
/// fn bump(state: &u32, _action: &()) -> Reduction<u32> {
///     Ok(Transition::Next(state + 1))
/// }
///
/// fn keep(_state: &u32, _action: &()) -> Reduction<u32> {
///     Ok(Transition::Unchanged)
/// }
///
/// let root = combine_reducers!(Root { a: bump, b: keep });
/// let next = root.reduce(&Root { a: 1, b: 2 }, &()).unwrap();
/// assert_eq!(next, Transition::Next(Root { a: 2, b: 2 }));
/// ```
#[macro_export]
macro_rules! combine_reducers {
    ($state:ty { $($field:ident : $reducer:expr),+ $(,)? }) => {
        $crate::store::Combine::<$state, _>::new()
            $(
                .slice(
                    stringify!($field),
                    |state: &$state| &state.$field,
                    |state: &mut $state, value| state.$field = value,
                    $reducer,
                )
            )+
    };
}
