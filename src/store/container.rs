//! The store: owner of the current state, dispatch entry point and
//! subscriber list.

use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex, ReentrantMutexGuard, RwLock};
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::action::{Action, DecodeAction, RawAction};
use super::error::StoreError;
use super::middleware::{Middleware, Next};
use super::reducer::{Reducer, Transition};
use super::subscription::{Listeners, Subscription};

/// Future produced by a thunk, run on the tokio runtime.
pub type Deferred = Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'static>>;

/// A function-valued action. It receives a handle to the store, so it can
/// both `dispatch` and `get_state`, and returns the deferred remainder of
/// its work.
pub type Thunk<S, A> = Box<dyn FnOnce(Store<S, A>) -> Deferred + Send + 'static>;

/// Something that can be handed to [`Store::send`].
pub enum Dispatch<S, A> {
    Action(A),
    Thunk(Thunk<S, A>),
}

impl<S, A> Dispatch<S, A> {
    pub fn thunk<F, Fut>(f: F) -> Self
    where
        F: FnOnce(Store<S, A>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), StoreError>> + Send + 'static,
    {
        Dispatch::Thunk(Box::new(move |store| Box::pin(f(store)) as Deferred))
    }
}

impl<S, A> From<A> for Dispatch<S, A> {
    fn from(action: A) -> Self {
        Dispatch::Action(action)
    }
}

/// Result of [`Store::send`].
#[derive(Debug)]
pub enum Dispatched<A> {
    /// The action was reduced and committed.
    Action(A),
    /// The thunk ran its synchronous part; the handle resolves when the
    /// deferred part finishes.
    Deferred(JoinHandle<Result<(), StoreError>>),
}

/// State container.
///
/// `Store` is a cheap handle; clones share the same state. There is no
/// global store: whoever needs one is handed a clone.
///
/// Dispatches are serialized. A dispatch from another thread waits for
/// the running one, including its subscriber notifications. A dispatch
/// issued on the same thread while one is running (from a reducer,
/// middleware or subscriber) is rejected with
/// [`StoreError::ReentrantDispatch`].
pub struct Store<S, A> {
    inner: Arc<Inner<S, A>>,
}

struct Inner<S, A> {
    reducer: Box<dyn Reducer<S, A>>,
    middleware: Vec<Box<dyn Middleware<S, A>>>,
    state: RwLock<Arc<S>>,
    listeners: Arc<Mutex<Listeners>>,
    dispatching: ReentrantMutex<Cell<bool>>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Builder for a store with middleware or a supplied initial state.
pub struct StoreBuilder<S, A> {
    reducer: Box<dyn Reducer<S, A>>,
    initial: Option<S>,
    middleware: Vec<Box<dyn Middleware<S, A>>>,
}

impl<S, A> StoreBuilder<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    /// Seed the store with this state instead of `reducer.init()`.
    pub fn initial_state(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Append a middleware. The first one added sees actions first.
    pub fn middleware(mut self, middleware: impl Middleware<S, A>) -> Self {
        self.middleware.push(Box::new(middleware));
        self
    }

    pub fn build(self) -> Store<S, A> {
        let seeded = self.initial.is_some();
        let state = match self.initial {
            Some(state) => state,
            None => self.reducer.init(),
        };
        tracing::debug!(
            seeded,
            middleware = self.middleware.len(),
            "store created"
        );
        Store {
            inner: Arc::new(Inner {
                reducer: self.reducer,
                middleware: self.middleware,
                state: RwLock::new(Arc::new(state)),
                listeners: Arc::new(Mutex::new(Listeners::default())),
                dispatching: ReentrantMutex::new(Cell::new(false)),
            }),
        }
    }
}

/// Marks the store as dispatching for as long as it is alive.
struct DispatchGuard<'a> {
    flag: ReentrantMutexGuard<'a, Cell<bool>>,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

impl<S, A> Store<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    /// Create a store whose state is the reducer's initial state.
    pub fn new(reducer: impl Reducer<S, A>) -> Self {
        Self::builder(reducer).build()
    }

    /// Create a store seeded with `state`.
    pub fn with_state(reducer: impl Reducer<S, A>, state: S) -> Self {
        Self::builder(reducer).initial_state(state).build()
    }

    pub fn builder(reducer: impl Reducer<S, A>) -> StoreBuilder<S, A> {
        StoreBuilder {
            reducer: Box::new(reducer),
            initial: None,
            middleware: Vec::new(),
        }
    }

    /// Current state snapshot.
    pub fn get_state(&self) -> Arc<S> {
        Arc::clone(&self.inner.state.read())
    }

    /// Reduce `action`, commit the result and notify subscribers.
    ///
    /// On a reducer error the state is left as it was and nobody is
    /// notified. Returns the dispatched action (as it came out of the
    /// middleware chain).
    pub fn dispatch(&self, action: A) -> Result<A, StoreError> {
        let _guard = self.enter()?;
        let state = self.get_state();
        let core = |action: A| self.reduce_and_commit(action);
        Next::new(&self.inner.middleware, &*state, &core).run(action)
    }

    /// Dispatch an action or run a thunk.
    pub fn send(&self, dispatch: impl Into<Dispatch<S, A>>) -> Result<Dispatched<A>, StoreError> {
        match dispatch.into() {
            Dispatch::Action(action) => self.dispatch(action).map(Dispatched::Action),
            Dispatch::Thunk(thunk) => self.dispatch_thunk(thunk).map(Dispatched::Deferred),
        }
    }

    /// Run a thunk.
    ///
    /// `thunk` is called right away with a clone of this store, so any
    /// dispatch it performs before returning is already committed when
    /// this returns. The future it returns is spawned on the current tokio
    /// runtime.
    ///
    /// Like [`Store::dispatch`], sending a thunk from a reducer, middleware
    /// or subscriber of a running dispatch fails with
    /// [`StoreError::ReentrantDispatch`]; the thunk is not called.
    pub fn dispatch_thunk<F, Fut>(
        &self,
        thunk: F,
    ) -> Result<JoinHandle<Result<(), StoreError>>, StoreError>
    where
        F: FnOnce(Store<S, A>) -> Fut,
        Fut: Future<Output = Result<(), StoreError>> + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| StoreError::NoRuntime)?;
        if self.is_dispatching() {
            tracing::warn!("thunk sent during dispatch rejected");
            return Err(StoreError::ReentrantDispatch);
        }
        let deferred = thunk(self.clone());
        tracing::trace!("thunk deferred");
        Ok(runtime.spawn(deferred))
    }

    /// Register a listener called after every committed transition.
    ///
    /// Registering the same callback twice registers it twice.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.inner.listeners.lock().insert(Arc::new(listener));
        tracing::trace!(subscription = id, "listener added");
        Subscription::new(id, &self.inner.listeners)
    }

    /// Register a listener on a derived value.
    ///
    /// `listener` is called with the selected value after a transition
    /// only when it differs from the previously selected one.
    pub fn select<T, Sel, F>(&self, selector: Sel, listener: F) -> Subscription
    where
        T: PartialEq + Send + 'static,
        Sel: Fn(&S) -> T + Send + Sync + 'static,
        F: Fn(&T) + Send + Sync + 'static,
    {
        let last = Mutex::new(selector(&*self.get_state()));
        let store: Weak<Inner<S, A>> = Arc::downgrade(&self.inner);
        self.subscribe(move || {
            let Some(inner) = store.upgrade() else {
                return;
            };
            let state = Arc::clone(&inner.state.read());
            let selected = selector(&*state);
            let mut last = last.lock();
            if *last != selected {
                *last = selected;
                listener(&*last);
            }
        })
    }

    /// Bind an action creator to this store.
    pub fn bind<P, C>(&self, creator: C) -> impl Fn(P) -> Result<A, StoreError> + Send + Sync + 'static
    where
        C: Fn(P) -> A + Send + Sync + 'static,
    {
        let store = self.clone();
        move |props| store.dispatch(creator(props))
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// Whether a dispatch is running on this thread. Waits for a dispatch
    /// running on another thread.
    fn is_dispatching(&self) -> bool {
        self.inner.dispatching.lock().get()
    }

    fn enter(&self) -> Result<DispatchGuard<'_>, StoreError> {
        let flag = self.inner.dispatching.lock();
        if flag.replace(true) {
            tracing::warn!("re-entrant dispatch rejected");
            return Err(StoreError::ReentrantDispatch);
        }
        Ok(DispatchGuard { flag })
    }

    fn reduce_and_commit(&self, action: A) -> Result<A, StoreError> {
        let current = self.get_state();
        match self.inner.reducer.reduce(&current, &action) {
            Ok(Transition::Next(next)) => {
                *self.inner.state.write() = Arc::new(next);
                tracing::trace!(action = action.kind(), "state replaced");
            }
            Ok(Transition::Unchanged) => {
                tracing::trace!(action = action.kind(), "state unchanged");
            }
            Err(err) => {
                tracing::debug!(action = action.kind(), error = %err, "reduction failed, state kept");
                return Err(err.into());
            }
        }
        self.notify();
        Ok(action)
    }

    fn notify(&self) {
        let listeners = self.inner.listeners.lock().snapshot();
        for listener in listeners {
            listener();
        }
    }
}

impl<S, A> Store<S, A>
where
    S: Send + Sync + 'static,
    A: DecodeAction,
{
    /// Dispatch an untyped action record.
    ///
    /// Fails with [`StoreError::InvalidAction`] when the value has no
    /// string `type`. A type the action enum does not know is not an
    /// error: it commits an unchanged transition, notifies subscribers and
    /// returns `Ok(None)`. Such a record has no typed form, so it bypasses
    /// the middleware chain.
    ///
    /// For a known type, returns the action as it came out of the
    /// middleware chain, which may differ from the decoded one.
    pub fn dispatch_value(&self, value: Value) -> Result<Option<A>, StoreError> {
        let raw = RawAction::try_from(value)?;
        self.dispatch_raw(raw)
    }

    pub fn dispatch_raw(&self, raw: RawAction) -> Result<Option<A>, StoreError> {
        match raw.decode::<A>()? {
            Some(action) => self.dispatch(action).map(Some),
            None => {
                let _guard = self.enter()?;
                self.notify();
                tracing::debug!(action = raw.kind(), recognized = false, "action dispatched");
                Ok(None)
            }
        }
    }
}
