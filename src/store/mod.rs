//! Unidirectional state container.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Middleware ──→ Reducer ──→ State ──→ Subscribers
//!    ↑                                                 │
//!    └──────────────── dispatch / thunk ───────────────┘
//! ```
//!
//! - **State**: immutable snapshot, replaced (never edited) on dispatch
//! - **Action**: tagged record describing an intended change
//! - **Reducer**: pure function `(state, action) -> transition`
//! - **Store**: owns the state, serializes dispatches, notifies listeners

mod action;
mod combine;
mod container;
mod error;
mod middleware;
mod reducer;
mod subscription;

pub use action::{Action, DecodeAction, RawAction};
pub use combine::Combine;
pub use container::{Deferred, Dispatch, Dispatched, Store, StoreBuilder, Thunk};
pub use error::{ReducerError, StoreError};
pub use middleware::{LoggingMiddleware, Middleware, Next};
pub use reducer::{narrow, Narrow, Reducer, Reduction, Transition, WithInit};
pub use subscription::Subscription;
