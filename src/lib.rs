//! Unidirectional state container: an explicitly owned store, pure
//! reducers, ordered subscribers, dispatch middleware and thunk-style
//! deferred dispatch on tokio.

pub mod cli;
pub mod config;
pub mod logging;
pub mod scenarios;
pub mod store;
