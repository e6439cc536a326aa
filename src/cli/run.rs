//! Scripted walk-throughs for each scenario.

use std::io::Write;

use serde::Serialize;

use crate::cli::output::{Emitter, RunError};
use crate::config::Config;
use crate::scenarios::{auth, counter, messages, notes, profile, root, todos, users, Scenario};
use crate::store::{Action, Dispatched, LoggingMiddleware, Reducer, Store, StoreError};

const INIT: &str = "@@INIT";

pub async fn run(scenario: Scenario, config: &Config, out: &mut dyn Write) -> Result<(), RunError> {
    let mut emitter = Emitter::new(out);
    tracing::info!(scenario = scenario.name(), "running scenario");
    match scenario {
        Scenario::Counter => walk(logged(counter::reduce), counter::script(), &mut emitter),
        Scenario::Auth => walk(logged(auth::reduce), auth::script(), &mut emitter),
        Scenario::Notes => walk(logged(notes::reducer()), notes::script(), &mut emitter),
        Scenario::Todos => {
            let mut script = todos::script();
            // One removal past the end to show a rejected transition.
            script.push(todos::remove_item(config.todos.initial.len() + 5));
            walk(
                logged(todos::reducer(config.todos.initial.clone())),
                script,
                &mut emitter,
            )
        }
        Scenario::Profile => walk(logged(profile::reduce), profile::script(), &mut emitter),
        Scenario::Users => fetch_users(config, &mut emitter).await,
        Scenario::Messages => post_messages(&mut emitter),
        Scenario::Root => walk(logged(root::root_reducer()), root::script(), &mut emitter),
    }
}

pub(crate) fn logged<S, A>(reducer: impl Reducer<S, A>) -> Store<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    Store::builder(reducer).middleware(LoggingMiddleware).build()
}

/// Dispatches each action in order and emits the state after it.
/// A rejected reduction is reported and the walk continues.
fn walk<S, A>(store: Store<S, A>, script: Vec<A>, emitter: &mut Emitter<'_>) -> Result<(), RunError>
where
    S: Serialize + Send + Sync + 'static,
    A: Action,
{
    emitter.state(INIT, &*store.get_state())?;
    for action in script {
        let kind = action.kind();
        match store.dispatch(action) {
            Ok(_) => emitter.state(kind, &*store.get_state())?,
            Err(StoreError::Reducer(err)) => {
                emitter.rejected(kind, &err.message, &*store.get_state())?
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

async fn fetch_users(config: &Config, emitter: &mut Emitter<'_>) -> Result<(), RunError> {
    let store = logged(users::reduce);
    emitter.state(INIT, &*store.get_state())?;

    let thunk = users::handle_async(config.users_delay(), config.users.names.clone());
    let dispatched = store.send(thunk)?;
    emitter.state("handleAsync", &*store.get_state())?;

    if let Dispatched::Deferred(handle) = dispatched {
        handle.await??;
    }
    emitter.state("handleAsync:settled", &*store.get_state())
}

fn post_messages(emitter: &mut Emitter<'_>) -> Result<(), RunError> {
    let store = logged(messages::reduce);
    emitter.state(INIT, &*store.get_state())?;

    let submit = store.bind(|message: String| messages::add_message(message));
    let watcher = store.select(
        |state: &Vec<String>| state.len(),
        |len| tracing::info!(messages = *len, "message list grew"),
    );
    for message in messages::script() {
        let action = submit(message)?;
        emitter.state(action.kind(), &*store.get_state())?;
    }
    watcher.unsubscribe();
    Ok(())
}
