use std::io::Write;

use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Errors raised while running or replaying a scenario.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Line {line}: {source}")]
    Replay {
        line: usize,
        #[source]
        source: StoreError,
    },

    #[error("Failed to read action log: {0}")]
    Read(#[source] std::io::Error),

    #[error("Deferred dispatch did not finish: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize state: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes one JSON object per line: a step number, the action label and
/// the state after it.
pub struct Emitter<'a> {
    out: &'a mut dyn Write,
    step: usize,
}

impl<'a> Emitter<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self { out, step: 0 }
    }

    pub fn state<S: Serialize>(&mut self, action: &str, state: &S) -> Result<(), RunError> {
        let line = json!({
            "step": self.step,
            "action": action,
            "state": state,
        });
        self.write_line(&line)
    }

    pub fn rejected<S: Serialize>(
        &mut self,
        action: &str,
        error: &str,
        state: &S,
    ) -> Result<(), RunError> {
        let line = json!({
            "step": self.step,
            "action": action,
            "error": error,
            "state": state,
        });
        self.write_line(&line)
    }

    fn write_line(&mut self, line: &serde_json::Value) -> Result<(), RunError> {
        serde_json::to_writer(&mut *self.out, line)?;
        writeln!(self.out)?;
        self.step += 1;
        Ok(())
    }
}
