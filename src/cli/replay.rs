//! Replay a JSON-lines action log through a scenario store.

use std::io::{BufRead, Write};

use serde::Serialize;
use serde_json::json;

use crate::cli::output::RunError;
use crate::cli::run::logged;
use crate::config::Config;
use crate::scenarios::{auth, counter, messages, notes, profile, root, todos, users, Scenario};
use crate::store::{DecodeAction, RawAction, Store, StoreError};

/// Counts reported after a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    /// Lines dispatched, including unrecognized kinds.
    pub applied: usize,
    /// Dispatched lines whose kind the scenario does not handle.
    pub unrecognized: usize,
    /// Lines rejected and skipped under `--keep-going`.
    pub skipped: usize,
}

pub fn replay<R: BufRead>(
    scenario: Scenario,
    config: &Config,
    input: R,
    keep_going: bool,
    out: &mut dyn Write,
) -> Result<ReplaySummary, RunError> {
    match scenario {
        Scenario::Counter => replay_into(logged(counter::reduce), input, keep_going, out),
        Scenario::Auth => replay_into(logged(auth::reduce), input, keep_going, out),
        Scenario::Notes => replay_into(logged(notes::reducer()), input, keep_going, out),
        Scenario::Todos => replay_into(
            logged(todos::reducer(config.todos.initial.clone())),
            input,
            keep_going,
            out,
        ),
        Scenario::Profile => replay_into(logged(profile::reduce), input, keep_going, out),
        Scenario::Users => replay_into(logged(users::reduce), input, keep_going, out),
        Scenario::Messages => replay_into(logged(messages::reduce), input, keep_going, out),
        Scenario::Root => replay_into(logged(root::root_reducer()), input, keep_going, out),
    }
}

fn replay_into<S, A, R>(
    store: Store<S, A>,
    mut input: R,
    keep_going: bool,
    out: &mut dyn Write,
) -> Result<ReplaySummary, RunError>
where
    S: Serialize + Send + Sync + 'static,
    A: DecodeAction,
    R: BufRead,
{
    let mut summary = ReplaySummary::default();
    let mut buf = Vec::new();
    let mut number = 0;

    loop {
        buf.clear();
        let read = input.read_until(b'\n', &mut buf).map_err(RunError::Read)?;
        if read == 0 {
            break;
        }
        number += 1;

        let result = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => line
                .parse::<RawAction>()
                .and_then(|raw| store.dispatch_raw(raw)),
            Err(e) => Err(StoreError::invalid(format!("not valid UTF-8: {}", e))),
        };
        match result {
            Ok(Some(_)) => summary.applied += 1,
            Ok(None) => {
                summary.applied += 1;
                summary.unrecognized += 1;
            }
            Err(source) if keep_going => {
                tracing::warn!(line = number, error = %source, "skipping action");
                summary.skipped += 1;
            }
            Err(source) => return Err(RunError::Replay { line: number, source }),
        }
    }

    let report = json!({
        "applied": summary.applied,
        "unrecognized": summary.unrecognized,
        "skipped": summary.skipped,
        "state": &*store.get_state(),
    });
    serde_json::to_writer(&mut *out, &report)?;
    writeln!(out)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay_str(scenario: Scenario, log: &str, keep_going: bool) -> Result<(ReplaySummary, serde_json::Value), RunError> {
        let mut out = Vec::new();
        let summary = replay(scenario, &Config::default(), log.as_bytes(), keep_going, &mut out)?;
        let report = serde_json::from_slice(&out).unwrap();
        Ok((summary, report))
    }

    #[test]
    fn replays_counter_log() {
        let log = "{\"type\":\"ADD\"}\n\n{\"type\":\"ADD\"}\n{\"type\":\"DECREMENT\"}\n";
        let (summary, report) = replay_str(Scenario::Counter, log, false).unwrap();
        assert_eq!(summary.applied, 3);
        assert_eq!(report["state"], 1);
    }

    #[test]
    fn unknown_kind_counts_as_unrecognized() {
        let log = "{\"type\":\"LOGIN\"}\n{\"type\":\"ADD_NOTE\",\"text\":\"hi\"}\n";
        let (summary, report) = replay_str(Scenario::Notes, log, false).unwrap();
        assert_eq!(summary.applied, 2);
        assert_eq!(summary.unrecognized, 1);
        assert_eq!(report["state"], "hi");
    }

    #[test]
    fn invalid_line_aborts_with_line_number() {
        let log = "{\"type\":\"ADD\"}\n{\"kind\":\"ADD\"}\n";
        let err = replay_str(Scenario::Counter, log, false).unwrap_err();
        assert!(matches!(err, RunError::Replay { line: 2, .. }));
    }

    #[test]
    fn non_utf8_line_aborts_with_line_number() {
        let log: &[u8] = b"{\"type\":\"ADD\"}\n\xff\xfe\n{\"type\":\"ADD\"}\n";
        let mut out = Vec::new();
        let err = replay(Scenario::Counter, &Config::default(), log, false, &mut out).unwrap_err();
        assert!(matches!(err, RunError::Replay { line: 2, .. }));
        assert!(err.to_string().contains("UTF-8"));
    }

    struct Unreadable;

    impl std::io::Read for Unreadable {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("device gone"))
        }
    }

    #[test]
    fn read_failure_is_reported_as_read_error() {
        let mut out = Vec::new();
        let input = std::io::BufReader::new(Unreadable);
        let err = replay(Scenario::Counter, &Config::default(), input, true, &mut out).unwrap_err();
        assert!(matches!(err, RunError::Read(_)));
        assert!(err.to_string().starts_with("Failed to read action log"));
    }

    #[test]
    fn keep_going_skips_non_utf8_line() {
        let log: &[u8] = b"{\"type\":\"ADD\"}\n\xff\xfe\n{\"type\":\"ADD\"}";
        let mut out = Vec::new();
        let summary = replay(Scenario::Counter, &Config::default(), log, true, &mut out).unwrap();
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.applied, 2);
        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["state"], 2);
    }

    #[test]
    fn keep_going_skips_bad_lines() {
        let log = "not json\n{\"type\":\"REMOVE_ITEM\",\"index\":40}\n{\"type\":\"REMOVE_ITEM\",\"index\":0}\n";
        let (summary, report) = replay_str(Scenario::Todos, log, true).unwrap();
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.applied, 1);
        assert_eq!(report["state"].as_array().unwrap().len(), 3);
    }
}
