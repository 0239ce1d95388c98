use std::process::Stdio;

use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::CollectorError;

/// Program and arguments of the external metrics collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorCommand {
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CollectorMessage {
    Output(String),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Spawned,
    /// The previous run is still in flight; this tick is dropped.
    Busy,
}

/// Runs the collector at most once at a time and reports each run's stdout.
pub struct CollectorPoller {
    command: CollectorCommand,
    tx: mpsc::UnboundedSender<CollectorMessage>,
    in_flight: Option<JoinHandle<()>>,
}

impl CollectorPoller {
    pub fn new(command: CollectorCommand, tx: mpsc::UnboundedSender<CollectorMessage>) -> Self {
        Self {
            command,
            tx,
            in_flight: None,
        }
    }

    pub fn command(&self) -> &CollectorCommand {
        &self.command
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Starts a run unless one is already going. Must be called inside a
    /// tokio runtime.
    pub fn poll(&mut self) -> PollOutcome {
        if self.is_busy() {
            debug!(program = %self.command.program, "collector still running, skipping tick");
            return PollOutcome::Busy;
        }

        let command = self.command.clone();
        let tx = self.tx.clone();
        debug!(program = %command.program, "starting collector");
        self.in_flight = Some(tokio::spawn(async move {
            let message = match run_collector(&command).await {
                Ok(stdout) => CollectorMessage::Output(stdout),
                Err(err) => CollectorMessage::Failed(err.to_string()),
            };
            // The receiver is gone only during shutdown.
            let _ = tx.send(message);
        }));
        PollOutcome::Spawned
    }

    /// Aborts an in-flight run; its child process is killed on drop.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl Drop for CollectorPoller {
    fn drop(&mut self) {
        self.shutdown();
    }
}

pub async fn run_collector(command: &CollectorCommand) -> Result<String, CollectorError> {
    let output = Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| CollectorError::Spawn {
            program: command.program.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(CollectorError::Exit {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    String::from_utf8(output.stdout).map_err(|_| CollectorError::NonUtf8)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn shell(script: &str) -> CollectorCommand {
        CollectorCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
        }
    }

    #[tokio::test]
    async fn second_poll_is_skipped_while_running() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut poller = CollectorPoller::new(shell("sleep 2"), tx);
        assert_eq!(poller.poll(), PollOutcome::Spawned);
        assert!(poller.is_busy());
        assert_eq!(poller.poll(), PollOutcome::Busy);
        poller.shutdown();
        assert!(!poller.is_busy());
    }

    #[tokio::test]
    async fn output_is_delivered() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut poller = CollectorPoller::new(
            shell(r#"echo '{"cpu_usage": 12.5, "memory_usage": 40}'"#),
            tx,
        );
        assert_eq!(poller.poll(), PollOutcome::Spawned);
        match rx.recv().await {
            Some(CollectorMessage::Output(out)) => assert!(out.contains("cpu_usage")),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_program_reports_failure() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut poller = CollectorPoller::new(
            CollectorCommand {
                program: "/nonexistent/srmon-collector".to_string(),
                args: Vec::new(),
            },
            tx,
        );
        poller.poll();
        match rx.recv().await {
            Some(CollectorMessage::Failed(msg)) => assert!(msg.contains("failed to start")),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_zero_exit_is_a_failure() {
        let result = run_collector(&shell("echo boom >&2; exit 3")).await;
        match result {
            Err(CollectorError::Exit { stderr, .. }) => assert_eq!(stderr, "boom"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
