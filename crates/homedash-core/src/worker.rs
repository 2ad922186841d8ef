//! Background worker for device requests.
//!
//! The [`DeviceWorker`] keeps all HTTP traffic off the UI loop. It receives
//! [`Command`]s, polls `/status` on a fixed cadence, and sends
//! [`DeviceEvent`]s back.
//!
//! # Architecture
//!
//! The worker runs in its own tokio task and uses `tokio::select!` to handle:
//! - The periodic poll tick (and one poll at startup)
//! - Incoming commands from the UI
//! - Completions of request tasks it spawned
//!
//! Each request runs in its own task so a slow device never blocks the
//! schedule. Requests are tracked per [`RequestKind`] in a [`RequestSlot`]:
//! a newer request of the same kind cancels the older one, and a completion
//! that is no longer current is dropped instead of being forwarded.
//!
//! Scheduled ticks do not supersede a poll that is still running; they are
//! skipped, so a slow poll can still reach its deadline and report
//! [`PollFailure::Timeout`]. An explicit [`Command::Poll`] always supersedes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use homedash_types::DeviceSnapshot;

use crate::error::{Error, Result};
use crate::messages::{Command, DeviceEvent, RequestKind};
use crate::slot::RequestSlot;
use crate::traits::DeviceApi;

/// Default cadence of status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Default deadline of a single status poll.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(4000);

/// Shortest accepted poll interval; `tokio::time::interval` rejects zero.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Timing configuration for the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Time between scheduled polls.
    pub poll_interval: Duration,
    /// Deadline for each status request.
    pub poll_timeout: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

/// Result of a request task, tagged with the slot generation it ran under.
#[derive(Debug)]
struct Completion {
    kind: RequestKind,
    generation: u64,
    outcome: Outcome,
}

#[derive(Debug)]
enum Outcome {
    Status(Result<DeviceSnapshot>),
    Command(Result<()>),
}

/// Background worker that performs device requests.
pub struct DeviceWorker<A> {
    /// Device API implementation.
    api: Arc<A>,
    /// Receiver for commands from the UI loop.
    command_rx: mpsc::Receiver<Command>,
    /// Sender for events back to the UI loop.
    event_tx: mpsc::Sender<DeviceEvent>,
    /// Timing configuration.
    config: WorkerConfig,
    /// Current request per kind.
    slots: HashMap<RequestKind, RequestSlot>,
}

impl<A> DeviceWorker<A>
where
    A: DeviceApi + 'static,
{
    /// Create a new device worker.
    ///
    /// # Arguments
    ///
    /// * `api` - Device API used for all requests
    /// * `command_rx` - Channel receiver for commands from the UI
    /// * `event_tx` - Channel sender for events to the UI
    /// * `config` - Poll cadence and deadline
    pub fn new(
        api: Arc<A>,
        command_rx: mpsc::Receiver<Command>,
        event_tx: mpsc::Sender<DeviceEvent>,
        mut config: WorkerConfig,
    ) -> Self {
        config.poll_interval = config.poll_interval.max(MIN_POLL_INTERVAL);
        let slots = RequestKind::ALL
            .iter()
            .map(|kind| (*kind, RequestSlot::new()))
            .collect();

        Self {
            api,
            command_rx,
            event_tx,
            config,
            slots,
        }
    }

    /// Run the worker's main loop.
    ///
    /// This method consumes the worker and runs until a [`Command::Shutdown`]
    /// is received or the command channel is closed. The first poll is issued
    /// immediately.
    pub async fn run(mut self) {
        info!(
            url = self.api.base_url(),
            interval = ?self.config.poll_interval,
            timeout = ?self.config.poll_timeout,
            "DeviceWorker started"
        );

        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();
        let mut ticker = interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.slot(RequestKind::Status).is_in_flight() {
                        debug!("Previous poll still in flight, skipping tick");
                    } else {
                        self.start(Command::Poll, &done_tx);
                    }
                }
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(Command::Shutdown) => {
                            info!("DeviceWorker received shutdown command");
                            break;
                        }
                        Some(cmd) => {
                            info!(?cmd, "Handling command");
                            self.start(cmd, &done_tx);
                        }
                        None => {
                            info!("Command channel closed, shutting down worker");
                            break;
                        }
                    }
                }
                Some(done) = done_rx.recv() => {
                    if !self.finish(done).await {
                        info!("Event channel closed, shutting down worker");
                        break;
                    }
                }
            }
        }

        for slot in self.slots.values_mut() {
            slot.cancel();
        }
        info!("DeviceWorker stopped");
    }

    fn slot(&mut self, kind: RequestKind) -> &mut RequestSlot {
        self.slots.entry(kind).or_default()
    }

    /// Spawn the request for `cmd`, superseding any request of the same kind.
    fn start(&mut self, cmd: Command, done_tx: &mpsc::UnboundedSender<Completion>) {
        let Some(kind) = cmd.kind() else {
            return;
        };

        let ticket = self.slot(kind).begin();
        let api = Arc::clone(&self.api);
        let done_tx = done_tx.clone();
        let poll_timeout = self.config.poll_timeout;

        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = ticket.token.cancelled() => {
                    debug!(
                        kind = kind.name(),
                        generation = ticket.generation,
                        "Request superseded"
                    );
                    return;
                }
                outcome = perform(api.as_ref(), &cmd, poll_timeout) => outcome,
            };

            // The worker may already be gone; nothing to report to then.
            let _ = done_tx.send(Completion {
                kind,
                generation: ticket.generation,
                outcome,
            });
        });
    }

    /// Forward a completion if it is still current.
    ///
    /// Returns `false` when the UI side has gone away.
    async fn finish(&mut self, done: Completion) -> bool {
        if !self.slot(done.kind).finish(done.generation) {
            warn!(
                kind = done.kind.name(),
                generation = done.generation,
                "Discarding stale completion"
            );
            return true;
        }

        let event = match done.outcome {
            Outcome::Status(Ok(snapshot)) => {
                debug!(?snapshot, "Poll succeeded");
                DeviceEvent::StatusFetched {
                    snapshot,
                    received_at: Local::now(),
                }
            }
            Outcome::Status(Err(e)) => {
                warn!(error = %e, "Poll failed");
                DeviceEvent::PollFailed {
                    failure: e.poll_failure(),
                    error: e.to_string(),
                }
            }
            Outcome::Command(Ok(())) => {
                info!(kind = done.kind.name(), "Command succeeded");
                DeviceEvent::CommandSucceeded { kind: done.kind }
            }
            Outcome::Command(Err(e)) => {
                warn!(kind = done.kind.name(), error = %e, "Command failed");
                DeviceEvent::CommandFailed {
                    kind: done.kind,
                    error: e.to_string(),
                }
            }
        };

        self.event_tx.send(event).await.is_ok()
    }
}

/// Perform one request. Status polls are bounded by `poll_timeout`; commands
/// rely on the transport's own timeout.
async fn perform<A: DeviceApi + ?Sized>(api: &A, cmd: &Command, poll_timeout: Duration) -> Outcome {
    match cmd {
        Command::Poll => {
            let result = match tokio::time::timeout(poll_timeout, api.status()).await {
                Ok(result) => result,
                Err(_) => Err(Error::timeout("status", poll_timeout)),
            };
            Outcome::Status(result)
        }
        cmd => Outcome::Command(api.send(cmd).await),
    }
}
