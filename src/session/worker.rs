//! Worker task that owns the authoritative [`GameState`].
//!
//! Serializes every engine call: presentation requests, one-second timer
//! ticks and delayed follow-ups all arrive on channels and are applied one
//! at a time.

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, warn};

use super::{SessionConfig, SessionUpdate};
use crate::core::GameState;
use crate::engine::{Command, FollowUp, GameEngine, Notice, Rejection};

/// Messages from [`super::SessionHandle`] to the worker.
pub(crate) enum Request {
    Apply {
        command: Command,
        reply: oneshot::Sender<Result<GameState, Rejection>>,
    },
    QueryState {
        reply: oneshot::Sender<GameState>,
    },
    Shutdown,
}

/// A follow-up whose delay has elapsed.
struct Due {
    epoch: u64,
    follow_up: FollowUp,
}

pub(crate) struct SessionWorker {
    engine: GameEngine,
    state: GameState,
    config: SessionConfig,
    request_rx: mpsc::Receiver<Request>,
    update_tx: broadcast::Sender<SessionUpdate>,
    due_tx: mpsc::UnboundedSender<Due>,
    due_rx: mpsc::UnboundedReceiver<Due>,
    pending: Vec<JoinHandle<()>>,
    epoch: u64,
}

impl SessionWorker {
    pub(crate) fn new(
        engine: GameEngine,
        state: GameState,
        config: SessionConfig,
        request_rx: mpsc::Receiver<Request>,
        update_tx: broadcast::Sender<SessionUpdate>,
    ) -> Self {
        let (due_tx, due_rx) = mpsc::unbounded_channel();
        Self {
            engine,
            state,
            config,
            request_rx,
            update_tx,
            due_tx,
            due_rx,
            pending: Vec::new(),
            epoch: 0,
        }
    }

    pub(crate) async fn run(mut self) {
        let mut ticker = interval(self.config.tick_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.reset();

        loop {
            tokio::select! {
                request = self.request_rx.recv() => match request {
                    Some(Request::Apply { command, reply }) => {
                        let result = self.apply(command, &mut ticker);
                        let _ = reply.send(result);
                    }
                    Some(Request::QueryState { reply }) => {
                        let _ = reply.send(self.state.clone());
                    }
                    Some(Request::Shutdown) | None => break,
                },
                Some(due) = self.due_rx.recv() => {
                    self.deliver(due, &mut ticker);
                }
                _ = ticker.tick(), if self.state.timer.is_active() => {
                    let _ = self.apply(Command::Tick, &mut ticker);
                }
            }
        }

        self.cancel_pending();
        debug!(target: "session::worker", "session worker stopped");
    }

    fn apply(&mut self, command: Command, ticker: &mut Interval) -> Result<GameState, Rejection> {
        let is_tick = command == Command::Tick;
        let is_reset = command == Command::Reset;

        match self.engine.dispatch(&self.state, command) {
            Ok(step) => {
                if is_reset {
                    self.cancel_pending();
                }
                let timer_before = self.state.timer;
                self.state = step.state;

                if let Some(follow_up) = step.follow_up {
                    self.schedule(follow_up);
                }
                if !is_tick && self.state.timer.is_active() && self.state.timer != timer_before {
                    ticker.reset();
                }

                let _ = self.update_tx.send(SessionUpdate {
                    state: self.state.clone(),
                    notices: step.notices,
                });
                Ok(self.state.clone())
            }
            Err(rejection) => {
                if rejection.is_advisory() {
                    warn!(target: "session::worker", %rejection, "command rejected");
                    let _ = self.update_tx.send(SessionUpdate {
                        state: self.state.clone(),
                        notices: vec![Notice::Rejected(rejection.clone())],
                    });
                } else {
                    debug!(target: "session::worker", %rejection, "command ignored");
                }
                Err(rejection)
            }
        }
    }

    fn schedule(&mut self, follow_up: FollowUp) {
        if matches!(follow_up, FollowUp::ResolveRoll { .. }) && !self.config.auto_resolve {
            return;
        }

        self.pending.retain(|task| !task.is_finished());

        let due_tx = self.due_tx.clone();
        let epoch = self.epoch;
        let task = tokio::spawn(async move {
            tokio::time::sleep(follow_up.delay()).await;
            let _ = due_tx.send(Due { epoch, follow_up });
        });
        self.pending.push(task);
    }

    fn deliver(&mut self, due: Due, ticker: &mut Interval) {
        if due.epoch != self.epoch || !due.follow_up.is_current(&self.state) {
            debug!(target: "session::worker", follow_up = ?due.follow_up, "stale follow-up dropped");
            return;
        }
        let _ = self.apply(due.follow_up.command(), ticker);
    }

    fn cancel_pending(&mut self) {
        for task in self.pending.drain(..) {
            task.abort();
        }
        self.epoch += 1;
    }
}
