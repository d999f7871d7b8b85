//! Single-owner game session on tokio.
//!
//! [`GameSession::spawn`] moves an engine and its state into a worker task.
//! Callers talk to it through a cloneable [`SessionHandle`]; every accepted
//! command, timer tick and delayed follow-up is broadcast as a
//! [`SessionUpdate`] snapshot.
//!
//! ```no_run
//! use party_board::core::{GameConfig, PlayerSetup};
//! use party_board::engine::GameEngineBuilder;
//! use party_board::session::{GameSession, SessionConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let (engine, state) = GameEngineBuilder::new(GameConfig::default()).build()?;
//! let session = GameSession::spawn(engine, state, SessionConfig::default());
//! let handle = session.handle();
//!
//! let mut updates = handle.subscribe();
//! handle.confirm_players(vec![PlayerSetup::new("Ana"), PlayerSetup::new("Ben")]).await?;
//! handle.roll().await?;
//!
//! while let Ok(update) = updates.recv().await {
//!     println!("{} events", update.state.history.len());
//! }
//! # Ok(())
//! # }
//! ```

mod handle;
mod worker;

use std::time::Duration;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;

pub use handle::SessionHandle;

use crate::core::GameState;
use crate::engine::{GameEngine, Notice, Rejection};
use worker::{Request, SessionWorker};

/// Session tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Resolve rolls automatically once the settle window passes.
    pub auto_resolve: bool,
    /// Capacity of the request and update channels.
    pub channel_capacity: usize,
    /// Real time per timer second.
    pub tick_period: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_resolve: true,
            channel_capacity: 64,
            tick_period: Duration::from_secs(1),
        }
    }
}

impl SessionConfig {
    /// Leave roll resolution to the caller (animation-driven hosts).
    #[must_use]
    pub fn with_manual_resolve(mut self) -> Self {
        self.auto_resolve = false;
        self
    }

    #[must_use]
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }
}

/// Snapshot published after every applied change.
#[derive(Clone, Debug)]
pub struct SessionUpdate {
    pub state: GameState,
    pub notices: Vec<Notice>,
}

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("session command channel closed")]
    CommandChannelClosed,

    #[error("session reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

/// A running session: the worker task plus a handle to it.
pub struct GameSession {
    handle: SessionHandle,
    worker: JoinHandle<()>,
}

impl GameSession {
    /// Start the worker on the current tokio runtime.
    pub fn spawn(engine: GameEngine, state: GameState, config: SessionConfig) -> Self {
        let capacity = config.channel_capacity.max(1);
        let (request_tx, request_rx) = mpsc::channel(capacity);
        let (update_tx, _) = broadcast::channel(capacity);

        let worker = SessionWorker::new(engine, state, config, request_rx, update_tx.clone());
        let worker = tokio::spawn(worker.run());

        Self {
            handle: SessionHandle::new(request_tx, update_tx),
            worker,
        }
    }

    #[must_use]
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Stop the worker, cancelling pending follow-ups, and wait for it.
    pub async fn shutdown(self) -> Result<()> {
        self.handle
            .request_tx
            .send(Request::Shutdown)
            .await
            .map_err(|_| SessionError::CommandChannelClosed)?;
        self.worker.await.map_err(SessionError::WorkerJoin)
    }
}
