//! Cloneable façade over the session worker's channels.

use tokio::sync::{broadcast, mpsc, oneshot};

use super::worker::Request;
use super::{Result, SessionError, SessionUpdate};
use crate::core::{GameState, PlayerSetup};
use crate::engine::Command;

/// Client-side handle to a running session.
#[derive(Clone)]
pub struct SessionHandle {
    pub(super) request_tx: mpsc::Sender<Request>,
    update_tx: broadcast::Sender<SessionUpdate>,
}

impl SessionHandle {
    pub(super) fn new(
        request_tx: mpsc::Sender<Request>,
        update_tx: broadcast::Sender<SessionUpdate>,
    ) -> Self {
        Self {
            request_tx,
            update_tx,
        }
    }

    /// Apply a command and return the resulting state.
    pub async fn send(&self, command: Command) -> Result<GameState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.request_tx
            .send(Request::Apply {
                command,
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::CommandChannelClosed)?;

        Ok(reply_rx.await.map_err(SessionError::ReplyChannelClosed)??)
    }

    /// Current state snapshot.
    pub async fn state(&self) -> Result<GameState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.request_tx
            .send(Request::QueryState { reply: reply_tx })
            .await
            .map_err(|_| SessionError::CommandChannelClosed)?;

        reply_rx.await.map_err(SessionError::ReplyChannelClosed)
    }

    /// Receive every update published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionUpdate> {
        self.update_tx.subscribe()
    }

    pub async fn confirm_players(&self, setups: Vec<PlayerSetup>) -> Result<GameState> {
        self.send(Command::ConfirmPlayers(setups)).await
    }

    pub async fn roll(&self) -> Result<GameState> {
        self.send(Command::Roll).await
    }

    pub async fn reroll(&self) -> Result<GameState> {
        self.send(Command::Reroll).await
    }

    pub async fn resolve_roll(&self) -> Result<GameState> {
        self.send(Command::ResolveRoll).await
    }

    pub async fn choose_option(&self, option: impl Into<String>) -> Result<GameState> {
        self.send(Command::ChooseOption(option.into())).await
    }

    pub async fn complete_action(&self) -> Result<GameState> {
        self.send(Command::CompleteAction).await
    }

    pub async fn use_extra_action(&self) -> Result<GameState> {
        self.send(Command::UseExtraAction).await
    }

    pub async fn next_turn(&self) -> Result<GameState> {
        self.send(Command::NextTurn).await
    }

    pub async fn reset_timer(&self) -> Result<GameState> {
        self.send(Command::ResetTimer).await
    }

    pub async fn set_category(&self, name: impl Into<String>, enabled: bool) -> Result<GameState> {
        self.send(Command::SetCategory {
            name: name.into(),
            enabled,
        })
        .await
    }

    pub async fn reset(&self) -> Result<GameState> {
        self.send(Command::Reset).await
    }
}
