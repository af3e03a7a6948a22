//! Real-time Wheel Service
//!
//! Runs a [`WheelEngine`](crate::wheel::WheelEngine) on a tokio task, driven
//! at the configured frame rate.
//!
//! ## Module Structure
//!
//! - `runtime`: The frame loop and its command handling
//!
//! ## Channels
//!
//! - Commands (`mpsc`) with `oneshot` replies
//! - Snapshots (`watch`), refreshed every frame
//! - Events (`broadcast`)

pub mod runtime;

pub use runtime::{Roster, WheelService};

use tokio::sync::{broadcast, mpsc, oneshot, watch};

use crate::config::ConfigError;
use crate::wheel::engine::{SpinTicket, WheelSnapshot};
use crate::wheel::entries::{EntrySet, WeightMap};
use crate::wheel::error::WheelError;
use crate::wheel::events::WheelEvent;

/// Commands accepted by the service task.
#[derive(Debug)]
pub enum WheelCommand {
    /// Start a spin.
    Spin {
        /// Entries for this spin.
        entries: EntrySet,
        /// Explicit weights. `None` uses the roster's weights if there is one.
        weights: Option<WeightMap>,
        /// Reply channel.
        reply: oneshot::Sender<Result<SpinTicket, WheelError>>,
    },
    /// Return the wheel to idle.
    Reset {
        /// Whether anything was reset.
        reply: oneshot::Sender<bool>,
    },
    /// Stop the task.
    Shutdown,
}

/// Service errors.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration rejected.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The engine refused the request.
    #[error("Wheel error: {0}")]
    Wheel(#[from] WheelError),

    /// The service task is no longer running.
    #[error("Wheel service stopped")]
    Stopped,
}

/// Cloneable handle to a running [`WheelService`].
#[derive(Clone, Debug)]
pub struct WheelHandle {
    commands: mpsc::Sender<WheelCommand>,
    snapshots: watch::Receiver<WheelSnapshot>,
    events: broadcast::Sender<WheelEvent>,
}

impl WheelHandle {
    pub(crate) fn new(
        commands: mpsc::Sender<WheelCommand>,
        snapshots: watch::Receiver<WheelSnapshot>,
        events: broadcast::Sender<WheelEvent>,
    ) -> Self {
        Self {
            commands,
            snapshots,
            events,
        }
    }

    /// Request a spin.
    pub async fn spin(
        &self,
        entries: impl Into<EntrySet>,
        weights: Option<WeightMap>,
    ) -> Result<SpinTicket, ServiceError> {
        let (reply, rx) = oneshot::channel();
        self.send(WheelCommand::Spin {
            entries: entries.into(),
            weights,
            reply,
        })
        .await?;
        Ok(rx.await.map_err(|_| ServiceError::Stopped)??)
    }

    /// Request a reset. Returns whether the wheel was spinning or settled.
    pub async fn reset(&self) -> Result<bool, ServiceError> {
        let (reply, rx) = oneshot::channel();
        self.send(WheelCommand::Reset { reply }).await?;
        rx.await.map_err(|_| ServiceError::Stopped)
    }

    /// Stop the service task.
    pub async fn shutdown(&self) -> Result<(), ServiceError> {
        self.send(WheelCommand::Shutdown).await
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> WheelSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Watch snapshots as they change.
    pub fn watch(&self) -> watch::Receiver<WheelSnapshot> {
        self.snapshots.clone()
    }

    /// Subscribe to wheel events from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<WheelEvent> {
        self.events.subscribe()
    }

    async fn send(&self, command: WheelCommand) -> Result<(), ServiceError> {
        self.commands.send(command).await.map_err(|_| ServiceError::Stopped)
    }
}
