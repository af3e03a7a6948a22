//! Service frame loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::config::WheelConfig;
use crate::core::rng::{derive_spin_seed, DeterministicRng};
use crate::roster::{HealthProbe, ParticipantStore, WinnerRecorder};
use crate::wheel::engine::{SpinTicket, WheelEngine, WheelSnapshot};
use crate::wheel::entries::{EntrySet, WeightMap};
use crate::wheel::error::WheelError;
use crate::wheel::events::WheelEvent;
use crate::wheel::scheduler::ClockScheduler;

use super::{ServiceError, WheelCommand, WheelHandle};

/// Roster the service reads weights from and records winners into.
pub trait Roster: ParticipantStore + WinnerRecorder + HealthProbe + Send + Sync {}

impl<T: ParticipantStore + WinnerRecorder + HealthProbe + Send + Sync> Roster for T {}

type SharedRoster = Arc<RwLock<dyn Roster>>;

type Engine = WheelEngine<ClockScheduler, DeterministicRng>;

/// Builder and frame loop for the wheel service.
pub struct WheelService {
    config: WheelConfig,
    roster: Option<SharedRoster>,
}

impl WheelService {
    /// Validate `config` and prepare a service.
    pub fn new(config: WheelConfig) -> Result<Self, ServiceError> {
        config.validate()?;
        Ok(Self { config, roster: None })
    }

    /// Record winners into `roster` and spin with its weights by default.
    pub fn with_roster<T: Roster + 'static>(mut self, roster: Arc<RwLock<T>>) -> Self {
        self.roster = Some(roster as SharedRoster);
        self
    }

    /// Start the frame loop on the current tokio runtime.
    pub fn spawn(self) -> (WheelHandle, JoinHandle<()>) {
        let service = &self.config.service;
        let (command_tx, command_rx) = mpsc::channel(service.command_buffer);
        let (event_tx, _) = broadcast::channel(service.event_buffer);

        let session = session_id(service.seed);
        let engine = WheelEngine::new(
            self.config.engine.clone(),
            ClockScheduler::new(),
            DeterministicRng::new(derive_spin_seed(&session, &[], 0)),
        );
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());

        info!(
            "Wheel service starting at {} Hz (session {})",
            service.frame_rate,
            hex::encode(session)
        );

        let frame_interval = Duration::from_secs_f64(service.frame_interval_ms() / 1000.0);
        let runner = Runner {
            engine,
            session,
            spins: 0,
            current: None,
            roster: self.roster,
            snapshots: snapshot_tx,
            events: event_tx.clone(),
        };
        let task = tokio::spawn(runner.run(command_rx, frame_interval));

        (WheelHandle::new(command_tx, snapshot_rx, event_tx), task)
    }
}

/// Fixed seeds give a fixed session so spins replay exactly.
fn session_id(seed: Option<u64>) -> [u8; 16] {
    match seed {
        Some(seed) => {
            let mut id = [0u8; 16];
            id[..8].copy_from_slice(&seed.to_le_bytes());
            id[8..].copy_from_slice(&seed.to_be_bytes());
            id
        }
        None => Uuid::new_v4().into_bytes(),
    }
}

struct Runner {
    engine: Engine,
    session: [u8; 16],
    spins: u64,
    /// Entries of the spin in flight, for the recorder.
    current: Option<(u32, EntrySet)>,
    roster: Option<SharedRoster>,
    snapshots: watch::Sender<WheelSnapshot>,
    events: broadcast::Sender<WheelEvent>,
}

impl Runner {
    #[instrument(skip_all)]
    async fn run(mut self, mut commands: mpsc::Receiver<WheelCommand>, frame_interval: Duration) {
        let mut ticker = interval(frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let emitted = self.engine.pump();
                    self.publish(emitted).await;
                }
                command = commands.recv() => {
                    match command {
                        Some(WheelCommand::Spin { entries, weights, reply }) => {
                            let result = self.spin(entries, weights).await;
                            let emitted = self.engine.drain_events();
                            self.publish(emitted).await;
                            let _ = reply.send(result);
                        }
                        Some(WheelCommand::Reset { reply }) => {
                            let reset = self.engine.request_reset();
                            if reset {
                                self.current = None;
                            }
                            let emitted = self.engine.drain_events();
                            self.publish(emitted).await;
                            let _ = reply.send(reset);
                        }
                        Some(WheelCommand::Shutdown) | None => {
                            info!("Wheel service shutting down");
                            break;
                        }
                    }
                }
            }
        }
    }

    async fn spin(&mut self, entries: EntrySet, weights: Option<WeightMap>) -> Result<SpinTicket, WheelError> {
        let weights = match (weights, &self.roster) {
            (Some(weights), _) => Some(weights),
            (None, Some(roster)) => {
                let roster = roster.read().await;
                if roster.is_available() {
                    Some(roster.weight_map(&entries))
                } else {
                    warn!("Roster unavailable; spinning with uniform odds");
                    None
                }
            }
            (None, None) => None,
        };

        let seed = derive_spin_seed(&self.session, &entries, self.spins);
        let previous = self.engine.rng_mut().state();
        *self.engine.rng_mut() = DeterministicRng::new(seed);

        match self.engine.request_spin(entries.clone(), weights.as_ref()) {
            Ok(ticket) => {
                debug!("Spin {} seeded with {}", ticket.spin_id, hex::encode(seed.to_be_bytes()));
                self.spins += 1;
                self.current = Some((ticket.spin_id, entries));
                Ok(ticket)
            }
            Err(e) => {
                self.engine.rng_mut().set_state(previous);
                Err(e)
            }
        }
    }

    async fn publish(&mut self, emitted: Vec<WheelEvent>) {
        for event in emitted {
            if let Some(winner) = event.settled_winner() {
                self.record(event.spin_id, winner).await;
            }
            // No subscribers is fine.
            let _ = self.events.send(event);
        }
        self.snapshots.send_replace(self.engine.snapshot());
    }

    async fn record(&mut self, spin_id: u32, winner: &str) {
        let Some(roster) = &self.roster else {
            return;
        };
        let entries = match self.current.take() {
            Some((id, entries)) if id == spin_id => entries,
            _ => {
                warn!("No entries on file for settled spin {}", spin_id);
                return;
            }
        };

        let mut roster = roster.write().await;
        if !roster.is_available() {
            warn!("Roster unavailable; winner {} of spin {} not recorded", winner, spin_id);
            return;
        }
        if let Err(e) = roster.record_winner(winner, &entries) {
            error!("Failed to record winner {} for spin {}: {}", winner, spin_id, e);
        }
    }
}
