//! # Spin Wheel
//!
//! Weighted selection and rotation engine for a spinning prize wheel.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         SPIN WHEEL                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  ├── rng.rs      - Seeded Xorshift128+ PRNG, RandomSource    │
//! │  └── angle.rs    - Degree arithmetic                         │
//! │                                                              │
//! │  wheel/          - Selection & rotation engine               │
//! │  ├── entries.rs  - Entry snapshots and weight maps           │
//! │  ├── weights.rs  - Weight normalizer (Distribution)          │
//! │  ├── selection.rs- Weighted / uniform index draw             │
//! │  ├── planner.rs  - Winning index -> target rotation          │
//! │  ├── locator.rs  - Rotation -> segment under the pointer     │
//! │  ├── animation.rs- Spin tween and state machine data         │
//! │  ├── scheduler.rs- Frame scheduling capability               │
//! │  ├── engine.rs   - Engine: spin, idle, reconcile, cues       │
//! │  └── events.rs   - Wheel events                              │
//! │                                                              │
//! │  roster/         - Participant store & winner recorder       │
//! │  service/        - Real-time frame service (tokio)           │
//! │  config.rs       - Configuration                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Geometry Is Truth
//!
//! The winner reported for a spin is always the segment under the pointer
//! once the wheel stops. The index drawn by the selection engine only decides
//! where the wheel is aimed; if the two ever disagree the landed segment wins
//! and the discrepancy is logged.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod roster;
pub mod service;
pub mod wheel;

// Re-export commonly used types
pub use config::{EngineConfig, ServiceConfig, WheelConfig};
pub use crate::core::rng::{DeterministicRng, RandomSource};
pub use roster::{HealthProbe, InMemoryRoster, ParticipantStore, RosterError, WinnerRecorder};
pub use service::{ServiceError, WheelHandle, WheelService};
pub use wheel::engine::{SpinTicket, WheelEngine, WheelSnapshot};
pub use wheel::entries::{EntrySet, WeightMap};
pub use wheel::error::{WeightFault, WheelError};
pub use wheel::events::{WheelEvent, WheelEventData};
pub use wheel::scheduler::{FrameHandle, FrameScheduler, VirtualScheduler};
pub use wheel::weights::Distribution;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reference spin duration in milliseconds.
pub const SPIN_DURATION_MS: f64 = 3500.0;

/// Reference idle rotation per frame, in degrees.
pub const IDLE_STEP_DEGREES: f64 = 0.3;

/// Delay between settling and the winner cue, in milliseconds.
pub const WINNER_CUE_DELAY_MS: f64 = 200.0;

/// Reference frame rate (Hz) for real-time driving.
pub const FRAME_RATE: u32 = 60;

/// Minimum number of entries a spin requires.
pub const MIN_SPIN_ENTRIES: usize = 2;
