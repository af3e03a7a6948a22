//! Wheel Engine Module
//!
//! Weighted selection, rotation planning, and the frame-driven spin
//! animation.
//!
//! ## Module Structure
//!
//! - `entries`: Entry snapshots and weight maps
//! - `weights`: Weight normalizer
//! - `selection`: Index draw from a distribution
//! - `planner`: Winning index to target rotation
//! - `locator`: Rotation to segment under the pointer
//! - `animation`: Tween and state machine data
//! - `scheduler`: Frame scheduling capability
//! - `engine`: The state machine
//! - `events`: Events for hosts and cue playback
//! - `error`: Engine errors

pub mod animation;
pub mod engine;
pub mod entries;
pub mod error;
pub mod events;
pub mod locator;
pub mod planner;
pub mod scheduler;
pub mod selection;
pub mod weights;

// Re-export key types
pub use animation::{AnimationState, WheelPhase};
pub use engine::{SpinTicket, WheelEngine, WheelSnapshot};
pub use entries::{EntrySet, WeightMap};
pub use error::{WeightFault, WheelError};
pub use events::{WheelEvent, WheelEventData};
pub use locator::segment_at;
pub use planner::{RotationPlan, RotationPlanner};
pub use scheduler::{ClockScheduler, FrameHandle, FrameScheduler, Millis, VirtualScheduler};
pub use selection::select_index;
pub use weights::Distribution;
