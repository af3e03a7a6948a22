//! Frame Scheduling
//!
//! The engine never owns a timer. It asks a [`FrameScheduler`] for "the next
//! frame" and gets a handle back; the host later hands due handles to the
//! engine. Swapping the scheduler swaps the clock: [`VirtualScheduler`] for
//! tests and simulation, [`ClockScheduler`] for wall-clock driving.

use std::collections::BTreeSet;
use std::time::Instant;

/// Time in milliseconds on a scheduler's clock.
pub type Millis = f64;

/// Opaque handle for one requested frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Raw handle id.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Per-frame callback capability.
pub trait FrameScheduler {
    /// Current time on this scheduler's clock.
    fn now(&self) -> Millis;

    /// Request one callback at the next frame.
    fn schedule_next(&mut self) -> FrameHandle;

    /// Cancel a pending request. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: FrameHandle);

    /// Remove and return every request whose frame has arrived, oldest first.
    fn take_due(&mut self) -> Vec<FrameHandle>;

    /// Number of requests still waiting.
    fn pending(&self) -> usize;
}

/// Pending-request bookkeeping shared by the schedulers in this module.
#[derive(Debug, Default)]
struct FrameQueue {
    next_id: u64,
    pending: BTreeSet<FrameHandle>,
}

impl FrameQueue {
    fn push(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending.insert(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.pending.remove(&handle);
    }

    fn drain(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }
}

// =============================================================================
// VIRTUAL SCHEDULER
// =============================================================================

/// Scheduler on a virtual clock that only moves when told to.
///
/// Every pending request becomes due once the clock is advanced.
#[derive(Debug)]
pub struct VirtualScheduler {
    now: Millis,
    frame_interval: Millis,
    queue: FrameQueue,
    armed: bool,
}

impl Default for VirtualScheduler {
    fn default() -> Self {
        Self::new(1000.0 / crate::FRAME_RATE as f64)
    }
}

impl VirtualScheduler {
    /// Create a scheduler at time 0 with the given frame interval (ms).
    pub fn new(frame_interval: Millis) -> Self {
        Self {
            now: 0.0,
            frame_interval,
            queue: FrameQueue::default(),
            armed: false,
        }
    }

    /// Length of one frame in ms.
    pub fn frame_interval(&self) -> Millis {
        self.frame_interval
    }

    /// Advance the clock by one frame.
    pub fn advance_frame(&mut self) {
        self.advance(self.frame_interval);
    }

    /// Advance the clock by `ms`. Requests made before this call become due.
    pub fn advance(&mut self, ms: Millis) {
        self.now += ms.max(0.0);
        self.armed = true;
    }
}

impl FrameScheduler for VirtualScheduler {
    fn now(&self) -> Millis {
        self.now
    }

    fn schedule_next(&mut self) -> FrameHandle {
        self.queue.push()
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.queue.cancel(handle);
    }

    fn take_due(&mut self) -> Vec<FrameHandle> {
        if !std::mem::take(&mut self.armed) {
            return Vec::new();
        }
        self.queue.drain()
    }

    fn pending(&self) -> usize {
        self.queue.pending.len()
    }
}

// =============================================================================
// CLOCK SCHEDULER
// =============================================================================

/// Scheduler on the monotonic wall clock.
///
/// The host calls [`take_due`](FrameScheduler::take_due) once per display
/// frame; every request made since the previous frame is delivered.
#[derive(Debug)]
pub struct ClockScheduler {
    origin: Instant,
    queue: FrameQueue,
}

impl Default for ClockScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockScheduler {
    /// Create a scheduler whose clock starts now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            queue: FrameQueue::default(),
        }
    }
}

impl FrameScheduler for ClockScheduler {
    fn now(&self) -> Millis {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn schedule_next(&mut self) -> FrameHandle {
        self.queue.push()
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.queue.cancel(handle);
    }

    fn take_due(&mut self) -> Vec<FrameHandle> {
        self.queue.drain()
    }

    fn pending(&self) -> usize {
        self.queue.pending.len()
    }
}
