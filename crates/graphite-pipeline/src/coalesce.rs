//! Render-clock debounce for sketch regeneration.
//!
//! Parameter changes call [`FrameCoalescer::request`] as often as they
//! like; the display loop calls [`FrameCoalescer::take`] once per frame
//! and regenerates only when something was requested since the last
//! take. Each request bumps a generation counter. Only the latest
//! request matters.

/// Coalesces regeneration requests to at most one per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameCoalescer {
    requested: u64,
    taken: u64,
}

impl FrameCoalescer {
    /// Create a coalescer with nothing pending.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            requested: 0,
            taken: 0,
        }
    }

    /// Record a regeneration request and return its generation.
    pub const fn request(&mut self) -> u64 {
        self.requested = self.requested.wrapping_add(1);
        self.requested
    }

    /// Whether a request is waiting for the next frame.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.requested != self.taken
    }

    /// Claim the pending request for this frame, if any.
    ///
    /// However many requests arrived since the last call, this yields
    /// a single generation: the latest.
    pub const fn take(&mut self) -> Option<u64> {
        if self.is_pending() {
            self.taken = self.requested;
            Some(self.requested)
        } else {
            None
        }
    }

    /// Mark everything requested so far as satisfied.
    ///
    /// Used when a regeneration ran eagerly outside the frame loop.
    pub const fn settle(&mut self) -> u64 {
        self.taken = self.requested;
        self.requested
    }
}
