//! Generation counter that keeps overlapping list refreshes well-defined.
//!
//! Every refresh takes a ticket before its request goes out. When the
//! response lands it is applied only if no newer ticket was issued in the
//! meantime; otherwise it is stale and dropped.
//!
//! Tickets also belong to a session epoch. Logout starts a new epoch, and work
//! begun in an earlier epoch can no longer start a refresh.

/// Ticket handed out by [`RefreshGuard::begin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Session period a piece of async work was started in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Epoch(u64);

#[derive(Debug, Default)]
pub struct RefreshGuard {
    latest: u64,
    epoch: u64,
}

impl RefreshGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> Epoch {
        Epoch(self.epoch)
    }

    /// Start a refresh; any ticket issued earlier becomes stale
    pub fn begin(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    /// Start a refresh on behalf of work begun in `epoch`.
    ///
    /// Returns `None` without issuing a ticket when the session has ended
    /// since then, so the current refresh stays current.
    pub fn begin_in(&mut self, epoch: Epoch) -> Option<Generation> {
        if epoch != self.epoch() {
            return None;
        }
        Some(self.begin())
    }

    /// Whether results for `generation` may still be applied
    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.latest
    }

    /// End the session: every outstanding ticket and epoch becomes stale (logout)
    pub fn invalidate(&mut self) {
        self.latest += 1;
        self.epoch += 1;
    }
}
