/// Handle to a requested display-frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u32);

/// Host frame scheduling: "run once on the next display refresh", cancellable.
///
/// When a requested frame fires, the host calls [`Scrubber::on_frame`]
/// with the handle it returned from `request`.
///
/// [`Scrubber::on_frame`]: crate::scrubber::Scrubber::on_frame
pub trait FrameScheduler {
    /// Request a callback on the next display frame.
    fn request(&mut self) -> FrameHandle;

    /// Cancel a frame that has not fired yet. Unknown handles are ignored.
    fn cancel(&mut self, handle: FrameHandle);

    /// Notification that `handle` fired and its resources can be released.
    fn fired(&mut self, _handle: FrameHandle) {}
}

/// A scheduler whose frames fire only when the owner says so.
/// Used by native hosts and tests to step animations deterministically.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u32,
    pending: Vec<FrameHandle>,
    requested: usize,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames requested and neither fired nor cancelled.
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    /// Total number of `request` calls.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Total number of effective `cancel` calls.
    pub fn cancelled(&self) -> usize {
        self.cancelled
    }

    /// Pop the oldest pending frame so the caller can fire it.
    pub fn take_next(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.requested += 1;
        self.pending.push(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }

    fn fired(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_and_take() {
        let mut s = ManualScheduler::new();
        let a = s.request();
        let b = s.request();
        assert_ne!(a, b);
        assert_eq!(s.requested(), 2);
        assert_eq!(s.take_next(), Some(a));
        assert_eq!(s.pending(), &[b]);
    }

    #[test]
    fn cancel_unknown_is_ignored() {
        let mut s = ManualScheduler::new();
        let a = s.request();
        s.cancel(FrameHandle(99));
        assert_eq!(s.cancelled(), 0);
        s.cancel(a);
        assert_eq!(s.cancelled(), 1);
        assert!(s.pending().is_empty());
        assert_eq!(s.take_next(), None);
    }
}
