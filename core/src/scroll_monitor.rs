//! Frame-coalesced scroll position sampling.

/// Derives "scrolled past threshold" from scroll notifications, evaluating
/// at most once per frame.
///
/// Notifications only record the latest offset; [`ScrollMonitor::on_frame`]
/// evaluates it. Any number of notifications between two frames cost one
/// evaluation.
#[derive(Debug, Clone)]
pub struct ScrollMonitor {
    threshold: u16,
    pending: Option<u16>,
    scrolled: bool,
    evaluations: u64,
}

impl ScrollMonitor {
    #[must_use]
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold,
            pending: None,
            scrolled: false,
            evaluations: 0,
        }
    }

    /// Record a scroll notification. Last write wins until the next frame.
    pub fn notify(&mut self, offset: u16) {
        self.pending = Some(offset);
    }

    /// Evaluate the pending offset, if any. Returns the new flag only when it
    /// changed.
    pub fn on_frame(&mut self) -> Option<bool> {
        let offset = self.pending.take()?;
        self.evaluations += 1;

        let scrolled = offset > self.threshold;
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        Some(scrolled)
    }

    #[must_use]
    pub fn scrolled_past_threshold(&self) -> bool {
        self.scrolled
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Total evaluations performed so far.
    #[must_use]
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}

#[cfg(test)]
mod tests {
    use super::ScrollMonitor;

    #[test]
    fn burst_within_one_frame_is_evaluated_once() {
        let mut monitor = ScrollMonitor::new(2);
        for offset in 0..50 {
            monitor.notify(offset);
        }
        assert_eq!(monitor.on_frame(), Some(true));
        assert_eq!(monitor.evaluations(), 1);
        assert_eq!(monitor.on_frame(), None);
        assert_eq!(monitor.evaluations(), 1);
    }

    #[test]
    fn only_last_notification_counts() {
        let mut monitor = ScrollMonitor::new(2);
        monitor.notify(40);
        monitor.notify(1);
        assert_eq!(monitor.on_frame(), None);
        assert!(!monitor.scrolled_past_threshold());
    }

    #[test]
    fn reports_only_on_change() {
        let mut monitor = ScrollMonitor::new(2);
        monitor.notify(5);
        assert_eq!(monitor.on_frame(), Some(true));
        monitor.notify(9);
        assert_eq!(monitor.on_frame(), None);
        monitor.notify(2);
        assert_eq!(monitor.on_frame(), Some(false));
        assert_eq!(monitor.evaluations(), 3);
    }

    #[test]
    fn threshold_is_strict() {
        let mut monitor = ScrollMonitor::new(2);
        monitor.notify(2);
        assert_eq!(monitor.on_frame(), None);
        monitor.notify(3);
        assert_eq!(monitor.on_frame(), Some(true));
    }
}
