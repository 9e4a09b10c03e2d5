//! Boot sequence state.

pub const BOOT_PROGRESS_MAX: u8 = 100;
pub const BOOT_LOADING_THRESHOLD: u8 = 33;
pub const BOOT_READY_THRESHOLD: u8 = 66;

/// Phase of the boot sequence. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum BootPhase {
    #[default]
    Init,
    Loading,
    Ready,
}

impl BootPhase {
    /// One-directional transition table keyed on progress thresholds.
    ///
    /// Each phase only knows its successor, so a phase is never skipped and
    /// never revisited.
    #[must_use]
    pub const fn next_for(self, progress: u8) -> Self {
        match self {
            Self::Init if progress >= BOOT_LOADING_THRESHOLD => Self::Loading,
            Self::Loading if progress >= BOOT_READY_THRESHOLD => Self::Ready,
            other => other,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Init => "INITIALIZING",
            Self::Loading => "LOADING SYSTEMS",
            Self::Ready => "READY",
        }
    }
}

/// Snapshot of the boot sequence exposed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BootState {
    pub progress: u8,
    pub phase: BootPhase,
    pub exiting: bool,
}

impl BootState {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress >= BOOT_PROGRESS_MAX
    }
}

#[cfg(test)]
mod tests {
    use super::BootPhase;

    #[test]
    fn init_waits_for_loading_threshold() {
        assert_eq!(BootPhase::Init.next_for(32), BootPhase::Init);
        assert_eq!(BootPhase::Init.next_for(33), BootPhase::Loading);
    }

    #[test]
    fn init_never_jumps_to_ready() {
        assert_eq!(BootPhase::Init.next_for(90), BootPhase::Loading);
    }

    #[test]
    fn ready_is_terminal() {
        assert_eq!(BootPhase::Ready.next_for(0), BootPhase::Ready);
        assert_eq!(BootPhase::Loading.next_for(10), BootPhase::Loading);
    }
}
