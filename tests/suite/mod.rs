mod boot;
mod config;
mod navigation;

use std::time::Duration;

use orbit_core::Shell;
use orbit_types::{PageGeometry, SectionId, SectionRegistry, ShellSettings};

pub const FRAME: Duration = Duration::from_millis(16);

/// Interactive shell over five 20-row sections in a 20-row viewport.
pub fn interactive_shell() -> Shell {
    let settings = ShellSettings {
        skip_boot: true,
        ..ShellSettings::default()
    };
    let mut shell = Shell::mount(SectionRegistry::standard(), settings);
    shell.set_geometry(uniform_geometry(20), 20);
    shell.frame(FRAME);
    shell
}

pub fn uniform_geometry(height: u16) -> PageGeometry {
    PageGeometry::stacked(SectionRegistry::standard().ids().map(|id| (id, height)))
}

pub fn run_frames(shell: &mut Shell, frames: usize) {
    for _ in 0..frames {
        shell.frame(FRAME);
    }
}

/// Long enough for any smooth scroll to finish.
pub const SETTLE_FRAMES: usize = 60;

pub fn ids() -> Vec<SectionId> {
    SectionRegistry::standard().ids().collect()
}
