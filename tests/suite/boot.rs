use std::time::Duration;

use orbit_core::Shell;
use orbit_types::{BootPhase, BootTiming, SectionRegistry, ShellSettings};

use super::{FRAME, uniform_geometry};

fn booting_shell(tick_ms: u64, exit_ms: u64) -> Shell {
    let settings = ShellSettings {
        boot: BootTiming {
            tick: Duration::from_millis(tick_ms),
            exit_delay: Duration::from_millis(exit_ms),
        },
        ..ShellSettings::default()
    };
    let mut shell = Shell::mount(SectionRegistry::standard(), settings);
    shell.set_geometry(uniform_geometry(20), 20);
    shell
}

#[test]
fn boot_walks_phases_in_order_then_hands_off() {
    let mut shell = booting_shell(10, 100);
    assert!(!shell.is_interactive());
    assert_eq!(shell.boot_state().phase, BootPhase::Init);

    let mut phases = vec![shell.boot_state().phase];
    let mut last_progress = 0;
    for _ in 0..100 {
        shell.frame(Duration::from_millis(10));
        let state = shell.boot_state();
        assert!(state.progress >= last_progress);
        last_progress = state.progress;
        if phases.last() != Some(&state.phase) {
            phases.push(state.phase);
        }
    }
    assert_eq!(phases, [BootPhase::Init, BootPhase::Loading, BootPhase::Ready]);
    assert_eq!(shell.boot_state().progress, 100);
    assert!(shell.boot_state().exiting);
    assert!(!shell.is_interactive());

    shell.frame(Duration::from_millis(100));
    assert!(shell.is_interactive());
}

#[test]
fn navigation_is_inert_until_boot_completes() {
    let mut shell = booting_shell(45, 1200);
    shell.scroll_by(30);
    shell.frame(FRAME);
    assert_eq!(shell.scroll_evaluations(), 0);
    assert!(!shell.scrolled_past_threshold());
}

#[test]
fn teardown_mid_boot_never_hands_off() {
    let mut shell = booting_shell(10, 0);
    shell.frame(Duration::from_millis(200));
    shell.teardown();
    let frozen = shell.boot_state();
    shell.frame(Duration::from_secs(5));
    assert_eq!(shell.boot_state(), frozen);
    assert!(!shell.is_interactive());
}
