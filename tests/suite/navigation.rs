use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use orbit_core::{CONTACT_FORM, FocusedInput};
use orbit_types::{PageGeometry, SectionId, SectionSpan};

use super::{FRAME, SETTLE_FRAMES, ids, interactive_shell, run_frames};

fn contact_input() -> FocusedInput {
    FocusedInput {
        section: SectionId::CONTACT,
        container: CONTACT_FORM,
        field: 0,
    }
}

#[test]
fn active_section_follows_the_scroll() {
    let mut shell = interactive_shell();
    assert_eq!(shell.active_section(), SectionId::HOME);

    shell.scroll_by(40);
    shell.frame(FRAME);
    assert_eq!(shell.active_section(), SectionId::SKILLS);
    assert!(shell.scrolled_past_threshold());

    shell.scroll_to_top();
    shell.frame(FRAME);
    assert_eq!(shell.active_section(), SectionId::HOME);
    assert!(!shell.scrolled_past_threshold());
}

#[test]
fn burst_of_scrolls_is_evaluated_once_per_frame() {
    let mut shell = interactive_shell();
    let before = shell.scroll_evaluations();
    for _ in 0..10 {
        shell.scroll_by(1);
    }
    shell.frame(FRAME);
    assert_eq!(shell.scroll_evaluations(), before + 1);
    shell.frame(FRAME);
    assert_eq!(shell.scroll_evaluations(), before + 1);
}

#[test]
fn shortcut_navigation_lands_on_target_without_flashing() {
    let mut shell = interactive_shell();
    let key = KeyEvent::new(KeyCode::Char('5'), KeyModifiers::CONTROL);
    assert!(shell.handle_shortcut(&key));
    assert_eq!(shell.pending_navigation(), Some(SectionId::CONTACT));

    let mut seen = Vec::new();
    for _ in 0..SETTLE_FRAMES {
        shell.frame(FRAME);
        if seen.last() != Some(&shell.active_section()) {
            seen.push(shell.active_section());
        }
    }
    assert_eq!(shell.pending_navigation(), None);
    assert_eq!(shell.scroll_offset(), 80);
    assert_eq!(seen, [SectionId::HOME, SectionId::CONTACT]);
}

#[test]
fn every_digit_maps_to_its_section() {
    let shell = interactive_shell();
    let bound: Vec<_> = shell
        .shortcut_bindings()
        .into_iter()
        .map(|b| (b.digit, b.section))
        .collect();
    let expected: Vec<_> = (1..).zip(ids()).collect();
    assert_eq!(bound, expected);
}

#[test]
fn unknown_section_is_a_silent_no_op() {
    let mut shell = interactive_shell();
    assert!(!shell.scroll_to_section(SectionId::new("blog")));
    assert_eq!(shell.pending_navigation(), None);
    run_frames(&mut shell, 5);
    assert_eq!(shell.scroll_offset(), 0);
    assert_eq!(shell.active_section(), SectionId::HOME);
}

#[test]
fn highest_ratio_wins_and_ties_prefer_the_earlier_section() {
    let mut shell = interactive_shell();
    // Home is 10 rows, About 10 rows, Skills 40 rows; viewport 20 rows.
    let spans = [
        (SectionId::HOME, 0, 10),
        (SectionId::ABOUT, 10, 10),
        (SectionId::SKILLS, 20, 40),
        (SectionId::PROJECTS, 60, 20),
        (SectionId::CONTACT, 80, 20),
    ]
    .into_iter()
    .map(|(id, top, height)| SectionSpan { id, top, height })
    .collect();
    shell.set_geometry(PageGeometry::new(spans, 100), 20);
    shell.frame(FRAME);
    // Both fully inside the band at their own size: tie on ratio.
    assert_eq!(shell.active_section(), SectionId::HOME);

    shell.scroll_by(5);
    shell.frame(FRAME);
    assert_eq!(shell.active_section(), SectionId::ABOUT);
}

#[test]
fn focus_locks_navigation_until_blur_grace_elapses() {
    let mut shell = interactive_shell();
    shell.focus_input(contact_input());
    assert!(shell.navigation().focus_locked);
    assert_eq!(shell.active_section(), SectionId::CONTACT);

    // Visible section changes are ignored while locked.
    run_frames(&mut shell, 3);
    assert_eq!(shell.active_section(), SectionId::CONTACT);

    // Shortcuts are refused while typing.
    let key = KeyEvent::new(KeyCode::Char('2'), KeyModifiers::CONTROL);
    assert!(!shell.handle_shortcut(&key));
    assert_eq!(shell.pending_navigation(), None);

    shell.blur_input();
    run_frames(&mut shell, 2);
    assert!(shell.navigation().focus_locked);
    run_frames(&mut shell, 6);
    assert!(!shell.navigation().focus_locked);
    assert_eq!(shell.active_section(), SectionId::HOME);
}

#[test]
fn refocus_within_grace_keeps_the_lock() {
    let mut shell = interactive_shell();
    shell.focus_input(contact_input());
    shell.blur_input();
    run_frames(&mut shell, 3);
    shell.focus_input(FocusedInput {
        field: 1,
        ..contact_input()
    });
    run_frames(&mut shell, 20);
    assert!(shell.navigation().focus_locked);
    assert_eq!(shell.active_section(), SectionId::CONTACT);
}

#[test]
fn teardown_stops_all_updates() {
    let mut shell = interactive_shell();
    assert!(shell.scroll_to_section(SectionId::PROJECTS));
    shell.teardown();
    assert_eq!(shell.pending_navigation(), None);
    assert!(!shell.scroll_to_section(SectionId::ABOUT));
    let offset = shell.scroll_offset();
    run_frames(&mut shell, SETTLE_FRAMES);
    assert_eq!(shell.scroll_offset(), offset);
    assert_eq!(shell.active_section(), SectionId::HOME);
    shell.teardown();
}
