use std::fs;
use std::time::Duration;

use orbit_config::OrbitConfig;
use orbit_core::Shell;
use orbit_types::{SectionId, SectionRegistry};

use super::{FRAME, uniform_geometry};

#[test]
fn config_file_drives_the_shell() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r"
[app]
ascii_only = true

[boot]
skip = true

[navigation]
smooth_scroll_ms = 0
blur_grace_ms = 250
",
    )
    .expect("write config");

    let settings = OrbitConfig::load_from(&path)
        .expect("valid config")
        .expect("config present")
        .resolve();
    assert!(settings.ui.ascii_only);
    assert_eq!(settings.blur_grace, Duration::from_millis(250));

    let mut shell = Shell::mount(SectionRegistry::standard(), settings);
    assert!(shell.is_interactive());
    shell.set_geometry(uniform_geometry(20), 20);
    shell.frame(FRAME);

    assert!(shell.scroll_to_section(SectionId::SKILLS));
    shell.frame(FRAME);
    assert_eq!(shell.scroll_offset(), 40);
    assert_eq!(shell.active_section(), SectionId::SKILLS);
}

#[test]
fn broken_config_is_reported_with_its_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "[boot\nskip = true").expect("write config");

    let err = OrbitConfig::load_from(&path).expect_err("parse error");
    assert_eq!(err.path(), path.as_path());
}
