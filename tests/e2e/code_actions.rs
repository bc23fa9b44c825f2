// End-to-end tests for editing, copy, save, download and theme

use crate::common::fixtures::TestFixture;
use crate::common::harness::ConsoleTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use dreamscape::config::ThemeName;

#[test]
fn test_editing_marks_buffer_modified() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.assert_screen_not_contains("[+]");

    harness.type_text("# tweak\n").unwrap();
    assert!(harness.console().code().is_modified());
    assert!(harness.console().code().text().starts_with("# tweak\nimport numpy"));
    harness.assert_screen_contains("[+]");
    harness.assert_screen_contains("# tweak");
}

#[test]
fn test_submitted_run_uses_edited_code() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.type_text("x").unwrap();
    harness.run_code().unwrap();

    let pending = harness.console().orchestrator().pending().unwrap();
    assert!(pending.request.source_text.starts_with("ximport numpy"));
}

#[test]
fn test_ctrl_s_saves_back_to_loaded_file() {
    let fixture = TestFixture::new("scene.py", "scene = Scene()\n").unwrap();
    let mut harness = ConsoleTestHarness::with_working_dir(fixture.dir(), 100, 30).unwrap();
    harness.load_code_file(&fixture.path).unwrap();
    harness.assert_screen_contains("scene = Scene()");

    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    harness.type_text("  # edited").unwrap();
    harness
        .send_key(KeyCode::Char('s'), KeyModifiers::CONTROL)
        .unwrap();

    assert_eq!(
        fixture.read_content().unwrap(),
        "scene = Scene()  # edited\n"
    );
    assert!(!harness.console().code().is_modified());
    harness.assert_screen_contains("Code saved");
}

#[test]
fn test_ctrl_d_downloads_script() {
    let fixture = TestFixture::empty("unused.py").unwrap();
    let mut harness = ConsoleTestHarness::with_working_dir(fixture.dir(), 100, 30).unwrap();
    harness
        .send_key(KeyCode::Char('d'), KeyModifiers::CONTROL)
        .unwrap();

    let downloaded = std::fs::read_to_string(fixture.dir().join("engine3d_scene.py")).unwrap();
    assert_eq!(downloaded, harness.console().code().text());
    harness.assert_screen_contains("File downloaded");
    // Shell actions never touch the log
    assert_eq!(harness.log_texts().len(), 2);
}

#[test]
fn test_ctrl_k_copies_and_ctrl_v_pastes() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness
        .send_key(KeyCode::Char('k'), KeyModifiers::CONTROL)
        .unwrap();
    harness.assert_screen_contains("Copied to clipboard");
    let original = harness.console().code().text();
    assert_eq!(harness.console().clipboard().internal(), original);

    harness
        .send_key(KeyCode::Char('v'), KeyModifiers::CONTROL)
        .unwrap();
    assert_eq!(harness.console().code().len(), original.len() * 2);
}

#[test]
fn test_escape_dismisses_toasts() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness
        .send_key(KeyCode::Char('k'), KeyModifiers::CONTROL)
        .unwrap();
    assert!(!harness.console().toasts().is_empty());

    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    assert!(harness.console().toasts().is_empty());
    harness.assert_screen_not_contains("Copied to clipboard");
}

#[test]
fn test_ctrl_t_toggles_theme() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.assert_screen_contains("dark");

    harness
        .send_key(KeyCode::Char('t'), KeyModifiers::CONTROL)
        .unwrap();
    assert_eq!(harness.console().theme(), ThemeName::Light);
    harness.assert_screen_contains("light");
}

#[test]
fn test_ctrl_q_quits() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness
        .send_key(KeyCode::Char('q'), KeyModifiers::CONTROL)
        .unwrap();
    assert!(harness.should_quit());
}

#[test]
fn test_typed_tab_pads_and_carriage_return_is_dropped() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.type_text("x\ty\r\n").unwrap();
    let code = harness.console().code();
    assert!(code.text().starts_with("x   y\nimport numpy"));
    assert_eq!(code.cursor(), (1, 0));
}
