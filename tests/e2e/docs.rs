// End-to-end tests for the documentation dialog and pane tabs

use crate::common::harness::ConsoleTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use dreamscape::app::PaneTab;
use dreamscape::docs::DocsTab;

#[test]
fn test_f1_opens_api_reference() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.send_key(KeyCode::F(1), KeyModifiers::NONE).unwrap();

    harness.assert_screen_contains("PyDreamscape Documentation v1.0.0");
    harness.assert_screen_contains("The main container for all 3D objects.");
    assert_eq!(
        harness.console().docs().map(|d| d.tab),
        Some(DocsTab::ApiReference)
    );
}

#[test]
fn test_tab_switches_sections() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.send_key(KeyCode::F(1), KeyModifiers::NONE).unwrap();

    harness.send_key(KeyCode::Tab, KeyModifiers::NONE).unwrap();
    harness.assert_screen_contains("Learn how to set up your first 3D scene.");

    harness.send_key(KeyCode::Tab, KeyModifiers::NONE).unwrap();
    harness.assert_screen_contains("Rotating Cube");

    harness.send_key(KeyCode::BackTab, KeyModifiers::NONE).unwrap();
    assert_eq!(
        harness.console().docs().map(|d| d.tab),
        Some(DocsTab::Tutorials)
    );
}

#[test]
fn test_scroll_is_clamped_and_reset_by_home() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.send_key(KeyCode::F(1), KeyModifiers::NONE).unwrap();

    for _ in 0..200 {
        harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    }
    let scrolled = harness.console().docs().unwrap().scroll;
    assert!(scrolled > 0);
    assert!(scrolled < 200);

    harness.send_key(KeyCode::PageDown, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.console().docs().unwrap().scroll, scrolled);

    harness.send_key(KeyCode::Home, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.console().docs().unwrap().scroll, 0);
}

#[test]
fn test_escape_closes_dialog_and_keys_reach_editor_again() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.send_key(KeyCode::F(1), KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();

    harness.assert_screen_not_contains("PyDreamscape Documentation");
    let before = harness.console().code().len();
    harness.type_text("#").unwrap();
    assert_eq!(harness.console().code().len(), before + 1);
}

#[test]
fn test_run_is_ignored_while_dialog_is_open() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.send_key(KeyCode::F(1), KeyModifiers::NONE).unwrap();
    harness.run_code().unwrap();
    assert_eq!(harness.log_texts().len(), 2);
}

#[test]
fn test_f2_cycles_pane_tabs() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.assert_screen_contains("import numpy as np");

    harness.send_key(KeyCode::F(2), KeyModifiers::NONE).unwrap();
    assert_eq!(harness.console().pane(), PaneTab::ApiReference);
    harness.assert_screen_contains("Core Components");
    harness.assert_screen_contains("For full documentation, press F1.");

    harness.send_key(KeyCode::F(2), KeyModifiers::NONE).unwrap();
    harness.assert_screen_contains("Settings will be available in the next update.");

    harness.send_key(KeyCode::F(2), KeyModifiers::NONE).unwrap();
    assert_eq!(harness.console().pane(), PaneTab::Editor);
    harness.assert_screen_contains("import numpy as np");
}
