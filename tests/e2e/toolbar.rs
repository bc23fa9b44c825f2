// End-to-end tests for the toolbar: objects, camera, zoom slider, light selector

use crate::common::harness::ConsoleTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use dreamscape::model::{LightKind, SceneState};

#[test]
fn test_alt_digits_add_objects() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    for key in ['1', '2', '3'] {
        harness.send_key(KeyCode::Char(key), KeyModifiers::ALT).unwrap();
    }

    let log = harness.log_texts();
    assert_eq!(
        &log[2..],
        &[
            "> Added cube to scene",
            "> Added sphere to scene",
            "> Added cylinder to scene",
        ]
    );
    harness.assert_screen_contains("> Added cylinder to scene");
    harness.assert_screen_contains("Added cylinder");
    // Toolbar commands never start a run
    assert_eq!(harness.console().scene(), SceneState::Idle);
}

#[test]
fn test_rotate_logs_and_notifies() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.send_key(KeyCode::Char('r'), KeyModifiers::ALT).unwrap();

    assert_eq!(
        harness.log_texts().last().map(String::as_str),
        Some("> Camera rotated by 45 degrees")
    );
    harness.assert_screen_contains("Scene rotated");
}

#[test]
fn test_repeated_rotations_each_log() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    for _ in 0..3 {
        harness.rotate_camera().unwrap();
    }
    let rotations = harness
        .log_texts()
        .iter()
        .filter(|t| t.as_str() == "> Camera rotated by 45 degrees")
        .count();
    assert_eq!(rotations, 3);
}

#[test]
fn test_zoom_keys_step_by_five() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.assert_screen_contains("50%");

    harness.send_key(KeyCode::Char('='), KeyModifiers::ALT).unwrap();
    harness.send_key(KeyCode::Char('='), KeyModifiers::ALT).unwrap();
    harness.send_key(KeyCode::Char('-'), KeyModifiers::ALT).unwrap();

    assert_eq!(harness.console().toolbar().zoom, 55);
    let log = harness.log_texts();
    assert_eq!(
        &log[2..],
        &[
            "> Camera zoom set to 55%",
            "> Camera zoom set to 60%",
            "> Camera zoom set to 55%",
        ]
    );
    harness.assert_screen_contains("55%");
}

#[test]
fn test_zoom_slider_stops_at_zero() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    for _ in 0..15 {
        harness.send_key(KeyCode::Char('-'), KeyModifiers::ALT).unwrap();
    }
    assert_eq!(harness.console().toolbar().zoom, 0);
    assert_eq!(
        harness.log_texts().last().map(String::as_str),
        Some("> Camera zoom set to 0%")
    );
    assert_eq!(harness.log_texts().len(), 2 + 10);
}

#[test]
fn test_light_selector_cycles_without_logging() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.assert_screen_contains("Directional");

    harness.send_key(KeyCode::Char('l'), KeyModifiers::ALT).unwrap();
    assert_eq!(harness.console().toolbar().light, LightKind::Point);
    harness.assert_screen_contains("Point");

    harness.send_key(KeyCode::Char('l'), KeyModifiers::ALT).unwrap();
    harness.send_key(KeyCode::Char('l'), KeyModifiers::ALT).unwrap();
    assert_eq!(harness.console().toolbar().light, LightKind::Directional);
    assert_eq!(harness.log_texts().len(), 2);
}

#[test]
fn test_console_scrolls_back_and_snaps_to_tail() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    for _ in 0..20 {
        harness.rotate_camera().unwrap();
    }
    harness.send_key(KeyCode::Up, KeyModifiers::ALT).unwrap();
    harness.send_key(KeyCode::Up, KeyModifiers::ALT).unwrap();
    assert_eq!(harness.console().console_scroll_back(), 6);
    harness.assert_screen_contains("(+6 below)");

    harness.send_key(KeyCode::Down, KeyModifiers::ALT).unwrap();
    assert_eq!(harness.console().console_scroll_back(), 3);

    harness.add_object(dreamscape::model::ObjectKind::Cube).unwrap();
    assert_eq!(harness.console().console_scroll_back(), 0);
    harness.assert_screen_contains("> Added cube to scene");
}
