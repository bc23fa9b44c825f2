// End-to-end tests for the overall layout and resizing

use crate::common::harness::ConsoleTestHarness;

#[test]
fn test_all_panels_render() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.render().unwrap();

    harness.assert_screen_contains("PyDreamscape Renderer");
    harness.assert_screen_contains("A powerful 3D engine built in Python");
    harness.assert_screen_contains("3D Scene Preview");
    harness.assert_screen_contains("Console Output");
    harness.assert_screen_contains("Code Editor");
    harness.assert_screen_contains("API Reference");
    harness.assert_screen_contains("PyDreamscape Renderer v1.0.0");
    harness.assert_screen_contains("Cylinder");
}

#[test]
fn test_resize_keeps_rendering() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.resize(140, 40).unwrap();
    assert_eq!(harness.console().size(), (140, 40));
    harness.assert_screen_contains("Console Output");

    // Too small to be useful, but must not panic
    harness.resize(20, 6).unwrap();
    harness.resize(1, 1).unwrap();
}

#[test]
fn test_loading_spinner_advances_with_ticks() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.run_code().unwrap();
    harness.assert_screen_contains("[ | ]");

    harness.console_mut().tick();
    harness.render().unwrap();
    harness.assert_screen_contains("[ / ]");
}
