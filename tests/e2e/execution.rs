// End-to-end tests for running code: scene lifecycle, log order, reruns

use crate::common::harness::ConsoleTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use dreamscape::config::Config;
use dreamscape::model::{ObjectKind, SceneState};

const COMPLETION: [&str; 5] = [
    "> Scene initialized",
    "> Adding camera at position (0, 0, 5)",
    "> Creating cube mesh with 8 vertices and 6 faces",
    "> Adding directional light",
    "> Rendering complete!",
];

#[test]
fn test_startup_shows_welcome_and_idle_scene() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.render().unwrap();

    harness.assert_screen_contains("> Welcome to PyDreamscape Renderer");
    harness.assert_screen_contains("> Ready to execute code...");
    harness.assert_screen_contains("Run the code to see your 3D scene");
    assert_eq!(harness.console().scene(), SceneState::Idle);
}

#[test]
fn test_run_goes_loading_then_active_after_latency() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.run_code().unwrap();

    assert_eq!(harness.console().scene(), SceneState::Loading);
    harness.assert_screen_contains("Rendering scene...");
    harness.assert_screen_contains("> Executing code...");
    harness.assert_screen_contains("Code executed");

    harness.advance(1499).unwrap();
    assert_eq!(harness.console().scene(), SceneState::Loading);
    harness.assert_screen_not_contains("> Rendering complete!");

    harness.advance(1).unwrap();
    assert_eq!(harness.console().scene(), SceneState::Active);
    harness.assert_screen_contains("Scene rendered successfully");
    harness.assert_screen_contains("> Rendering complete!");

    let log = harness.log_texts();
    assert_eq!(log.len(), 2 + 1 + 5);
    assert_eq!(&log[3..], &COMPLETION);
}

#[test]
fn test_f5_also_runs() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.send_key(KeyCode::F(5), KeyModifiers::NONE).unwrap();
    assert_eq!(harness.console().scene(), SceneState::Loading);
}

#[test]
fn test_rerun_while_pending_cancels_first_run() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.run_code().unwrap();
    harness.advance(1000).unwrap();
    harness.run_code().unwrap();

    // The first run's deadline passes without output
    harness.advance(600).unwrap();
    assert_eq!(harness.console().scene(), SceneState::Loading);
    assert_eq!(harness.log_texts().len(), 5);

    harness.advance(900).unwrap();
    let log = harness.log_texts();
    assert_eq!(
        &log[2..5],
        &[
            "> Executing code...",
            "> Execution #1 cancelled: superseded by a new run",
            "> Executing code...",
        ]
    );
    assert_eq!(&log[5..], &COMPLETION);
    assert_eq!(
        log.iter().filter(|t| *t == "> Rendering complete!").count(),
        1
    );
}

#[test]
fn test_rerun_after_active_goes_back_to_loading() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.run_code().unwrap();
    harness.advance(1500).unwrap();
    assert_eq!(harness.console().scene(), SceneState::Active);

    harness.run_code().unwrap();
    assert_eq!(harness.console().scene(), SceneState::Loading);
    harness.advance(1500).unwrap();

    let log = harness.log_texts();
    assert_eq!(log.len(), 2 + 2 * 6);
    assert!(!log.iter().any(|t| t.contains("cancelled")));
}

#[test]
fn test_toolbar_during_run_lands_before_completion_block() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.run_code().unwrap();
    harness.add_object(ObjectKind::Sphere).unwrap();
    harness.advance(1500).unwrap();

    let log = harness.log_texts();
    assert_eq!(log[3], "> Added sphere to scene");
    assert_eq!(&log[4..], &COMPLETION);
}

#[test]
fn test_configured_latency_is_used() {
    let mut config = Config::default();
    config.execution.latency_ms = 200;
    let mut harness = ConsoleTestHarness::with_config(config, 100, 30).unwrap();

    harness.run_code().unwrap();
    harness.advance(200).unwrap();
    assert_eq!(harness.console().scene(), SceneState::Active);
}

#[test]
fn test_sequences_are_contiguous_after_mixed_activity() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.run_code().unwrap();
    harness.rotate_camera().unwrap();
    harness.run_code().unwrap();
    harness.set_zoom(80).unwrap();
    harness.advance(1500).unwrap();

    for (i, entry) in harness
        .console()
        .orchestrator()
        .snapshot()
        .iter()
        .enumerate()
    {
        assert_eq!(entry.sequence, i as u64);
    }
}

#[test]
fn test_error_lines_are_classified() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.run_code().unwrap();
    harness.advance(1500).unwrap();
    assert!(harness
        .console()
        .orchestrator()
        .snapshot()
        .iter()
        .all(|e| !e.is_error()));
}

#[test]
fn test_toasts_expire_with_virtual_clock() {
    let mut harness = ConsoleTestHarness::new(100, 30).unwrap();
    harness.run_code().unwrap();
    harness.advance(1500).unwrap();
    harness.assert_screen_contains("Code executed");

    harness.advance(1500).unwrap();
    harness.assert_screen_not_contains("Code executed");
    assert!(harness.console().toasts().is_empty());
    assert_eq!(harness.console().scene(), SceneState::Active);
}
