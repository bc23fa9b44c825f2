//! Scene preview panel
//!
//! There is no renderer behind this: the panel only reflects [`SceneState`]
//! with a placeholder, a spinner, or an ASCII cube that turns on each tick.

use crate::model::SceneState;
use crate::view::theme::Theme;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const CUBE_FRAMES: [[&str; 6]; 2] = [
    [
        "    +------+",
        "   /      /|",
        "  +------+ |",
        "  |      | +",
        "  |      |/ ",
        "  +------+  ",
    ],
    [
        "  +------+  ",
        "  |\\      \\ ",
        "  | +------+",
        "  + |      |",
        "   \\|      |",
        "    +------+",
    ],
];

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Caption under the preview for each state
pub fn caption(scene: SceneState) -> &'static str {
    match scene {
        SceneState::Idle => "Run the code to see your 3D scene",
        SceneState::Loading => "Rendering scene...",
        SceneState::Active => "Scene rendered successfully",
    }
}

pub fn render_scene(frame: &mut Frame, area: Rect, scene: SceneState, tick: u64, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" 3D Scene Preview ")
        .title_style(theme.heading());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    match scene {
        SceneState::Idle => {
            for row in CUBE_FRAMES[0] {
                lines.push(Line::styled(row, theme.muted()));
            }
        }
        SceneState::Loading => {
            let spinner = SPINNER[(tick % SPINNER.len() as u64) as usize];
            lines.push(Line::raw(""));
            lines.push(Line::raw(""));
            lines.push(Line::styled(format!("[ {} ]", spinner), theme.accent()));
            lines.push(Line::raw(""));
        }
        SceneState::Active => {
            let cube = CUBE_FRAMES[((tick / 4) % CUBE_FRAMES.len() as u64) as usize];
            for row in cube {
                lines.push(Line::styled(row, theme.accent()));
            }
        }
    }
    lines.push(Line::raw(""));
    let caption_style = if scene.is_active() {
        Style::default().fg(theme.fg)
    } else {
        theme.muted()
    };
    lines.push(Line::styled(caption(scene), caption_style));

    // Center vertically
    let top = inner.height.saturating_sub(lines.len() as u16) / 2;
    let area = Rect {
        y: inner.y + top,
        height: inner.height.saturating_sub(top),
        ..inner
    };
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
