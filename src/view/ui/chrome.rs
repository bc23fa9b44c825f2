//! Header, toolbar and footer rows

use crate::config::ThemeName;
use crate::model::{LightKind, ObjectKind};
use crate::view::theme::Theme;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub const APP_TITLE: &str = "PyDreamscape Renderer";
pub const APP_VERSION_LINE: &str = "PyDreamscape Renderer v1.0.0";

/// Number of cells the zoom slider occupies
const SLIDER_CELLS: u32 = 10;

pub fn render_header(frame: &mut Frame, area: Rect, theme: &Theme) {
    let theme_label = match theme.name {
        ThemeName::Dark => "☾ dark",
        ThemeName::Light => "☀ light",
    };
    let line = Line::from(vec![
        Span::styled(" ■ ", theme.accent()),
        Span::styled(APP_TITLE, theme.heading()),
        Span::raw("   "),
        Span::styled("[F1] Documentation", theme.muted()),
        Span::raw("   "),
        Span::styled(format!("[^T] {}", theme_label), theme.muted()),
    ]);
    let subtitle = Line::styled(" A powerful 3D engine built in Python", theme.muted());
    frame.render_widget(Paragraph::new(vec![line, subtitle]).style(theme.base()), area);
}

/// Text form of the zoom slider, e.g. `[■■■■■-----] 50%`
pub fn zoom_slider(percent: u32) -> String {
    let filled = (percent.min(100) * SLIDER_CELLS / 100) as usize;
    format!(
        "[{}{}] {}%",
        "■".repeat(filled),
        "-".repeat(SLIDER_CELLS as usize - filled),
        percent
    )
}

pub fn render_toolbar(
    frame: &mut Frame,
    area: Rect,
    zoom: u32,
    light: LightKind,
    theme: &Theme,
) {
    let key = theme.muted();
    let mut spans = vec![Span::styled(" [Alt] ", theme.heading())];
    for (idx, kind) in ObjectKind::ALL.iter().enumerate() {
        spans.push(Span::styled(format!("{} ", idx + 1), key));
        spans.push(Span::styled(format!("{} ", kind.label()), theme.accent()));
    }
    spans.push(Span::styled("│ l ", key));
    spans.push(Span::styled("Light: ", theme.heading()));
    spans.push(Span::styled(
        light.label(),
        theme.accent().add_modifier(Modifier::UNDERLINED),
    ));
    spans.push(Span::styled(" │ r ", key));
    spans.push(Span::styled("Rotate ", theme.accent()));
    spans.push(Span::styled("│ -/= ", key));
    spans.push(Span::styled("Zoom ", theme.heading()));
    spans.push(Span::styled(zoom_slider(zoom), theme.accent()));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(theme.base().bg(theme.panel_bg)),
        area,
    );
}

pub fn render_footer(frame: &mut Frame, area: Rect, status: Option<&str>, theme: &Theme) {
    let hints = status.unwrap_or(
        "^R Run  ^S Save  ^K Copy  ^D Download  F2 Tabs  M-↑/↓ Scroll log  ^Q Quit",
    );
    let line = Line::from(vec![
        Span::styled(format!(" {} ", APP_VERSION_LINE), theme.muted()),
        Span::raw("│ "),
        Span::styled(hints.to_string(), theme.muted()),
    ]);
    frame.render_widget(Paragraph::new(line).style(theme.base()), area);
}
