//! Right-hand pane: code editor, API quick reference, settings placeholder

use crate::app::{code_buffer::CodeBuffer, PaneTab};
use crate::docs;
use crate::view::theme::Theme;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Width of the line-number gutter, including the separating space
fn gutter_width(line_count: usize) -> u16 {
    line_count.to_string().len().max(2) as u16 + 1
}

/// Render the pane. Returns the screen position of the text cursor when the
/// code editor is showing.
pub fn render_code_pane(
    frame: &mut Frame,
    area: Rect,
    tab: PaneTab,
    code: &mut CodeBuffer,
    theme: &Theme,
) -> Option<Position> {
    let modified = if code.is_modified() { " [+]" } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(tab_titles(tab, theme))
        .title_bottom(Line::styled(
            format!(" Python Code Editor{} ", modified),
            theme.muted(),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match tab {
        PaneTab::Editor => render_editor(frame, inner, code, theme),
        PaneTab::ApiReference => {
            render_quick_reference(frame, inner, theme);
            None
        }
        PaneTab::Settings => {
            let lines = vec![
                Line::styled("Settings will be available in the next update.", theme.muted()),
                Line::raw(""),
                Line::styled(
                    "Coming soon: Scene export, rendering options, and performance settings.",
                    theme.muted(),
                ),
            ];
            frame.render_widget(Paragraph::new(lines), inner);
            None
        }
    }
}

fn tab_titles(active: PaneTab, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for tab in PaneTab::ALL {
        let style = if tab == active {
            theme.heading().bg(theme.selected_tab_bg)
        } else {
            theme.muted()
        };
        spans.push(Span::styled(format!(" {} ", tab.title()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn render_editor(
    frame: &mut Frame,
    area: Rect,
    code: &mut CodeBuffer,
    theme: &Theme,
) -> Option<Position> {
    if area.height == 0 || area.width == 0 {
        return None;
    }
    code.ensure_cursor_visible(area.height as usize);
    let gutter = gutter_width(code.line_count());
    let scroll = code.scroll();

    let lines: Vec<Line> = code
        .lines()
        .iter()
        .enumerate()
        .skip(scroll)
        .take(area.height as usize)
        .map(|(idx, text)| {
            Line::from(vec![
                Span::styled(
                    format!("{:>width$} ", idx + 1, width = gutter as usize - 1),
                    theme.muted(),
                ),
                Span::styled(text.clone(), Style::default().fg(theme.fg)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.panel_bg)),
        area,
    );

    let (line, column) = code.cursor();
    let x = area.x as usize + gutter as usize + column;
    let y = area.y as usize + line.saturating_sub(scroll);
    if x < (area.x + area.width) as usize && y < (area.y + area.height) as usize {
        Some(Position::new(x as u16, y as u16))
    } else {
        None
    }
}

fn render_quick_reference(frame: &mut Frame, area: Rect, theme: &Theme) {
    let mut lines = Vec::new();
    for group in docs::quick_reference() {
        lines.push(Line::styled(group.title, theme.heading()));
        for entry in group.entries {
            lines.push(Line::from(vec![
                Span::raw("  • "),
                Span::styled(*entry, theme.accent().add_modifier(Modifier::ITALIC)),
            ]));
        }
        lines.push(Line::raw(""));
    }
    lines.push(Line::styled(
        "For full documentation, press F1.",
        theme.muted(),
    ));
    frame.render_widget(Paragraph::new(lines), area);
}
