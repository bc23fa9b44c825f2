//! Console log panel

use crate::model::LogEntry;
use crate::view::theme::Theme;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Which entries fit in `height` rows when scrolled `scroll_back` rows up
/// from the tail
pub fn visible_range(total: usize, height: usize, scroll_back: usize) -> std::ops::Range<usize> {
    let end = total.saturating_sub(scroll_back);
    let start = end.saturating_sub(height);
    start..end
}

pub fn render_console(
    frame: &mut Frame,
    area: Rect,
    entries: &[LogEntry],
    scroll_back: usize,
    theme: &Theme,
) {
    let title = if scroll_back > 0 {
        format!(" Console Output (+{} below) ", scroll_back)
    } else {
        " Console Output ".to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(title)
        .title_style(theme.heading());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let range = visible_range(entries.len(), inner.height as usize, scroll_back);
    let lines: Vec<Line> = entries[range]
        .iter()
        .map(|entry| {
            let style = if entry.is_error() {
                Style::default().fg(theme.error_fg)
            } else {
                Style::default().fg(theme.fg)
            };
            Line::styled(entry.text.as_str(), style)
        })
        .collect();

    let panel = Paragraph::new(lines).style(Style::default().bg(theme.panel_bg));
    frame.render_widget(panel, inner);
}
