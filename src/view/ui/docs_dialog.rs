//! Documentation dialog (F1)

use crate::docs::{self, DocsTab, DOCS_VERSION};
use crate::view::theme::Theme;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

/// Dialog rectangle: 80% of the screen, centered
pub fn dialog_area(screen: Rect) -> Rect {
    let width = (screen.width * 4 / 5).max(20).min(screen.width);
    let height = (screen.height * 4 / 5).max(8).min(screen.height);
    Rect {
        x: screen.x + (screen.width - width) / 2,
        y: screen.y + (screen.height - height) / 2,
        width,
        height,
    }
}

/// Largest useful scroll offset for a tab shown in `height` rows
pub fn max_scroll(tab: DocsTab, height: usize) -> usize {
    docs::lines(tab).len().saturating_sub(height)
}

pub fn render_docs_dialog(
    frame: &mut Frame,
    screen: Rect,
    tab: DocsTab,
    scroll: usize,
    theme: &Theme,
) {
    let area = dialog_area(screen);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .title(format!(" PyDreamscape Documentation v{} ", DOCS_VERSION))
        .title_style(theme.heading())
        .title_bottom(Line::styled(
            " Tab: next section  ↑↓ PgUp PgDn: scroll  Esc: close ",
            theme.muted(),
        ))
        .style(theme.base());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 3 {
        return;
    }

    let mut header = vec![Span::raw(" ")];
    for t in DocsTab::ALL {
        let style = if t == tab {
            theme.heading().bg(theme.selected_tab_bg)
        } else {
            theme.muted()
        };
        header.push(Span::styled(format!(" {} ", t.title()), style));
        header.push(Span::raw(" "));
    }
    let subtitle = Line::styled(
        " Learn how to use the 3D engine API and create amazing scenes",
        theme.muted(),
    );
    frame.render_widget(
        Paragraph::new(vec![subtitle, Line::from(header)]),
        Rect { height: 2, ..inner },
    );

    let body = Rect {
        y: inner.y + 3,
        height: inner.height - 3,
        ..inner
    };
    let scroll = scroll.min(max_scroll(tab, body.height as usize));
    let lines: Vec<Line> = docs::lines(tab)
        .iter()
        .skip(scroll)
        .take(body.height as usize)
        .map(|line| {
            if let Some(title) = line.strip_prefix("## ") {
                Line::styled(title.to_string(), theme.heading())
            } else if line.starts_with("    ") {
                Line::styled(line.as_str(), Style::default().fg(theme.primary))
            } else {
                Line::styled(line.as_str(), Style::default().fg(theme.fg))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), body);
}
