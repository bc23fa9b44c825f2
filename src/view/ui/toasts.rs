//! Toast overlay in the top-right corner

use crate::services::Toast;
use crate::view::theme::Theme;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;
/// Below the header and toolbar
const TOP_OFFSET: u16 = 3;

pub fn render_toasts<'a>(
    frame: &mut Frame,
    screen: Rect,
    toasts: impl Iterator<Item = &'a Toast>,
    theme: &Theme,
) {
    let width = TOAST_WIDTH.min(screen.width);
    let mut y = screen.y + TOP_OFFSET;

    // Newest on top
    let toasts: Vec<&Toast> = toasts.collect();
    for toast in toasts.into_iter().rev() {
        if y + TOAST_HEIGHT > screen.y + screen.height {
            break;
        }
        let area = Rect {
            x: screen.x + screen.width - width,
            y,
            width,
            height: TOAST_HEIGHT,
        };
        let style = Style::default().fg(theme.toast_fg).bg(theme.toast_bg);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .style(style);
        let text = vec![
            Line::styled(
                toast.notification.title.as_str(),
                style.add_modifier(Modifier::BOLD),
            ),
            Line::styled(toast.notification.description.as_str(), style),
        ];
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
            area,
        );
        y += TOAST_HEIGHT;
    }
}
