//! Text buffer behind the code pane
//!
//! Lines are stored separately; the cursor is a (line, byte offset) pair that
//! always sits on a grapheme boundary. Vertical movement keeps the display
//! column the cursor had when vertical movement started.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBuffer {
    lines: Vec<String>,
    line: usize,
    byte: usize,
    /// Column remembered across Up/Down
    goal_column: Option<usize>,
    /// First visible line
    scroll: usize,
    modified: bool,
}

impl CodeBuffer {
    pub fn new(text: &str) -> Self {
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            line: 0,
            byte: 0,
            goal_column: None,
            scroll: 0,
            modified: false,
        }
    }

    /// The full text, lines joined with `\n`
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn len(&self) -> usize {
        self.lines.iter().map(String::len).sum::<usize>() + self.lines.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Cursor as (line, display column)
    pub fn cursor(&self) -> (usize, usize) {
        (self.line, self.display_column())
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Adjust scroll so the cursor line is inside a viewport of `height` lines
    pub fn ensure_cursor_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.line < self.scroll {
            self.scroll = self.line;
        } else if self.line >= self.scroll + height {
            self.scroll = self.line + 1 - height;
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        self.lines[self.line].insert(self.byte, ch);
        self.byte += ch.len_utf8();
        self.edited();
    }

    /// Insert text verbatim (paste): line breaks do not auto-indent
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\r' => {}
                '\n' => self.split_line(String::new()),
                _ => {
                    self.lines[self.line].insert(self.byte, ch);
                    self.byte += ch.len_utf8();
                }
            }
        }
        self.edited();
    }

    /// Split the line at the cursor, carrying over its leading whitespace
    pub fn insert_newline(&mut self) {
        let indent: String = self.lines[self.line][..self.byte]
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect();
        self.split_line(indent);
        self.edited();
    }

    fn split_line(&mut self, indent: String) {
        let rest = self.lines[self.line].split_off(self.byte);
        self.line += 1;
        self.byte = indent.len();
        self.lines.insert(self.line, indent + &rest);
    }

    pub fn insert_tab(&mut self, tab_size: usize) {
        let width = tab_size.max(1);
        let pad = width - (self.display_column() % width);
        self.insert_str(&" ".repeat(pad));
    }

    pub fn backspace(&mut self) {
        if self.byte > 0 {
            let start = self.prev_boundary();
            self.lines[self.line].replace_range(start..self.byte, "");
            self.byte = start;
        } else if self.line > 0 {
            let removed = self.lines.remove(self.line);
            self.line -= 1;
            self.byte = self.lines[self.line].len();
            self.lines[self.line].push_str(&removed);
        } else {
            return;
        }
        self.edited();
    }

    pub fn delete(&mut self) {
        if self.byte < self.lines[self.line].len() {
            let end = self.next_boundary();
            self.lines[self.line].replace_range(self.byte..end, "");
        } else if self.line + 1 < self.lines.len() {
            let next = self.lines.remove(self.line + 1);
            self.lines[self.line].push_str(&next);
        } else {
            return;
        }
        self.edited();
    }

    pub fn move_left(&mut self) {
        self.goal_column = None;
        if self.byte > 0 {
            self.byte = self.prev_boundary();
        } else if self.line > 0 {
            self.line -= 1;
            self.byte = self.lines[self.line].len();
        }
    }

    pub fn move_right(&mut self) {
        self.goal_column = None;
        if self.byte < self.lines[self.line].len() {
            self.byte = self.next_boundary();
        } else if self.line + 1 < self.lines.len() {
            self.line += 1;
            self.byte = 0;
        }
    }

    pub fn move_up(&mut self) {
        self.move_vertical(-1);
    }

    pub fn move_down(&mut self) {
        self.move_vertical(1);
    }

    pub fn page_up(&mut self, page: usize) {
        self.move_vertical(-(page.max(1) as isize));
    }

    pub fn page_down(&mut self, page: usize) {
        self.move_vertical(page.max(1) as isize);
    }

    pub fn move_home(&mut self) {
        self.goal_column = None;
        self.byte = 0;
    }

    pub fn move_end(&mut self) {
        self.goal_column = None;
        self.byte = self.lines[self.line].len();
    }

    fn move_vertical(&mut self, delta: isize) {
        let goal = *self.goal_column.get_or_insert(self.display_column());
        let target = (self.line as isize + delta).clamp(0, self.lines.len() as isize - 1) as usize;
        if target == self.line {
            return;
        }
        self.line = target;
        self.byte = byte_at_column(&self.lines[self.line], goal);
    }

    fn display_column(&self) -> usize {
        self.lines[self.line][..self.byte].width()
    }

    fn prev_boundary(&self) -> usize {
        self.lines[self.line][..self.byte]
            .grapheme_indices(true)
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        let line = &self.lines[self.line];
        line[self.byte..]
            .graphemes(true)
            .next()
            .map(|g| self.byte + g.len())
            .unwrap_or(line.len())
    }

    fn edited(&mut self) {
        self.goal_column = None;
        self.modified = true;
    }
}

/// Byte offset of the last grapheme boundary at or before `column`
fn byte_at_column(line: &str, column: usize) -> usize {
    let mut width = 0;
    for (idx, grapheme) in line.grapheme_indices(true) {
        let w = grapheme.width();
        if width + w > column {
            return idx;
        }
        width += w;
    }
    line.len()
}
