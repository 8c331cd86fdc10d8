/// Editable multi-line buffer backing a task panel's description.
///
/// Cursor columns count chars, not bytes, so multi-byte text edits cleanly.
#[derive(Debug, Clone)]
pub struct TextEditor {
    pub content: Vec<String>,
    pub cursor_row: usize,
    pub cursor_col: usize,
    pub scroll_offset: usize,
    pub col_offset: usize,
    pub is_dirty: bool,
}

fn split_lines(text: &str) -> Vec<String> {
    // `split` keeps a trailing empty line so "a\n" round-trips through get_content.
    text.split('\n').map(|s| s.to_string()).collect()
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map(|(i, _)| i).unwrap_or(line.len())
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

impl TextEditor {
    pub fn new(content: &str) -> Self {
        TextEditor {
            content: split_lines(content),
            cursor_row: 0,
            cursor_col: 0,
            scroll_offset: 0,
            col_offset: 0,
            is_dirty: false,
        }
    }

    /// Replaces the whole buffer and puts the cursor back at the start.
    pub fn set_content(&mut self, text: &str) {
        self.content = split_lines(text);
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.scroll_offset = 0;
        self.col_offset = 0;
        self.is_dirty = false;
    }

    pub fn get_content(&self) -> String {
        self.content.join("\n")
    }

    fn clamp_col(&mut self) {
        let len = char_len(&self.content[self.cursor_row]);
        if self.cursor_col > len {
            self.cursor_col = len;
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.clamp_col();
        let line = &mut self.content[self.cursor_row];
        let at = byte_index(line, self.cursor_col);
        line.insert(at, c);
        self.cursor_col += 1;
        self.is_dirty = true;
    }

    /// Inserts pasted text; `\r\n` and `\r` count as line breaks.
    pub fn insert_str(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        for c in normalized.chars() {
            if c == '\n' {
                self.insert_newline();
            } else {
                self.insert_char(c);
            }
        }
    }

    pub fn insert_newline(&mut self) {
        self.clamp_col();
        let line = &mut self.content[self.cursor_row];
        let at = byte_index(line, self.cursor_col);
        let remaining = line.split_off(at);

        self.cursor_row += 1;
        self.cursor_col = 0;
        self.content.insert(self.cursor_row, remaining);
        self.is_dirty = true;
    }

    /// Backspace: removes the char before the cursor, joining lines at column 0.
    pub fn delete_char(&mut self) {
        self.clamp_col();
        if self.cursor_col > 0 {
            let line = &mut self.content[self.cursor_row];
            let at = byte_index(line, self.cursor_col - 1);
            line.remove(at);
            self.cursor_col -= 1;
            self.is_dirty = true;
        } else if self.cursor_row > 0 {
            let current_line = self.content.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = char_len(&self.content[self.cursor_row]);
            self.content[self.cursor_row].push_str(&current_line);
            self.is_dirty = true;
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.clamp_col();
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = char_len(&self.content[self.cursor_row]);
        }
    }

    pub fn move_cursor_right(&mut self) {
        let line_len = char_len(&self.content[self.cursor_row]);
        if self.cursor_col < line_len {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.content.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_cursor_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.clamp_col();
        }
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor_row + 1 < self.content.len() {
            self.cursor_row += 1;
            self.clamp_col();
        }
    }

    pub fn move_to_start_of_line(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_to_end_of_line(&mut self) {
        self.cursor_col = char_len(&self.content[self.cursor_row]);
    }

    // Keep the cursor row inside the visible window.
    pub fn adjust_scroll_with_height(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.cursor_row < self.scroll_offset {
            self.scroll_offset = self.cursor_row;
        } else if self.cursor_row >= self.scroll_offset + visible_height {
            self.scroll_offset = self.cursor_row - visible_height + 1;
        }
    }

    // Same for the cursor column. The cursor cell itself needs one column.
    pub fn adjust_col_offset_with_width(&mut self, visible_width: usize) {
        if visible_width == 0 {
            return;
        }
        if self.cursor_col < self.col_offset {
            self.col_offset = self.cursor_col;
        } else if self.cursor_col >= self.col_offset + visible_width {
            self.col_offset = self.cursor_col - visible_width + 1;
        }
    }
}
