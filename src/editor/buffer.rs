use ropey::Rope;

use super::selection::Selection;
use super::surface::{InputSurface, PendingSelections};

/// Line/column position of the caret, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column in chars.
    pub col: usize,
}

impl Cursor {
    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A text buffer backed by a rope data structure.
///
/// Positions are char offsets. The selection is an anchor plus a head; the
/// head is where the caret is drawn and moves with the arrow keys, the anchor
/// stays put while the selection is being extended.
pub struct EditorBuffer {
    rope: Rope,
    anchor: usize,
    head: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: Option<usize>,
    single_line: bool,
    pending: PendingSelections,
    dirty: bool,
}

impl EditorBuffer {
    /// Create a new buffer from a string, caret at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            anchor: 0,
            head: 0,
            col_memory: None,
            single_line: false,
            pending: PendingSelections::default(),
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Create an empty buffer that refuses newlines.
    pub fn single_line() -> Self {
        Self {
            single_line: true,
            ..Self::empty()
        }
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Number of chars in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Whether the buffer has been modified since creation or last reset.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean.
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// The current selection, ordered.
    pub const fn selection(&self) -> Selection {
        Selection::new(self.anchor, self.head)
    }

    /// Char offset of the caret (the moving end of the selection).
    pub const fn caret(&self) -> usize {
        self.head
    }

    /// Line/column of the caret.
    pub fn cursor(&self) -> Cursor {
        let line = self.rope.char_to_line(self.head);
        Cursor::at(line, self.head - self.rope.line_to_char(line))
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Char offset where `line_idx` starts.
    pub fn line_start(&self, line_idx: usize) -> usize {
        self.rope
            .line_to_char(line_idx.min(self.rope.len_lines().saturating_sub(1)))
    }

    /// Length of a line in chars (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.chars().count())
    }

    /// Set the selection, clamped to the buffer.
    pub fn set_selection(&mut self, selection: Selection) {
        let selection = selection.clamped(self.len_chars());
        self.anchor = selection.start;
        self.head = selection.end;
        self.col_memory = None;
    }

    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.head = self.len_chars();
        self.col_memory = None;
    }

    /// Replace the whole content, keeping the selection clamped.
    pub fn replace_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        let max = self.len_chars();
        self.anchor = self.anchor.min(max);
        self.head = self.head.min(max);
        self.col_memory = None;
        self.dirty = true;
    }

    /// Empty the buffer and drop queued selection restores.
    pub fn reset(&mut self) {
        self.rope = Rope::new();
        self.anchor = 0;
        self.head = 0;
        self.col_memory = None;
        self.pending = PendingSelections::default();
        self.dirty = false;
    }

    /// Whether selection restores are waiting for a render.
    pub fn has_pending_selection(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Apply queued selection restores in the order they were scheduled.
    ///
    /// Returns `true` if any were applied.
    pub fn apply_pending_selections(&mut self) -> bool {
        let queued: Vec<Selection> = self.pending.drain().collect();
        let applied = !queued.is_empty();
        for selection in queued {
            self.set_selection(selection);
        }
        applied
    }

    /// Insert a character, replacing the selection.
    pub fn insert_char(&mut self, ch: char) {
        if self.single_line && (ch == '\n' || ch == '\r') {
            return;
        }
        self.delete_selection();
        self.rope.insert_char(self.head, ch);
        self.collapse_to(self.head + 1);
        self.dirty = true;
    }

    /// Insert a string, replacing the selection.
    pub fn insert_str(&mut self, s: &str) {
        let filtered;
        let s = if self.single_line {
            filtered = s.replace(['\r', '\n'], "");
            filtered.as_str()
        } else {
            s
        };
        if s.is_empty() {
            return;
        }
        self.delete_selection();
        self.rope.insert(self.head, s);
        self.collapse_to(self.head + s.chars().count());
        self.dirty = true;
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the selection, or the character before the cursor (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.head == 0 {
            return false;
        }
        self.rope.remove(self.head - 1..self.head);
        self.collapse_to(self.head - 1);
        self.dirty = true;
        true
    }

    /// Delete the selection, or the character at the cursor (Delete key).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.head >= self.len_chars() {
            return false;
        }
        self.rope.remove(self.head..=self.head);
        self.dirty = true;
        true
    }

    /// Move the cursor in the given direction, optionally extending the selection.
    pub fn move_cursor(&mut self, direction: Direction, extend: bool) {
        match direction {
            Direction::Left => {
                let target = if !extend && !self.selection().is_caret() {
                    self.selection().start
                } else {
                    self.head.saturating_sub(1)
                };
                self.move_head(target, extend);
            }
            Direction::Right => {
                let target = if !extend && !self.selection().is_caret() {
                    self.selection().end
                } else {
                    (self.head + 1).min(self.len_chars())
                };
                self.move_head(target, extend);
            }
            Direction::Up => self.move_vertical(-1, extend),
            Direction::Down => self.move_vertical(1, extend),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub fn move_home(&mut self, extend: bool) {
        let line = self.cursor().line;
        self.move_head(self.line_start(line), extend);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self, extend: bool) {
        let line = self.cursor().line;
        self.move_head(self.line_start(line) + self.line_len(line), extend);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self, extend: bool) {
        let chars: Vec<char> = self.rope.slice(..self.head).chars().collect();
        let mut idx = chars.len();
        while idx > 0 && !is_word_char(chars[idx - 1]) {
            idx -= 1;
        }
        while idx > 0 && is_word_char(chars[idx - 1]) {
            idx -= 1;
        }
        self.move_head(idx, extend);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self, extend: bool) {
        let mut idx = self.head;
        let mut chars = self.rope.slice(self.head..).chars().peekable();
        while chars.peek().is_some_and(|c| is_word_char(*c)) {
            chars.next();
            idx += 1;
        }
        while chars.peek().is_some_and(|c| !is_word_char(*c)) {
            chars.next();
            idx += 1;
        }
        self.move_head(idx, extend);
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub fn move_to_start(&mut self, extend: bool) {
        self.move_head(0, extend);
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self, extend: bool) {
        self.move_head(self.len_chars(), extend);
    }

    /// Move cursor to a specific line and column.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        let line = line.min(max_line);
        let col = col.min(self.line_len(line));
        self.move_head(self.line_start(line) + col, false);
    }

    // --- Private helpers ---

    fn move_head(&mut self, target: usize, extend: bool) {
        self.head = target.min(self.len_chars());
        if !extend {
            self.anchor = self.head;
        }
        self.col_memory = None;
    }

    const fn collapse_to(&mut self, offset: usize) {
        self.anchor = offset;
        self.head = offset;
        self.col_memory = None;
    }

    fn delete_selection(&mut self) -> bool {
        let selection = self.selection();
        if selection.is_caret() {
            return false;
        }
        self.rope.remove(selection.start..selection.end);
        self.collapse_to(selection.start);
        self.dirty = true;
        true
    }

    fn move_vertical(&mut self, delta: isize, extend: bool) {
        let cursor = self.cursor();
        let Some(line) = cursor.line.checked_add_signed(delta) else {
            return;
        };
        if line >= self.line_count() {
            return;
        }
        let wanted = self.col_memory.unwrap_or(cursor.col);
        let col = wanted.min(self.line_len(line));
        self.move_head(self.line_start(line) + col, extend);
        self.col_memory = Some(wanted);
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl InputSurface for EditorBuffer {
    fn value(&self) -> String {
        self.text()
    }

    fn selection(&self) -> Selection {
        Self::selection(self)
    }

    fn set_value(&mut self, value: String) {
        self.replace_text(&value);
    }

    fn restore_selection_after_render(&mut self, selection: Selection) {
        self.pending.push(selection);
    }
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} chars)", self.rope.len_chars()),
            )
            .field("selection", &self.selection())
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}
