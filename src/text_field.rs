//! Editable text surface with a byte-indexed cursor

/// A text buffer the user edits; the cursor always sits on a char boundary
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    cursor: usize,
}

impl TextField {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        TextField { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the content and park the cursor at the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.move_left();
            self.text.remove(self.cursor);
        }
    }

    /// Zero-based (line, column in chars) of the cursor, for drawing
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let line = before.matches('\n').count();
        let col = before.rsplit('\n').next().map(|l| l.chars().count()).unwrap_or(0);
        (line, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut field = TextField::new("ab");
        field.move_left();
        field.insert('é');
        assert_eq!(field.text(), "aéb");
        assert_eq!(field.cursor(), 3);

        field.backspace();
        assert_eq!(field.text(), "ab");
        assert_eq!(field.cursor(), 1);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut field = TextField::new("");
        field.move_left();
        field.backspace();
        field.move_right();
        assert_eq!(field.cursor(), 0);

        field.set_text("xy");
        assert_eq!(field.cursor(), 2);
        field.move_right();
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_cursor_line_col() {
        let mut field = TextField::new("{\n    \"a\": 1\n}");
        assert_eq!(field.cursor_line_col(), (2, 1));
        field.move_left();
        field.move_left();
        assert_eq!(field.cursor_line_col(), (1, 10));
    }
}
