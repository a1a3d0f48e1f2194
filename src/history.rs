// Command history - bounded append-only list with a cursor
// Up/Down recall; the cursor is always clamped to [0, len] where len
// means "past the newest entry" (empty input line).

const MAX_ENTRIES: usize = 100;

#[derive(Debug, Default)]
pub struct CommandHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl CommandHistory {
    pub fn new() -> Self {
        CommandHistory {
            entries: Vec::new(),
            cursor: 0,
        }
    }

    /// Record a submitted command. Consecutive duplicates are skipped;
    /// the cursor resets past the end either way.
    pub fn push(&mut self, command: &str) {
        if self.entries.last().map(String::as_str) != Some(command) {
            if self.entries.len() == MAX_ENTRIES {
                self.entries.remove(0);
            }
            self.entries.push(command.to_string());
        }
        self.cursor = self.entries.len();
    }

    /// Move back in history. Returns the recalled command, or `None`
    /// when already at the oldest entry.
    pub fn up(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Move forward in history. Past the newest entry the recalled
    /// text is empty; beyond that there is nothing to do.
    pub fn down(&mut self) -> Option<&str> {
        if self.cursor >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Text at the cursor; empty when the cursor sits past the end.
    pub fn current(&self) -> &str {
        self.entries.get(self.cursor).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_recall() {
        let mut history = CommandHistory::new();
        history.push("11222333000181");
        history.push("00000000000000");

        assert_eq!(history.up(), Some("00000000000000"));
        assert_eq!(history.up(), Some("11222333000181"));
        assert_eq!(history.up(), None); // clamped at oldest
        assert_eq!(history.down(), Some("00000000000000"));
        assert_eq!(history.down(), Some("")); // past the newest
        assert_eq!(history.down(), None); // clamped at end
    }

    #[test]
    fn test_consecutive_duplicates_skipped() {
        let mut history = CommandHistory::new();
        history.push("11222333000181");
        history.push("11222333000181");
        assert_eq!(history.len(), 1);

        // Non-consecutive repeats are kept
        history.push("123");
        history.push("11222333000181");
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_push_resets_cursor() {
        let mut history = CommandHistory::new();
        history.push("first");
        history.push("second");
        history.up();
        history.up();
        history.push("third");
        assert_eq!(history.up(), Some("third"));
    }

    #[test]
    fn test_empty_history_navigation() {
        let mut history = CommandHistory::new();
        assert_eq!(history.up(), None);
        assert_eq!(history.down(), None);
        assert_eq!(history.current(), "");
    }

    #[test]
    fn test_bounded_size() {
        let mut history = CommandHistory::new();
        for i in 0..(MAX_ENTRIES + 20) {
            history.push(&format!("cmd-{}", i));
        }
        assert_eq!(history.len(), MAX_ENTRIES);
        // Oldest entries were dropped
        assert_eq!(history.up(), Some(format!("cmd-{}", MAX_ENTRIES + 19).as_str()));
    }
}
