//! Scrollable list-view state
//!
//! Tracks a cursor and a visible window over a list of lines. Both panes
//! of the viewer are instances of this; only the focused one reacts to
//! navigation keys.

/// Cursor plus visible window over `len` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    cursor: usize,
    window_start: usize,
    height: usize,
    len: usize,
    focused: bool,
}

impl ListView {
    pub fn new(focused: bool) -> Self {
        Self {
            cursor: 0,
            window_start: 0,
            height: 0,
            len: 0,
            focused,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn window_start(&self) -> usize {
        self.window_start
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Update the number of lines, clamping cursor and window so both
    /// stay inside the list after a shrink.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.cursor = 0;
            self.window_start = 0;
            return;
        }
        if self.cursor >= len {
            self.cursor = len - 1;
        }
        if self.window_start > self.cursor {
            self.window_start = self.cursor;
        }
    }

    /// Update the viewport height, pulling the window back if the pane
    /// grew enough to show trailing blank space.
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        if height == 0 {
            return;
        }
        if self.cursor >= self.window_start + height {
            self.window_start = self.cursor + 1 - height;
        }
        if self.window_start + height > self.len {
            self.window_start = self.len.saturating_sub(height);
        }
    }

    /// Jump the cursor to the top of the list.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.window_start = 0;
    }

    /// Move the cursor one line down, scrolling the window when the
    /// cursor would leave it. Ignored when unfocused or empty.
    pub fn cursor_down(&mut self) {
        if !self.focused || self.len == 0 {
            return;
        }
        if self.cursor + 1 < self.len {
            self.cursor += 1;
        }
        if self.height > 0 && self.cursor + 1 > self.window_start + self.height {
            self.window_start = self.cursor + 1 - self.height;
        }
    }

    /// Move the cursor one line up. Ignored when unfocused or empty.
    pub fn cursor_up(&mut self) {
        if !self.focused || self.len == 0 {
            return;
        }
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        if self.cursor < self.window_start {
            self.window_start = self.cursor;
        }
    }

    /// Move a full page down.
    pub fn page_down(&mut self) {
        for _ in 0..self.height.max(1) {
            self.cursor_down();
        }
    }

    /// Move a full page up.
    pub fn page_up(&mut self) {
        for _ in 0..self.height.max(1) {
            self.cursor_up();
        }
    }

    /// Range of line indices currently visible.
    pub fn visible(&self) -> std::ops::Range<usize> {
        let end = (self.window_start + self.height).min(self.len);
        self.window_start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(len: usize, height: usize) -> ListView {
        let mut v = ListView::new(true);
        v.set_len(len);
        v.set_height(height);
        v
    }

    #[test]
    fn three_lines_in_a_two_line_window() {
        let mut v = view(3, 2);
        assert_eq!((v.cursor(), v.window_start()), (0, 0));

        v.cursor_down();
        assert_eq!((v.cursor(), v.window_start()), (1, 0));

        // Third line scrolls the window by one
        v.cursor_down();
        assert_eq!((v.cursor(), v.window_start()), (2, 1));

        // Moving back up keeps the window while the cursor is inside it
        v.cursor_up();
        assert_eq!((v.cursor(), v.window_start()), (1, 1));

        v.cursor_up();
        assert_eq!((v.cursor(), v.window_start()), (0, 0));
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut v = view(2, 5);
        v.cursor_up();
        assert_eq!(v.cursor(), 0);
        v.cursor_down();
        v.cursor_down();
        v.cursor_down();
        assert_eq!(v.cursor(), 1);
    }

    #[test]
    fn unfocused_view_ignores_navigation() {
        let mut v = view(5, 3);
        v.set_focused(false);
        v.cursor_down();
        v.cursor_down();
        assert_eq!((v.cursor(), v.window_start()), (0, 0));
    }

    #[test]
    fn shrinking_the_list_pulls_the_cursor_back() {
        let mut v = view(10, 3);
        for _ in 0..9 {
            v.cursor_down();
        }
        assert_eq!((v.cursor(), v.window_start()), (9, 7));

        v.set_len(4);
        assert_eq!(v.cursor(), 3);
        assert_eq!(v.window_start(), 3);

        v.set_len(0);
        assert_eq!((v.cursor(), v.window_start()), (0, 0));
    }

    #[test]
    fn visible_range_tracks_the_window() {
        let mut v = view(10, 4);
        assert_eq!(v.visible(), 0..4);
        for _ in 0..5 {
            v.cursor_down();
        }
        assert_eq!(v.cursor(), 5);
        assert_eq!(v.visible(), 2..6);
    }

    #[test]
    fn page_navigation_moves_a_window_at_a_time() {
        let mut v = view(20, 5);
        v.page_down();
        assert_eq!(v.cursor(), 5);
        v.page_up();
        assert_eq!(v.cursor(), 0);
    }

    #[test]
    fn empty_list_is_inert() {
        let mut v = view(0, 5);
        v.cursor_down();
        v.page_down();
        assert_eq!((v.cursor(), v.window_start()), (0, 0));
        assert_eq!(v.visible(), 0..0);
    }
}
