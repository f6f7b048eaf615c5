//! Vertical scroll position over the page document.

/// Row-based scroll state.  `offset` is the first visible document row and
/// is always kept within `0..=max_offset()`.
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    offset: usize,
    content_height: usize,
    viewport: usize,
}

impl ScrollState {
    /// Update document and viewport heights (after a resize or rebuild).
    pub fn set_dimensions(&mut self, content_height: usize, viewport: usize) {
        self.content_height = content_height;
        self.viewport = viewport;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }

    pub fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport)
    }

    pub fn at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let target = if delta < 0 {
            self.offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.offset.saturating_add(delta as usize)
        };
        self.jump_to(target);
    }

    /// Scroll one screen down, keeping one row of overlap.
    pub fn page_down(&mut self) {
        let step = self.viewport.saturating_sub(1).max(1);
        self.jump_to(self.offset.saturating_add(step));
    }

    pub fn page_up(&mut self) {
        let step = self.viewport.saturating_sub(1).max(1);
        self.jump_to(self.offset.saturating_sub(step));
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
    }

    pub fn to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Put `row` at the top of the viewport (clamped).
    pub fn jump_to(&mut self, row: usize) {
        self.offset = row.min(self.max_offset());
    }

    /// Fraction of the scrollable distance covered, in `[0, 1]`.
    /// A document that fits the viewport counts as fully scrolled.
    pub fn progress(&self) -> f64 {
        let max = self.max_offset();
        if max == 0 {
            1.0
        } else {
            self.offset as f64 / max as f64
        }
    }

    /// The anchor the reader is currently in: the last one at or above the
    /// viewport top.  At the bottom of the page the last anchor that is on
    /// screen wins, so short trailing sections still get highlighted.
    pub fn current_anchor<T: Copy>(&self, anchors: &[(T, usize)]) -> Option<T> {
        let limit = if self.at_bottom() && self.max_offset() > 0 {
            self.offset + self.viewport.saturating_sub(1)
        } else {
            self.offset
        };
        anchors
            .iter()
            .take_while(|(_, row)| *row <= limit)
            .last()
            .or_else(|| anchors.first())
            .map(|(id, _)| *id)
    }

    /// First anchor strictly below the viewport top.
    pub fn next_anchor<T: Copy>(&self, anchors: &[(T, usize)]) -> Option<usize> {
        anchors
            .iter()
            .map(|(_, row)| *row)
            .find(|row| *row > self.offset)
    }

    /// Last anchor strictly above the viewport top.
    pub fn prev_anchor<T: Copy>(&self, anchors: &[(T, usize)]) -> Option<usize> {
        anchors
            .iter()
            .map(|(_, row)| *row)
            .filter(|row| *row < self.offset)
            .last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroll(content: usize, viewport: usize) -> ScrollState {
        let mut s = ScrollState::default();
        s.set_dimensions(content, viewport);
        s
    }

    const ANCHORS: &[(char, usize)] = &[('a', 0), ('b', 20), ('c', 50), ('d', 95)];

    #[test]
    fn scrolling_is_clamped() {
        let mut s = scroll(100, 30);
        s.scroll_by(-5);
        assert_eq!(s.offset(), 0);
        s.scroll_by(500);
        assert_eq!(s.offset(), 70);
        s.scroll_by(-10);
        assert_eq!(s.offset(), 60);
    }

    #[test]
    fn paging_keeps_one_row_of_overlap() {
        let mut s = scroll(100, 30);
        s.page_down();
        assert_eq!(s.offset(), 29);
        s.page_down();
        s.page_down();
        assert_eq!(s.offset(), 70);
        s.page_up();
        assert_eq!(s.offset(), 41);
    }

    #[test]
    fn progress_tracks_offset() {
        let mut s = scroll(100, 20);
        assert_eq!(s.progress(), 0.0);
        s.jump_to(40);
        assert!((s.progress() - 0.5).abs() < f64::EPSILON);
        s.to_bottom();
        assert_eq!(s.progress(), 1.0);
        s.to_top();
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn content_that_fits_reports_full_progress() {
        let s = scroll(10, 40);
        assert_eq!(s.max_offset(), 0);
        assert_eq!(s.progress(), 1.0);
    }

    #[test]
    fn shrinking_content_reclamps_offset() {
        let mut s = scroll(100, 20);
        s.to_bottom();
        s.set_dimensions(50, 20);
        assert_eq!(s.offset(), 30);
    }

    #[test]
    fn current_anchor_follows_viewport_top() {
        let mut s = scroll(120, 20);
        assert_eq!(s.current_anchor(ANCHORS), Some('a'));
        s.jump_to(20);
        assert_eq!(s.current_anchor(ANCHORS), Some('b'));
        s.jump_to(49);
        assert_eq!(s.current_anchor(ANCHORS), Some('b'));
        s.to_bottom();
        // 'd' starts below the viewport top but is visible at the bottom.
        assert_eq!(s.current_anchor(ANCHORS), Some('d'));
    }

    #[test]
    fn next_and_prev_anchor_skip_the_current_row() {
        let mut s = scroll(200, 20);
        s.jump_to(20);
        assert_eq!(s.next_anchor(ANCHORS), Some(50));
        assert_eq!(s.prev_anchor(ANCHORS), Some(0));
        s.jump_to(0);
        assert_eq!(s.prev_anchor(ANCHORS), None);
        s.jump_to(100);
        assert_eq!(s.next_anchor(ANCHORS), None);
    }
}
