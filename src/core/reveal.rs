//! Reveal-on-view tracking for page blocks.
//!
//! A block is revealed the first time any of its rows enters the viewport
//! (shrunk by `margin` rows top and bottom).  Reveals are sticky: scrolling a
//! block back out of view never hides it again.  After the reveal the block
//! fades in over `fade_frames` frames.

use std::ops::Range;

#[derive(Debug, Clone)]
pub struct RevealTracker {
    spans: Vec<Range<usize>>,
    /// Frame at which each block was revealed.
    revealed_at: Vec<Option<u64>>,
    margin: usize,
    fade_frames: u64,
}

impl RevealTracker {
    pub const DEFAULT_MARGIN: usize = 3;
    pub const DEFAULT_FADE_FRAMES: u64 = 8;

    pub fn new(spans: Vec<Range<usize>>) -> Self {
        let revealed_at = vec![None; spans.len()];
        Self {
            spans,
            revealed_at,
            margin: Self::DEFAULT_MARGIN,
            fade_frames: Self::DEFAULT_FADE_FRAMES,
        }
    }

    /// Replace block spans after the document was re-laid out.  Blocks are
    /// matched by index, so already-revealed blocks stay revealed.
    pub fn set_spans(&mut self, spans: Vec<Range<usize>>) {
        self.revealed_at.resize(spans.len(), None);
        self.spans = spans;
    }

    /// Mark a block revealed unconditionally (e.g. the hero at start-up).
    pub fn reveal(&mut self, id: usize, frame: u64) {
        if let Some(slot) = self.revealed_at.get_mut(id) {
            if slot.is_none() {
                *slot = Some(frame);
            }
        }
    }

    /// Reveal every block intersecting the viewport and return the ids that
    /// became visible for the first time.
    pub fn observe(&mut self, top: usize, height: usize, frame: u64) -> Vec<usize> {
        // A viewport smaller than both margins uses its full height.
        let (start, end) = if height > self.margin * 2 {
            (top + self.margin, top + height - self.margin)
        } else {
            (top, top + height)
        };

        let mut newly = Vec::new();
        for (id, span) in self.spans.iter().enumerate() {
            if self.revealed_at[id].is_some() {
                continue;
            }
            if span.start < end && span.end > start {
                self.revealed_at[id] = Some(frame);
                newly.push(id);
            }
        }
        newly
    }

    pub fn is_revealed(&self, id: usize) -> bool {
        matches!(self.revealed_at.get(id), Some(Some(_)))
    }

    /// Fade-in progress of block `id` at `frame`, in `[0, 1]`.
    pub fn opacity(&self, id: usize, frame: u64) -> f64 {
        match self.revealed_at.get(id) {
            Some(Some(at)) => {
                if self.fade_frames == 0 {
                    return 1.0;
                }
                let elapsed = frame.saturating_sub(*at) as f64;
                (elapsed / self.fade_frames as f64).min(1.0)
            }
            _ => 0.0,
        }
    }

    /// Block containing document row `row`, if any.
    pub fn block_at(&self, row: usize) -> Option<usize> {
        self.spans.iter().position(|span| span.contains(&row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Default margin of 3 rows.
    fn tracker() -> RevealTracker {
        RevealTracker::new(vec![0..10, 10..30, 30..60, 60..70])
    }

    #[test]
    fn only_blocks_inside_the_shrunk_viewport_reveal() {
        let mut t = tracker();
        // Viewport rows 0..20, effective 3..17.
        assert_eq!(t.observe(0, 20, 0), vec![0, 1]);
        assert!(!t.is_revealed(2));

        // Rows 15..35 → effective 18..32 touches block 2.
        assert_eq!(t.observe(15, 20, 1), vec![2]);
    }

    #[test]
    fn margin_delays_reveal_of_a_block_peeking_at_the_bottom() {
        let mut t = tracker();
        // At top 12, row 30 sits inside the bottom margin; at top 14 it
        // crosses into the effective viewport.
        t.observe(12, 20, 0);
        assert!(!t.is_revealed(2));
        t.observe(14, 20, 1);
        assert!(t.is_revealed(2));
    }

    #[test]
    fn reveal_is_sticky() {
        let mut t = tracker();
        t.observe(50, 20, 0);
        assert!(t.is_revealed(3));
        assert!(t.observe(0, 10, 5).contains(&0));
        assert!(t.observe(50, 20, 6).is_empty());
        assert!(t.is_revealed(3));
    }

    #[test]
    fn opacity_ramps_over_fade_frames() {
        let mut t = tracker();
        assert_eq!(t.opacity(0, 0), 0.0);
        t.reveal(0, 10);
        assert_eq!(t.opacity(0, 10), 0.0);
        assert_eq!(t.opacity(0, 14), 0.5);
        assert_eq!(t.opacity(0, 30), 1.0);
    }

    #[test]
    fn explicit_reveal_keeps_first_frame() {
        let mut t = tracker();
        t.reveal(1, 3);
        t.reveal(1, 9);
        assert_eq!(t.opacity(1, 3 + RevealTracker::DEFAULT_FADE_FRAMES), 1.0);
    }

    #[test]
    fn tiny_viewport_ignores_margin() {
        let mut t = tracker();
        assert_eq!(t.observe(8, 4, 0), vec![0, 1]);
    }

    #[test]
    fn relayout_preserves_reveals() {
        let mut t = tracker();
        t.reveal(2, 0);
        t.set_spans(vec![0..5, 5..12, 12..40, 40..44]);
        assert!(t.is_revealed(2));
        assert_eq!(t.block_at(41), Some(3));
        assert_eq!(t.block_at(44), None);
    }
}
