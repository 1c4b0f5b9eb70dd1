use crate::geometry::Point;

pub const NOTE_FONT: &str = "12px -apple-system, BlinkMacSystemFont, sans-serif";
pub const NOTE_MAX_WIDTH: f64 = 200.0;
pub const NOTE_PADDING: f64 = 8.0;
pub const NOTE_LINE_HEIGHT: f64 = 16.0;
/// Offset of a note callout from its badge center.
pub const NOTE_OFFSET_X: f64 = 25.0;

/// Width of a run of text in a given CSS font.
pub trait TextMeasure {
    fn measure_text(&self, text: &str, font: &str) -> f64;
}

/// Greedy word wrap on single spaces. A line is broken before the word that
/// would push it past `max_width`; a single word wider than the budget keeps
/// a line of its own.
pub fn wrap_words<M: TextMeasure + ?Sized>(
    text: &str,
    max_width: f64,
    font: &str,
    measure: &M,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if measure.measure_text(&candidate, font) > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[derive(Clone, Debug, PartialEq)]
pub struct NoteLayout {
    pub origin: Point,
    pub lines: Vec<String>,
    pub width: f64,
    pub height: f64,
}

impl NoteLayout {
    /// Lays out a note callout next to a badge at `badge` (viewport space).
    pub fn compute<M: TextMeasure + ?Sized>(note: &str, badge: Point, measure: &M) -> Self {
        let budget = NOTE_MAX_WIDTH - NOTE_PADDING * 2.0;
        let lines = wrap_words(note, budget, NOTE_FONT, measure);
        let widest = lines
            .iter()
            .map(|line| measure.measure_text(line, NOTE_FONT))
            .fold(0.0, f64::max);
        Self {
            origin: badge.offset(NOTE_OFFSET_X, 0.0),
            width: NOTE_MAX_WIDTH.min(widest + NOTE_PADDING * 2.0),
            height: lines.len() as f64 * NOTE_LINE_HEIGHT + NOTE_PADDING * 2.0,
            lines,
        }
    }

    /// Top-left position of each line's text.
    pub fn line_positions(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        self.lines.iter().enumerate().map(|(index, line)| {
            (
                line.as_str(),
                self.origin
                    .offset(NOTE_PADDING, NOTE_PADDING + index as f64 * NOTE_LINE_HEIGHT),
            )
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Every character is seven pixels wide, whatever the font.
    pub(crate) struct FixedAdvance;

    impl TextMeasure for FixedAdvance {
        fn measure_text(&self, text: &str, _font: &str) -> f64 {
            text.chars().count() as f64 * 7.0
        }
    }

    #[test]
    fn short_notes_stay_on_one_line() {
        let lines = wrap_words("hello world", 184.0, NOTE_FONT, &FixedAdvance);
        assert_eq!(lines, vec!["hello world"]);
    }

    #[test]
    fn long_notes_wrap_within_budget() {
        let note = "hello world this is a long note that must wrap";
        let layout = NoteLayout::compute(note, Point::new(100.0, 100.0), &FixedAdvance);
        assert!(layout.lines.len() >= 2);
        let budget = NOTE_MAX_WIDTH - NOTE_PADDING * 2.0;
        for line in &layout.lines {
            assert!(FixedAdvance.measure_text(line, NOTE_FONT) <= budget, "{line:?} too wide");
        }
        assert_eq!(layout.lines.join(" "), note);
        assert_eq!(layout.origin, Point::new(125.0, 100.0));
        assert_eq!(
            layout.height,
            layout.lines.len() as f64 * NOTE_LINE_HEIGHT + NOTE_PADDING * 2.0
        );
        assert!(layout.width <= NOTE_MAX_WIDTH);
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let long = "x".repeat(40);
        let lines = wrap_words(&format!("a {long} b"), 184.0, NOTE_FONT, &FixedAdvance);
        assert_eq!(lines, vec!["a".to_string(), long, "b".to_string()]);
    }

    #[test]
    fn box_width_shrinks_to_content() {
        let layout = NoteLayout::compute("hi", Point::default(), &FixedAdvance);
        assert_eq!(layout.width, 14.0 + NOTE_PADDING * 2.0);
        let positions: Vec<_> = layout.line_positions().collect();
        assert_eq!(positions, vec![("hi", Point::new(NOTE_OFFSET_X + 8.0, 8.0))]);
    }
}
