//! Rectangular blocks of monospaced text with a distinguished baseline row,
//! and the composition operations needed to assemble them into larger blocks:
//! side by side (aligned on top, bottom or baseline), stacked, or overlaid at
//! an arbitrary signed offset.
//!
//! Every operation is pure and returns a new canvas; a canvas is never
//! mutated after construction. All lines of a canvas have the same length
//! (shorter lines are right-padded with blanks), and the baseline — called
//! the *center* row — always lies within the canvas once it is non-empty.
//!
//! ```
//! use text_canvas::TextCanvas;
//!
//! let num = TextCanvas::new("1");
//! let bar = TextCanvas::new("-");
//! let den = TextCanvas::new("2");
//! let frac = bar.draw(&den, 0, 1, true).draw(&num, 0, -1, true);
//! assert_eq!(frac.to_string(), "1\n-\n2");
//! assert_eq!(frac.center(), 1);
//! ```

use std::fmt;

/// An immutable rectangular block of text lines plus a baseline row index.
#[derive(Clone, PartialEq, Eq)]
pub struct TextCanvas {
    lines: Vec<Vec<char>>,
    center: usize,
}

impl TextCanvas {
    /// Creates a canvas from a (possibly multi-line) string. The center is
    /// the middle row. An empty string yields the empty canvas.
    pub fn new(text: &str) -> Self {
        let lines: Vec<Vec<char>> = text.lines().map(|l| l.chars().collect()).collect();
        let center = lines.len() / 2;
        Self { lines, center }.padded()
    }

    /// Creates a canvas of the given height, generating each row with `f`.
    /// Rows of unequal length are right-padded with blanks.
    pub fn from_rows(height: usize, f: impl Fn(usize) -> String) -> Self {
        let lines: Vec<Vec<char>> = (0..height).map(|i| f(i).chars().collect()).collect();
        let center = height / 2;
        Self { lines, center }.padded()
    }

    /// A blank canvas of the given size, center at half the height. This is
    /// the identity element for composition along either axis.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            lines: vec![vec![' '; width]; height],
            center: height / 2,
        }
    }

    fn padded(mut self) -> Self {
        let width = self.lines.iter().map(Vec::len).max().unwrap_or(0);
        for line in &mut self.lines {
            line.resize(width, ' ');
        }
        self
    }

    pub fn width(&self) -> usize {
        self.lines.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// The baseline row: the row aligned with the surrounding inline
    /// baseline when this canvas is placed next to others.
    pub fn center(&self) -> usize {
        self.center
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() || self.width() == 0
    }

    /// The contents of row `index` as a string.
    ///
    /// # Panics
    /// Panics if `index >= height()`.
    pub fn line(&self, index: usize) -> String {
        self.lines[index].iter().collect()
    }

    /// Returns a copy of this canvas with the center moved to the given row.
    ///
    /// # Panics
    /// Panics if `center > height()`.
    pub fn set_center(&self, center: usize) -> Self {
        assert!(center <= self.height(), "center out of range");
        Self {
            lines: self.lines.clone(),
            center,
        }
    }

    /// Returns a copy with the center reset to half the height.
    pub fn recalculate_center(&self) -> Self {
        self.set_center(self.height() / 2)
    }

    /// Places `other` to the right of `self`, aligning both blocks' top
    /// rows. The result is `max` of the heights and the sum of the widths.
    /// `keep_center` selects whether the result keeps `self`'s center row or
    /// takes `other`'s.
    pub fn append_top(&self, other: &TextCanvas, keep_center: bool) -> Self {
        let height = self.height().max(other.height());
        let lines = (0..height)
            .map(|i| {
                let mut row = Vec::with_capacity(self.width() + other.width());
                extend_row(&mut row, self.lines.get(i), self.width());
                extend_row(&mut row, other.lines.get(i), other.width());
                row
            })
            .collect();
        let center = if keep_center { self.center } else { other.center };
        Self { lines, center }
    }

    /// Places `other` to the right of `self`, aligning both blocks' bottom
    /// rows. The kept center tracks the same glyph row it referred to before
    /// the append.
    pub fn append_bottom(&self, other: &TextCanvas, keep_center: bool) -> Self {
        let height = self.height().max(other.height());
        let self_shift = height - self.height();
        let other_shift = height - other.height();
        let lines = (0..height)
            .map(|i| {
                let mut row = Vec::with_capacity(self.width() + other.width());
                extend_row(&mut row, i.checked_sub(self_shift).and_then(|j| self.lines.get(j)), self.width());
                extend_row(&mut row, i.checked_sub(other_shift).and_then(|j| other.lines.get(j)), other.width());
                row
            })
            .collect();
        let center = if keep_center {
            self_shift + self.center
        } else {
            other_shift + other.center
        };
        Self { lines, center }
    }

    /// Places `other` to the right of `self` such that the two center rows
    /// coincide, padding the shorter block above or below as needed. This is
    /// the default placement for same-baseline concatenation.
    pub fn append_center(&self, other: &TextCanvas) -> Self {
        self.draw(
            other,
            self.width() as i64,
            self.center as i64 - other.center as i64,
            true,
        )
    }

    /// Overlays `other` onto `self` with its top-left corner at the signed
    /// offset `(x, y)`. The canvas grows to the union bounding box and
    /// `other`'s full rectangle (blanks included) overwrites whatever it
    /// covers. `keep_center` selects whether the result's center tracks
    /// `self`'s center row or `other`'s.
    pub fn draw(&self, other: &TextCanvas, x: i64, y: i64, keep_center: bool) -> Self {
        let sx = (-x).max(0) as usize;
        let sy = (-y).max(0) as usize;
        let ox = x.max(0) as usize;
        let oy = y.max(0) as usize;
        let width = (sx + self.width()).max(ox + other.width());
        let height = (sy + self.height()).max(oy + other.height());
        let mut lines = vec![vec![' '; width]; height];
        for (i, row) in self.lines.iter().enumerate() {
            lines[sy + i][sx..sx + row.len()].copy_from_slice(row);
        }
        for (i, row) in other.lines.iter().enumerate() {
            lines[oy + i][ox..ox + row.len()].copy_from_slice(row);
        }
        let center = if keep_center {
            sy + self.center
        } else {
            oy + other.center
        };
        Self { lines, center }
    }
}

fn extend_row(row: &mut Vec<char>, source: Option<&Vec<char>>, width: usize) {
    match source {
        Some(cells) => row.extend_from_slice(cells),
        None => row.extend(std::iter::repeat_n(' ', width)),
    }
}

impl fmt::Display for TextCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            for &c in line {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for TextCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TextCanvas({}x{}, center {})",
            self.width(),
            self.height(),
            self.center
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_makes_lines_equal_length() {
        let c = TextCanvas::new("ab\nx");
        assert_eq!(c.width(), 2);
        assert_eq!(c.height(), 2);
        assert_eq!(c.line(1), "x ");
    }

    #[test]
    fn empty_string_is_empty_canvas() {
        let c = TextCanvas::new("");
        assert_eq!(c.width(), 0);
        assert_eq!(c.height(), 0);
        assert_eq!(c.center(), 0);
        assert!(c.is_empty());
    }

    #[test]
    fn append_top_dimensions() {
        let a = TextCanvas::new("aa\naa\naa");
        let b = TextCanvas::new("b");
        let joined = a.append_top(&b, true);
        assert_eq!(joined.height(), a.height().max(b.height()));
        assert_eq!(joined.width(), a.width() + b.width());
        assert_eq!(joined.to_string(), "aab\naa \naa ");
    }

    #[test]
    fn append_top_center_selection() {
        let a = TextCanvas::new("a\na\na");
        let b = TextCanvas::new("b");
        assert_eq!(a.append_top(&b, true).center(), 1);
        assert_eq!(a.append_top(&b, false).center(), 0);
    }

    #[test]
    fn append_bottom_aligns_bottom_rows() {
        let a = TextCanvas::new("aa\naa\naa");
        let b = TextCanvas::new("b");
        let joined = a.append_bottom(&b, true);
        assert_eq!(joined.to_string(), "aa \naa \naab");
        // The kept center still points at the same row of `a`.
        assert_eq!(joined.center(), 1);
        // Taking the center from `b` points at the row `b` landed on.
        assert_eq!(a.append_bottom(&b, false).center(), 2);
    }

    #[test]
    fn append_center_aligns_baselines() {
        let tall = TextCanvas::new("1\n-\n2").set_center(1);
        let x = TextCanvas::new("x");
        let joined = tall.append_center(&x);
        assert_eq!(joined.to_string(), "1 \n-x\n2 ");
        assert_eq!(joined.center(), 1);
    }

    #[test]
    fn append_center_pads_above_when_other_is_taller() {
        let x = TextCanvas::new("x");
        let tall = TextCanvas::new("1\n-\n2").set_center(1);
        let joined = x.append_center(&tall);
        assert_eq!(joined.to_string(), " 1\nx-\n 2");
        assert_eq!(joined.center(), 1);
    }

    #[test]
    fn draw_grows_to_union_box() {
        let base = TextCanvas::new("abc");
        let over = TextCanvas::new("x");
        let drawn = base.draw(&over, 1, -1, true);
        assert_eq!(drawn.to_string(), " x \nabc");
        assert_eq!(drawn.center(), 1);
    }

    #[test]
    fn draw_overwrites_covered_cells() {
        let base = TextCanvas::new("abc");
        let over = TextCanvas::new("xy");
        assert_eq!(base.draw(&over, 1, 0, true).to_string(), "axy");
    }

    #[test]
    fn draw_negative_x_pads_left() {
        let base = TextCanvas::new("ab");
        let over = TextCanvas::new("x");
        let drawn = base.draw(&over, -2, 0, true);
        assert_eq!(drawn.to_string(), "x ab");
    }

    #[test]
    fn draw_center_follows_other_when_requested() {
        let base = TextCanvas::new("ab");
        let over = TextCanvas::new("x\ny");
        let drawn = base.draw(&over, 2, 0, false);
        assert_eq!(drawn.center(), 1);
    }

    #[test]
    fn empty_is_identity_for_horizontal_append() {
        let a = TextCanvas::new("ab\ncd");
        let joined = a.append_top(&TextCanvas::empty(0, 0), true);
        assert_eq!(joined.to_string(), a.to_string());
        assert_eq!(joined.center(), a.center());
    }

    #[test]
    fn from_rows_generates_and_pads() {
        let c = TextCanvas::from_rows(3, |i| "|".repeat(i + 1));
        assert_eq!(c.to_string(), "|  \n|| \n|||");
        assert_eq!(c.center(), 1);
    }

    #[test]
    #[should_panic(expected = "center out of range")]
    fn set_center_rejects_out_of_range() {
        let _ = TextCanvas::new("a").set_center(2);
    }
}
