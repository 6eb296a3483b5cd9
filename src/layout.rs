/// Content sizing for the overlay window.
///
/// The window is always shrunk to fit its text (like a label-only widget
/// calling adjust-size), so placement works with a size derived from the
/// displayed text and the font size.
use crate::geometry::Dimensions;

/// Space between the text and the window edge, in pixels
pub const PADDING: u32 = 8;

// Metrics in tenths of the font size
const LINE_HEIGHT: u32 = 13;
const NARROW_ADVANCE: u32 = 6;
const WIDE_ADVANCE: u32 = 10;

/// Estimated window size for `text` rendered at `font_size` pixels
pub fn fit_content(text: &str, font_size: u32) -> Dimensions {
    let widest = text
        .lines()
        .map(|line| {
            line.chars()
                .map(|c| if c.is_ascii() { NARROW_ADVANCE } else { WIDE_ADVANCE })
                .sum::<u32>()
        })
        .max()
        .unwrap_or(0);
    let line_count = text.lines().count().max(1) as u32;

    Dimensions::new(
        tenths_ceil(widest * font_size) + 2 * PADDING,
        tenths_ceil(line_count * font_size * LINE_HEIGHT) + 2 * PADDING,
    )
}

fn tenths_ceil(value: u32) -> u32 {
    (value + 9) / 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        // 8 ascii chars at 20px: 8 * 0.6 * 20 = 96, one line of 26
        assert_eq!(fit_content("12:34:56", 20), Dimensions::new(96 + 16, 26 + 16));
    }

    #[test]
    fn test_grows_with_font_size() {
        let small = fit_content("12:34:56", 18);
        let large = fit_content("12:34:56", 50);
        assert!(large.width > small.width);
        assert!(large.height > small.height);
    }

    #[test]
    fn test_multiline_uses_widest_line() {
        let size = fit_content("考试进行中\n12:34:56", 10);
        // five wide chars (50px) beat eight narrow ones (48px)
        assert_eq!(size.width, 50 + 16);
        assert_eq!(size.height, 26 + 16);
    }

    #[test]
    fn test_empty_text_keeps_one_line() {
        assert_eq!(fit_content("", 10), Dimensions::new(16, 13 + 16));
    }
}
