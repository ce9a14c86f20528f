//! Layout for the downloadable e-card image.
//!
//! Drawing happens in the front-end; everything here is geometry and text so
//! it can be checked on the host. Text width comes from an injected measure
//! function (the canvas `measureText` in the browser).

pub const CARD_WIDTH: u32 = 1200;
pub const CARD_HEIGHT: u32 = 630;
pub const GRADIENT_FROM: &str = "#0a0a0f";
pub const GRADIENT_TO: &str = "#1a0e1e";

pub const PHOTO_HEIGHT: f64 = 400.0;
pub const PHOTO_TOP: f64 = 50.0;

pub const MESSAGE_CENTER_Y: f64 = 500.0;
pub const MESSAGE_SIDE_PADDING: f64 = 100.0;
pub const MESSAGE_LINE_HEIGHT: f64 = 60.0;
pub const MESSAGE_COLOR: &str = "#ff2d55";
pub const MESSAGE_FONT: &str = "bold 48px Playfair Display, serif";

pub const DATE_Y: f64 = 590.0;
pub const DATE_COLOR: &str = "#f8f8f8";
pub const DATE_FONT: &str = "24px Inter, sans-serif";

pub const ORNAMENT_FONT: &str = "40px Arial";

/// Decorative glyphs and their baseline positions.
pub fn ornaments() -> [(&'static str, f64, f64); 4] {
    let w = f64::from(CARD_WIDTH);
    let h = f64::from(CARD_HEIGHT);
    [
        ("❤️", 100.0, 100.0),
        ("❤️", w - 150.0, 100.0),
        ("💕", 150.0, h - 80.0),
        ("💕", w - 200.0, h - 80.0),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Scale a photo to [`PHOTO_HEIGHT`] keeping its aspect ratio, centred
/// horizontally. `None` for degenerate image sizes.
pub fn fit_photo(image_width: f64, image_height: f64) -> Option<Rect> {
    if !(image_width > 0.0 && image_height > 0.0) {
        return None;
    }
    let width = PHOTO_HEIGHT * image_width / image_height;
    Some(Rect {
        x: (f64::from(CARD_WIDTH) - width) / 2.0,
        y: PHOTO_TOP,
        width,
        height: PHOTO_HEIGHT,
    })
}

/// Greedy word wrap. A word never moves to a new line when it is the first
/// word of the text, so an overlong first word stays on line one.
pub fn wrap_text(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for (n, word) in text.split(' ').enumerate() {
        let candidate = format!("{line}{word} ");
        if measure(&candidate) > max_width && n > 0 {
            lines.push(line.trim_end().to_string());
            line = format!("{word} ");
        } else {
            line = candidate;
        }
    }
    lines.push(line.trim_end().to_string());
    lines
}

/// Baselines for `count` lines centred vertically on `center_y`.
pub fn line_baselines(count: usize, center_y: f64, line_height: f64) -> Vec<f64> {
    let start = center_y - (count.saturating_sub(1) as f64 * line_height) / 2.0;
    (0..count).map(|i| start + i as f64 * line_height).collect()
}

pub fn message_max_width() -> f64 {
    f64::from(CARD_WIDTH) - 2.0 * MESSAGE_SIDE_PADDING
}

/// e.g. "February 14, 2024". `month` is 1-based.
pub fn long_date(year: u32, month: u32, day: u32) -> String {
    const MONTHS: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    let name = MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("January");
    format!("{name} {day}, {year}")
}

pub fn download_name(timestamp_ms: u64) -> String {
    format!("valentine-{timestamp_ms}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Monospace stand-in: 10 px per character.
    fn mono(s: &str) -> f64 {
        s.chars().count() as f64 * 10.0
    }

    #[test]
    fn wraps_on_width() {
        let lines = wrap_text("aaa bbb ccc", 80.0, mono);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn long_first_word_stays() {
        let lines = wrap_text("abcdefghijkl x", 50.0, mono);
        assert_eq!(lines, vec!["abcdefghijkl", "x"]);
    }

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap_text("hi", 1000.0, mono), vec!["hi"]);
    }

    #[test]
    fn baselines_are_centred() {
        assert_eq!(line_baselines(1, 500.0, 60.0), vec![500.0]);
        assert_eq!(line_baselines(3, 500.0, 60.0), vec![440.0, 500.0, 560.0]);
        assert!(line_baselines(0, 500.0, 60.0).is_empty());
    }

    #[test]
    fn photo_fits_height_and_centres() {
        let r = fit_photo(800.0, 400.0).unwrap();
        assert_eq!(r.height, PHOTO_HEIGHT);
        assert_eq!(r.width, 800.0);
        assert_eq!(r.x, 200.0);
        assert!(fit_photo(0.0, 10.0).is_none());
    }

    #[test]
    fn dates_and_names() {
        assert_eq!(long_date(2024, 2, 14), "February 14, 2024");
        assert_eq!(download_name(42), "valentine-42.png");
        assert_eq!(message_max_width(), 1000.0);
    }
}
