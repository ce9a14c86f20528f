//! Staggered letter-by-letter reveal of the hero title.

pub const LETTER_STAGGER_MS: u32 = 50;
pub const LETTER_ANIMATION: &str = "letterReveal 0.5s";

/// One entry per character (whitespace included) with the CSS `animation`
/// value that fades it in after its predecessors.
pub fn letter_reveal(text: &str) -> Vec<(char, String)> {
    text.trim()
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let delay = i as u32 * LETTER_STAGGER_MS;
            (c, format!("{LETTER_ANIMATION} {delay}ms forwards"))
        })
        .collect()
}

/// Time until the last letter has started.
pub fn reveal_duration_ms(letters: usize) -> u32 {
    letters as u32 * LETTER_STAGGER_MS
}
