//! Input checks for uploads and settings fields.

use crate::constants::{AUDIO_MAX_BYTES, PHOTO_MAX_BYTES};
use thiserror::Error;

pub const PHOTO_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];
pub const AUDIO_TYPES: [&str; 4] = ["audio/mpeg", "audio/mp3", "audio/wav", "audio/ogg"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Invalid file type. Please upload JPEG, PNG, GIF, or WebP.")]
    PhotoType,
    #[error("File too large. Maximum size is 5MB.")]
    PhotoSize,
    #[error("Invalid audio format. Please upload MP3, WAV, or OGG.")]
    AudioType,
    #[error("Audio file too large. Maximum size is 10MB.")]
    AudioSize,
}

pub fn validate_photo_upload(mime: &str, size_bytes: u64) -> Result<(), UploadError> {
    if !PHOTO_TYPES.contains(&mime) {
        return Err(UploadError::PhotoType);
    }
    if size_bytes > PHOTO_MAX_BYTES {
        return Err(UploadError::PhotoSize);
    }
    Ok(())
}

pub fn validate_audio_upload(mime: &str, size_bytes: u64) -> Result<(), UploadError> {
    if !AUDIO_TYPES.contains(&mime) {
        return Err(UploadError::AudioType);
    }
    if size_bytes > AUDIO_MAX_BYTES {
        return Err(UploadError::AudioSize);
    }
    Ok(())
}

/// Escape text for safe insertion into markup.
pub fn sanitize_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Absolute URL with an alphabetic scheme and something after the colon.
pub fn validate_url(url: &str) -> bool {
    let Some((scheme, rest)) = url.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let scheme_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    scheme_ok && !rest.is_empty() && !url.chars().any(char::is_whitespace)
}

/// `YYYY-MM-DD` naming a real calendar day.
pub fn validate_date(date: &str) -> bool {
    let mut parts = date.split('-');
    let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if y.len() != 4 || m.len() != 2 || d.len() != 2 {
        return false;
    }
    let (Ok(year), Ok(month), Ok(day)) = (y.parse::<u32>(), m.parse::<u32>(), d.parse::<u32>())
    else {
        return false;
    };
    (1..=12).contains(&month) && day >= 1 && day <= days_in_month(year, month)
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_rules() {
        assert_eq!(validate_photo_upload("image/png", 1024), Ok(()));
        assert_eq!(validate_photo_upload("image/bmp", 1024), Err(UploadError::PhotoType));
        assert_eq!(
            validate_photo_upload("image/jpeg", PHOTO_MAX_BYTES + 1),
            Err(UploadError::PhotoSize)
        );
        assert_eq!(validate_photo_upload("image/jpeg", PHOTO_MAX_BYTES), Ok(()));
    }

    #[test]
    fn audio_rules() {
        assert_eq!(validate_audio_upload("audio/ogg", 10), Ok(()));
        assert_eq!(validate_audio_upload("video/mp4", 10), Err(UploadError::AudioType));
        assert_eq!(
            validate_audio_upload("audio/wav", AUDIO_MAX_BYTES + 1),
            Err(UploadError::AudioSize)
        );
    }

    #[test]
    fn sanitize_escapes_markup() {
        assert_eq!(
            sanitize_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(sanitize_html("plain"), "plain");
    }

    #[test]
    fn urls() {
        assert!(validate_url("https://example.com/song.mp3"));
        assert!(validate_url("data:audio/mpeg;base64,AAAA"));
        assert!(!validate_url("song.mp3"));
        assert!(!validate_url("1http://x"));
        assert!(!validate_url("https:"));
        assert!(!validate_url("https://exa mple.com"));
    }

    #[test]
    fn dates() {
        assert!(validate_date("2024-02-14"));
        assert!(validate_date("2024-02-29"));
        assert!(!validate_date("2023-02-29"));
        assert!(!validate_date("2024-13-01"));
        assert!(!validate_date("2024-2-14"));
        assert!(!validate_date("Feb 14"));
    }
}
