// Element ids, timings and sizes used by the page glue. Physics and layout
// tuning lives in `valentine_core::constants`.

// Element ids
pub const PARTICLE_CANVAS_ID: &str = "particle-canvas";
pub const LANDING_ID: &str = "landing";
pub const SUCCESS_ID: &str = "success";
pub const YES_BUTTON_ID: &str = "yes-btn";
pub const NO_BUTTON_ID: &str = "no-btn";
pub const THEME_TOGGLE_ID: &str = "theme-toggle";
pub const GALLERY_ID: &str = "photo-gallery";
pub const ECARD_BUTTON_ID: &str = "ecard-btn";

pub const LIGHTBOX_ID: &str = "lightbox";
pub const LIGHTBOX_IMAGE_ID: &str = "lightbox-image";
pub const LIGHTBOX_CAPTION_ID: &str = "lightbox-caption";
pub const LIGHTBOX_CLOSE_ID: &str = "lightbox-close";
pub const LIGHTBOX_PREV_ID: &str = "lightbox-prev";
pub const LIGHTBOX_NEXT_ID: &str = "lightbox-next";

pub const PLAY_PAUSE_ID: &str = "play-pause";
pub const VOLUME_SLIDER_ID: &str = "volume";
pub const AUDIO_PLAYER_ID: &str = "audio-player";
pub const UNMUTE_PROMPT_ID: &str = "unmute-prompt";
pub const UNMUTE_YES_ID: &str = "unmute-yes";
pub const UNMUTE_NO_ID: &str = "unmute-no";
pub const MUSIC_UPLOAD_ID: &str = "music-upload";

pub const SETTINGS_BUTTON_ID: &str = "settings-btn";
pub const SETTINGS_MODAL_ID: &str = "settings-modal";
pub const SETTINGS_FORM_ID: &str = "settings-form";
pub const SETTINGS_CLOSE_ID: &str = "close-settings";
pub const SETTINGS_RESET_ID: &str = "reset-settings";
pub const PHOTO_UPLOADER_ID: &str = "photo-uploader";
pub const ADD_PHOTO_ID: &str = "add-photo";

// Settings form fields
pub const FIELD_LOVER_NAME: &str = "lover_name";
pub const FIELD_YOUR_NAME: &str = "your_name";
pub const FIELD_SPECIAL_PLACE: &str = "special_place";
pub const FIELD_DATE: &str = "date";
pub const FIELD_MEMORY: &str = "memory";
pub const FIELD_SUBHEAD: &str = "subhead";
pub const FIELD_TONE: &str = "theme_tone";
pub const FIELD_AUDIO_ENABLED: &str = "audio-enabled";

// Selectors
pub const HERO_SUBTITLE_SELECTOR: &str = ".hero-subtitle";
pub const THEME_ICON_SELECTOR: &str = ".theme-icon";
pub const MESSAGE_SELECTOR: &str = ".message";
pub const HERO_TITLE_SELECTOR: &str = ".hero-title";
pub const HEART_ICON_SELECTOR: &str = ".heart-icon";

// Timings (milliseconds)
pub const YES_TRANSITION_MS: i32 = 500; // button fade before the success screen
pub const TOOLTIP_VISIBLE_MS: i32 = 2500;
pub const TOOLTIP_FADE_MS: i32 = 300;
pub const LIGHTBOX_SWAP_MS: i32 = 200; // image cross-fade
pub const HERO_REVEAL_DELAY_MS: i32 = 300;

// Tooltip placement above the evasive button
pub const TOOLTIP_OFFSET_Y_PX: f64 = 60.0;

// Placeholder shown when a photo fails to load
pub const MISSING_IMAGE_SVG: &str = "data:image/svg+xml,<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"400\" height=\"300\"><rect fill=\"%23333\" width=\"400\" height=\"300\"/><text x=\"50%\" y=\"50%\" text-anchor=\"middle\" fill=\"%23999\" font-size=\"20\">Image not found</text></svg>";
