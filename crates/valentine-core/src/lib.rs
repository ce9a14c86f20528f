//! Platform-independent logic for the valentine proposal page.
//!
//! Nothing in here touches the DOM; the web front-end owns the browser glue
//! and drives these types from its event handlers and frame loop.

pub mod constants;
pub mod ecard;
pub mod evasive;
pub mod gallery;
pub mod merge;
pub mod particles;
pub mod reveal;
pub mod settings;
pub mod storage;
pub mod store;
pub mod tree;
pub mod validate;

pub use constants::*;
pub use evasive::{Dodge, EvasiveButton};
pub use gallery::{Lightbox, LightboxKey};
pub use merge::{deep_merge, merged};
pub use particles::{Particle, ParticleField, ParticleKind, ParticleSurface, Sprite};
pub use settings::SettingsForm;
pub use storage::{DisabledStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{ConfigError, ConfigStore, LoadOutcome};
pub use tree::*;
pub use validate::UploadError;
