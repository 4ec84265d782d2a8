//! Settings for the notification speaker.
//!
//! Settings live in a flat JSON file. Any field the file leaves out is
//! filled from the defaults, and a broken file degrades to defaults.

mod settings;

pub use settings::{
    DEFAULT_MAX_LENGTH, DEFAULT_NEURAL_PORT, DEFAULT_TRUNCATE_TO, Settings, SettingsError,
};
