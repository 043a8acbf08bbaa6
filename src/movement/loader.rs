//! Loader for the movement tuning RON file.

use ron::Options;
use std::fs;
use std::path::Path;

use crate::movement::{ConfigError, MovementProfile};

/// Default location of the movement profile, relative to the working directory.
pub const MOVEMENT_CONFIG_PATH: &str = "assets/data/movement.ron";

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a profile from RON text. Missing fields take their defaults.
pub fn parse_profile(contents: &str, file_name: &str) -> Result<MovementProfile, ConfigError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| ConfigError::Parse {
            file: file_name.to_string(),
            message: e.to_string(),
        })
}

/// Load a single profile struct from a RON file.
pub fn load_profile(path: &Path) -> Result<MovementProfile, ConfigError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        file: file_name.clone(),
        message: e.to_string(),
    })?;

    parse_profile(&contents, &file_name)
}
