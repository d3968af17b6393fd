use std::{env, path::PathBuf};

use super::schema::Settings;

/// Environment prefix; `ENCORE__AUDIO__DEFAULT_VOLUME=0.5` sets
/// `audio.default_volume`.
const ENV_PREFIX: &str = "ENCORE";

impl Settings {
    /// Layer `ENCORE__*` variables over the config file (when there is one)
    /// over the defaults in `schema`. A missing file is not an error; a file
    /// that does not parse is.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = resolve_config_path() {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Reject values the session or the audio thread cannot work with. The
    /// message names the offending key.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.audio.default_volume) {
            return Err("audio.default_volume must be within 0.0..=1.0".to_string());
        }
        // The audio thread ticks at this rate; 0 would spin.
        if self.audio.position_interval_ms == 0 {
            return Err("audio.position_interval_ms must be >= 1".to_string());
        }
        if !(self.controls.volume_step > 0.0 && self.controls.volume_step <= 1.0) {
            return Err("controls.volume_step must be within (0.0, 1.0]".to_string());
        }
        if self.catalog.max_depth == Some(0) {
            return Err("catalog.max_depth must be >= 1 when set".to_string());
        }
        Ok(())
    }
}

/// `$ENCORE_CONFIG_PATH` when set, otherwise the per-user default.
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os("ENCORE_CONFIG_PATH")
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `encore/config.toml` under `$XDG_CONFIG_HOME`, or under `~/.config`.
pub fn default_config_path() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|dir| dir.join("encore").join("config.toml"))
}
