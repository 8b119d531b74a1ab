// src/config/mod.rs
pub mod consts;
pub mod options;

use std::{fs, io, path::Path};

use crate::error::ConfigError;
use options::AppOptions;

/// Load options from a TOML file. A missing file yields the defaults;
/// missing keys fall back to their defaults too.
pub fn load(path: &Path) -> Result<AppOptions, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            logd!("No config at {}, using defaults", path.display());
            return Ok(AppOptions::default());
        }
        Err(source) => {
            return Err(ConfigError::Io { path: path.display().to_string(), source });
        }
    };
    from_toml(&text)
}

pub fn from_toml(text: &str) -> Result<AppOptions, ConfigError> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HalfPointTable;

    #[test]
    fn missing_file_gives_defaults() {
        let opts = load(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(opts, AppOptions::default());
        assert_eq!(opts.parse.club, "Hay Chess");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let opts = from_toml(r#"
            [parse]
            club = "Echiquier Nantais"
            half_point_variants = ["½", "Â½"]

            [fetch]
            timeout_secs = 5
        "#).unwrap();
        assert_eq!(opts.parse.club, "Echiquier Nantais");
        assert_eq!(opts.parse.half_point_variants, HalfPointTable::new(["Â½", "½"]));
        assert_eq!(opts.fetch.timeout_secs, 5);
        assert_eq!(opts.fetch.workers, consts::WORKERS);
        assert_eq!(opts.store.path, Path::new(consts::DEFAULT_STORE_PATH));
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(from_toml("parse = 3").is_err());
    }
}
