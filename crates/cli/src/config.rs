// Config-file layer: a TOML file of named sections, each optionally
// carrying a default column selection. CLI flags always win; the file
// is only consulted when neither --include nor --exclude was given.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::CliError;

pub const DEFAULT_SECTION: &str = "default";

/// One section of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Section {
    /// Comma-separated ordered inclusion list.
    pub include: Option<String>,
    /// Comma-separated exclusion set.
    pub exclude: Option<String>,
}

/// Default config location: `~/.tillmerge.toml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tillmerge.toml"))
}

/// Load one section of a config file.
///
/// A missing file is only an error when the path was given explicitly;
/// the implicit default path is allowed to not exist. A missing section
/// is only an error when it isn't the default one.
pub fn load_section(
    path: Option<&Path>,
    section: &str,
) -> Result<Section, CliError> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match default_path() {
            Some(p) => (p, false),
            None => return Ok(Section::default()),
        },
    };

    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Section::default());
        }
        Err(e) => {
            return Err(CliError::usage(format!(
                "cannot read config file {}: {e}",
                path.display()
            )));
        }
    };

    let mut sections: HashMap<String, Section> = toml::from_str(&data).map_err(|e| {
        CliError::usage(format!("cannot parse config file {}: {e}", path.display()))
    })?;

    match sections.remove(section) {
        Some(s) => Ok(s),
        None if section == DEFAULT_SECTION => Ok(Section::default()),
        None => Err(CliError::usage(format!(
            "section {section:?} not found in {}",
            path.display()
        ))),
    }
}
