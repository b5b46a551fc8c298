//! Credentials from the process environment, backed by an optional `.env` file.

use std::collections::HashMap;
use std::path::Path;

use audit_engine::{ConfigError, Credentials};
use audit_logging::{audit_info, audit_warn};

/// Variables set in the process environment take precedence over the file.
/// A missing file is fine; an unreadable one is logged and ignored.
pub fn load_credentials(env_file: &Path) -> Result<Credentials, ConfigError> {
    let file_vars = read_env_file(env_file);
    Credentials::from_vars(|name| {
        std::env::var(name)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| file_vars.get(name).cloned())
    })
}

fn read_env_file(path: &Path) -> HashMap<String, String> {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(err) if err.not_found() => return HashMap::new(),
        Err(err) => {
            audit_warn!("Ignoring env file {:?}: {}", path, err);
            return HashMap::new();
        }
    };

    let mut vars = HashMap::new();
    for entry in entries {
        match entry {
            Ok((key, value)) => {
                vars.insert(key, value);
            }
            Err(err) => {
                audit_warn!("Ignoring env file {:?}: {}", path, err);
                return HashMap::new();
            }
        }
    }
    audit_info!("Loaded {} variables from {:?}", vars.len(), path);
    vars
}
