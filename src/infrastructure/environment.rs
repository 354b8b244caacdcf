//! Builds the environment snapshot from the process and a dotenv file

use std::path::Path;

use crate::domain::Environment;

/// Process environment with `dev_vars` entries filled in underneath.
/// Variables already set in the process are never overridden.
pub fn load_environment(dev_vars: &Path) -> Environment {
    let mut env = Environment::from_process();
    env.merge_missing(read_dotenv(dev_vars));
    env
}

/// Parse a dotenv file without touching the process environment. A missing
/// file yields nothing; any other failure is logged and yields what was
/// read before it.
pub fn read_dotenv(path: &Path) -> Vec<(String, String)> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            tracing::debug!(path = %path.display(), "No dotenv file");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not read dotenv file");
            return Vec::new();
        }
    };

    let mut vars = Vec::new();
    for item in iter {
        match item {
            Ok(pair) => vars.push(pair),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not parse dotenv file");
                break;
            }
        }
    }

    tracing::debug!(path = %path.display(), count = vars.len(), "Loaded dotenv file");
    vars
}
