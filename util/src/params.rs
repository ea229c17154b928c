//! Generic parameters functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::de::DeserializeOwned;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use thiserror::Error;
use toml;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An error that occurs during loading of a parameter file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot find the software root directory: {0}")]
    SwRootNotFound(std::io::Error),

    #[error("Cannot load the parameter file {0:?}: {1}")]
    FileLoadError(PathBuf, std::io::Error),

    #[error("Cannot read the parameter file {0:?}: {1}")]
    DeserialiseError(PathBuf, toml::de::Error)
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Load a parameter file
///
/// Relative paths are resolved against the "params" directory in the
/// software root, absolute paths are used as given.
pub fn load<P, Q>(param_file_path: Q) -> Result<P, LoadError>
where
    P: DeserializeOwned,
    Q: AsRef<Path>
{
    let path = resolve(param_file_path.as_ref())?;

    // Load the file into a string
    let params_str = read_to_string(&path)
        .map_err(|e| LoadError::FileLoadError(path.clone(), e))?;

    from_str(&params_str).map_err(|e| LoadError::DeserialiseError(path, e))
}

/// Parse a parameter struct from a TOML string.
pub fn from_str<P>(params_str: &str) -> Result<P, toml::de::Error>
where
    P: DeserializeOwned
{
    toml::from_str(params_str)
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn resolve(param_file_path: &Path) -> Result<PathBuf, LoadError> {
    if param_file_path.is_absolute() {
        return Ok(param_file_path.to_path_buf());
    }

    let mut path = crate::host::get_sw_root()
        .map_err(LoadError::SwRootNotFound)?;
    path.push("params");
    path.push(param_file_path);

    Ok(path)
}
