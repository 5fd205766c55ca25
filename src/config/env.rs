use crate::utils::error::Result;
use std::env;
use std::path::Path;

/// Name of the environment variable holding the connection string for an
/// account index, e.g. `AZURE_CONNECTION_1`.
pub fn connection_var_name(prefix: &str, index: usize) -> String {
    format!("{}_{}", prefix, index)
}

/// Reads a connection string from the process environment. Empty values
/// count as absent.
pub fn lookup_connection_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Loads a `.env` file into the process environment. A missing file is
/// not an error.
pub fn load_dotenv(path: Option<&Path>) -> Result<()> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(path) => {
            tracing::debug!(".env loaded from {}", path.display());
            Ok(())
        }
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No .env file found, using process environment");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
