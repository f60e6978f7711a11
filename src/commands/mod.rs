pub mod apply;
pub mod status;

use crate::ui;
use eopkgkit::{Client, Error};
use std::path::PathBuf;

/// Create an eopkgkit client, with better error handling.
///
/// An explicit binary path (from `--eopkg-bin` or `EOPKG_PATH`) skips
/// discovery; otherwise the conventional location and PATH are searched.
pub fn create_client(eopkg_bin: Option<PathBuf>) -> Result<Client, String> {
    if let Some(path) = eopkg_bin {
        return Ok(Client::with_path(path));
    }
    match Client::new() {
        Ok(c) => Ok(c),
        Err(Error::EopkgNotFound) => Err(
            "eopkg is not installed.\n\n  eopkgctl drives the Solus package manager and needs the eopkg binary on PATH\n  (or an explicit --eopkg-bin / EOPKG_PATH override).".to_string(),
        ),
        Err(e) => Err(format!("Failed to initialize eopkg client: {e}")),
    }
}

/// Report a fatal command failure and exit non-zero.
///
/// In JSON mode the failure is the structured report itself; otherwise it
/// goes to stderr.
pub fn fail(json: bool, msg: &str) -> ! {
    if json {
        let report = serde_json::json!({
            "changed": false,
            "failed": true,
            "msg": msg,
        });
        println!("{report}");
    } else {
        ui::error(msg);
    }
    std::process::exit(1);
}
