mod app_context;
mod document_path;

use std::path::Path;

pub use app_context::AppContext;
pub use document_path::resolve_document_path;

use anyhow::Context;
use tally_config::TallyConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<TallyConfig> {
    load_dotenv(flags)?;
    TallyConfig::load().map_err(anyhow::Error::from)
}

/// A `.env` beside the `--document` file wins over one in the working
/// directory.
fn load_dotenv(flags: &GlobalFlags) -> anyhow::Result<()> {
    let document_dir = flags
        .document
        .as_deref()
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty());

    if let Some(dir) = document_dir {
        let env_path = dir.join(".env");
        if env_path.exists() {
            dotenvy::from_path(&env_path)
                .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
            return Ok(());
        }
    }

    dotenvy::dotenv().ok();
    Ok(())
}
