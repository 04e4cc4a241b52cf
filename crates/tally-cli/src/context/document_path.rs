use std::path::{Path, PathBuf};

use tally_config::TallyConfig;

/// Pick the document to open: `--document` first, then
/// `general.default_document`.
pub fn resolve_document_path(
    explicit: Option<&Path>,
    config: &TallyConfig,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if config.general.has_default_document() {
        return Ok(PathBuf::from(&config.general.default_document));
    }
    anyhow::bail!(
        "no document given. Pass --document PATH or set general.default_document \
         (TALLY_GENERAL__DEFAULT_DOCUMENT)"
    )
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use tally_config::TallyConfig;

    use super::resolve_document_path;

    fn config_with_default(path: &str) -> TallyConfig {
        let mut config = TallyConfig::default();
        config.general.default_document = path.to_string();
        config
    }

    #[test]
    fn explicit_flag_wins_over_config() {
        let config = config_with_default("configured.json");
        let path = resolve_document_path(Some(Path::new("flag.json")), &config)
            .expect("path should resolve");
        assert_eq!(path, PathBuf::from("flag.json"));
    }

    #[test]
    fn falls_back_to_configured_default() {
        let config = config_with_default("configured.json");
        let path = resolve_document_path(None, &config).expect("path should resolve");
        assert_eq!(path, PathBuf::from("configured.json"));
    }

    #[test]
    fn errors_without_any_document() {
        let err = resolve_document_path(None, &TallyConfig::default()).expect_err("should fail");
        assert!(err.to_string().contains("--document"));
    }
}
