//! Runtime configuration: CLI values with environment fallbacks.

use anyhow::{Result, bail};

/// Where to fetch the billing export and where to write reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Blob URL (usually carrying a SAS token) or local file path.
    pub source: String,
    /// Root directory for raw downloads and report folders.
    pub out_dir: String,
}

impl Settings {
    /// Resolves settings from CLI values, falling back to the `STORAGE_URL`
    /// and `OUT_FOLDER` environment variables. Fails before any I/O when
    /// either is missing.
    pub fn resolve(source: Option<String>, out: Option<String>) -> Result<Self> {
        Self::resolve_from(
            source,
            out,
            std::env::var("STORAGE_URL").ok(),
            std::env::var("OUT_FOLDER").ok(),
        )
    }

    fn resolve_from(
        source: Option<String>,
        out: Option<String>,
        env_source: Option<String>,
        env_out: Option<String>,
    ) -> Result<Self> {
        let source = source.or(env_source).filter(|s| !s.is_empty());
        let out = out.or(env_out).filter(|s| !s.is_empty());

        let Some(source) = source else {
            bail!("Source is required. Have you set the STORAGE_URL env variable?");
        };
        let Some(out_dir) = out else {
            bail!("Out is required. Have you set the OUT_FOLDER env variable?");
        };

        Ok(Self { source, out_dir })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_values_win() {
        let settings = Settings::resolve_from(
            Some("https://example.com/export.csv".to_string()),
            Some("out".to_string()),
            Some("https://env.example.com".to_string()),
            Some("env_out".to_string()),
        )
        .unwrap();

        assert_eq!(settings.source, "https://example.com/export.csv");
        assert_eq!(settings.out_dir, "out");
    }

    #[test]
    fn test_env_fallback() {
        let settings = Settings::resolve_from(
            None,
            None,
            Some("https://env.example.com".to_string()),
            Some("env_out".to_string()),
        )
        .unwrap();

        assert_eq!(settings.source, "https://env.example.com");
        assert_eq!(settings.out_dir, "env_out");
    }

    #[test]
    fn test_missing_source_message() {
        let err = Settings::resolve_from(None, Some("out".to_string()), None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Source is required. Have you set the STORAGE_URL env variable?"
        );
    }

    #[test]
    fn test_missing_out_message() {
        let err =
            Settings::resolve_from(Some("src".to_string()), None, None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Out is required. Have you set the OUT_FOLDER env variable?"
        );
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let result = Settings::resolve_from(
            Some(String::new()),
            Some("out".to_string()),
            None,
            None,
        );
        assert!(result.is_err());
    }
}
