mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Downloads the full object at `url` and writes its contents verbatim to
/// `dest`, overwriting any existing file. Returns the number of bytes
/// written.
///
/// # Errors
///
/// Network, authorization (non-2xx status) and file-system errors propagate
/// to the caller; there is no retry.
pub async fn download_blob<C: HttpClient>(client: &C, url: &str, dest: &Path) -> Result<u64> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client
        .execute(req)
        .await
        .context("downloading billing export")?
        .error_for_status()?;

    let bytes = resp.bytes().await?;
    std::fs::write(dest, &bytes).with_context(|| format!("writing {}", dest.display()))?;

    info!(dest = %dest.display(), bytes = bytes.len(), "Downloaded blob data");
    Ok(bytes.len() as u64)
}

/// Stages the billing export at `dest`: fetches over HTTP for URL sources,
/// copies for local file paths.
pub async fn fetch_source<C: HttpClient>(client: &C, source: &str, dest: &Path) -> Result<u64> {
    if source.starts_with("http") {
        download_blob(client, source, dest).await
    } else {
        let bytes =
            std::fs::copy(source, dest).with_context(|| format!("copying {source}"))?;
        info!(dest = %dest.display(), bytes, "Copied local billing export");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[tokio::test]
    async fn test_fetch_source_copies_local_file() {
        let src = env::temp_dir().join("billing_reporter_test_fetch_src.csv");
        let dest = env::temp_dir().join("billing_reporter_test_fetch_dest.csv");
        fs::write(&src, "a,b\n1,2\n").unwrap();

        let bytes = fetch_source(&BasicClient::new(), src.to_str().unwrap(), &dest)
            .await
            .unwrap();

        assert_eq!(bytes, 8);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "a,b\n1,2\n");

        fs::remove_file(&src).unwrap();
        fs::remove_file(&dest).unwrap();
    }

    #[tokio::test]
    async fn test_fetch_source_overwrites_dest() {
        let src = env::temp_dir().join("billing_reporter_test_overwrite_src.csv");
        let dest = env::temp_dir().join("billing_reporter_test_overwrite_dest.csv");
        fs::write(&src, "new").unwrap();
        fs::write(&dest, "old contents that are longer").unwrap();

        fetch_source(&BasicClient::new(), src.to_str().unwrap(), &dest)
            .await
            .unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");

        fs::remove_file(&src).unwrap();
        fs::remove_file(&dest).unwrap();
    }

    #[tokio::test]
    async fn test_fetch_source_missing_local_file() {
        let dest = env::temp_dir().join("billing_reporter_test_missing_dest.csv");

        let result = fetch_source(&BasicClient::new(), "/no/such/billing.csv", &dest).await;

        assert!(result.is_err());
    }
}
