use crate::fetch::client::HttpClient;
use async_trait::async_trait;

/// An [`HttpClient`] wrapper that appends a shared-access-signature token to
/// the request URL.
///
/// `token` is the raw SAS query string (`sv=...&ss=...&sig=...`), with or
/// without a leading `?`. The token is already percent-encoded by the issuer,
/// so it is appended verbatim rather than re-encoded; existing query
/// parameters on the URL are left intact.
pub struct SasToken<C> {
    pub inner: C,
    pub token: String,
}

/// True when `url`'s query string already carries a `sig` parameter, i.e. a
/// SAS token is embedded in the URL itself.
pub fn has_sas_signature(url: &str) -> bool {
    url.split_once('?')
        .map(|(_, query)| query.split('&').any(|p| p.starts_with("sig=")))
        .unwrap_or(false)
}

fn append_token(url: &mut reqwest::Url, token: &str) {
    let token = token.trim_start_matches('?');
    if token.is_empty() {
        return;
    }
    let merged = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{existing}&{token}"),
        _ => token.to_string(),
    };
    url.set_query(Some(&merged));
}

#[async_trait]
impl<C: HttpClient> HttpClient for SasToken<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        append_token(req.url_mut(), &self.token);
        self.inner.execute(req).await
    }
}
