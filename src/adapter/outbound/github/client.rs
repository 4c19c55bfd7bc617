//! GitHub REST API client.
//!
//! Lists every release of a repository page by page, following the
//! `Link: <...>; rel="next"` header until the last page, and folds the
//! result into one [`ReleaseStats`] snapshot.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK, USER_AGENT};
use reqwest::{Client as HttpClient, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

use super::dto::GithubRelease;
use super::settings::GithubConfig;
use crate::domain::{Release, ReleaseStats};
use crate::error::{FetchError, Result};
use crate::port::outbound::fetcher::{FetchRequest, ReleaseFetcher};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const CLIENT_USER_AGENT: &str = concat!("release-stats/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the GitHub releases endpoint.
pub struct GithubClient {
    http: HttpClient,
    api_url: String,
    per_page: u32,
}

impl GithubClient {
    /// Create a client for `api_url` with default HTTP settings.
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            api_url: api_url.into(),
            per_page: GithubConfig::default().per_page,
        }
    }

    #[must_use]
    pub fn from_config(config: &GithubConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(CLIENT_USER_AGENT)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            api_url: config.api_url.clone(),
            per_page: config.per_page,
        }
    }

    /// URL of the first releases page for `owner/repo`.
    ///
    /// # Errors
    /// Returns an error if the configured API URL is not a valid base.
    pub fn releases_url(&self, owner: &str, repo: &str) -> std::result::Result<Url, FetchError> {
        let mut url = Url::parse(self.api_url.trim_end_matches('/'))?;
        url.path_segments_mut()
            .map_err(|()| FetchError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["repos", owner, repo, "releases"]);
        url.query_pairs_mut()
            .append_pair("per_page", &self.per_page.to_string())
            .append_pair("page", "1");
        Ok(url)
    }

    fn headers(token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        if let Some(token) = token {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Ignoring API token with invalid header characters"),
            }
        }
        headers
    }

    /// Fetch one page and the URL of the page after it, if any.
    async fn get_page(
        &self,
        url: Url,
        headers: &HeaderMap,
        request: &FetchRequest,
    ) -> Result<(Vec<GithubRelease>, Option<Url>)> {
        debug!(url = %url, "Fetching releases page");

        let response = self
            .http
            .get(url.clone())
            .headers(headers.clone())
            .send()
            .await
            .map_err(FetchError::from)?;

        if let Some(err) = status_error(response.status(), request, &url) {
            return Err(err.into());
        }

        let next = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_page_url);

        let releases = response
            .json::<Vec<GithubRelease>>()
            .await
            .map_err(FetchError::from)?;
        Ok((releases, next))
    }

    async fn fetch_all(&self, request: &FetchRequest) -> Result<ReleaseStats> {
        let fetched_at = Utc::now();
        let headers = Self::headers(request.token.as_deref());

        let mut next = Some(self.releases_url(&request.owner, &request.repo)?);
        let mut pages = 0usize;
        let mut stats = ReleaseStats::new(&request.owner, &request.repo, fetched_at);

        while let Some(url) = next.take() {
            let (releases, following) = self.get_page(url, &headers, request).await?;
            pages += 1;
            for release in releases {
                stats.push_release(Release::from(release));
            }
            next = following;
        }

        info!(
            repository = %stats.full_name(),
            pages,
            releases = stats.releases.len(),
            total_downloads = stats.total_downloads,
            "Fetched releases"
        );
        Ok(stats)
    }
}

#[async_trait]
impl ReleaseFetcher for GithubClient {
    async fn fetch(&self, request: &FetchRequest) -> Result<ReleaseStats> {
        request.validate()?;

        match request.deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.fetch_all(request))
                .await
                .map_err(|_| FetchError::DeadlineExceeded(deadline))?,
            None => self.fetch_all(request).await,
        }
    }
}

/// Map a non-success status to its fetch error.
fn status_error(status: StatusCode, request: &FetchRequest, url: &Url) -> Option<FetchError> {
    if status.is_success() {
        return None;
    }
    Some(match status {
        StatusCode::NOT_FOUND => FetchError::NotFound {
            owner: request.owner.clone(),
            repo: request.repo.clone(),
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::Unauthorized {
            status: status.as_u16(),
        },
        _ => FetchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        },
    })
}

/// Extract the `rel="next"` target from a `Link` header value.
pub fn next_page_url(link: &str) -> Option<Url> {
    link.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        let target = target.strip_prefix('<')?.strip_suffix('>')?;
        Url::parse(target).ok()
    })
}
