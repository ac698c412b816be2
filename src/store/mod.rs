//! Cookie store collaborators
//!
//! The codec and inserter only ever talk to a store through the
//! [`CookieStore`] trait: enumerate cookies for a domain, or set one cookie
//! for a URL. Two backends are provided, an in-memory store and a Netscape
//! cookie jar file as written by curl.

use crate::error::{RcookieError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

pub mod jar;
pub mod memory;

pub use jar::JarStore;
pub use memory::MemoryStore;

/// A cookie as held by a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
    /// Unix seconds; `None` for session cookies
    pub expiration_date: Option<i64>,
}

impl StoreCookie {
    /// Materialize the cookie a store should hold for a set request.
    ///
    /// Host comes from the URL. Without an explicit path the default-path of
    /// the URL is used, as browsers do.
    pub fn from_details(details: &SetDetails) -> Result<Self> {
        if details.name.trim().is_empty() {
            return Err(RcookieError::StoreRejected(
                "cookie name must not be empty".to_string(),
            ));
        }
        let domain = details.url.host_str().ok_or_else(|| {
            RcookieError::StoreRejected(format!("URL has no host: {}", details.url))
        })?;

        Ok(StoreCookie {
            name: details.name.clone(),
            value: details.value.clone(),
            domain: domain.to_ascii_lowercase(),
            path: details
                .path
                .clone()
                .unwrap_or_else(|| default_path(&details.url)),
            secure: details.secure.unwrap_or(false),
            http_only: false,
            expiration_date: None,
        })
    }

    /// Domain without the leading dot used for host-and-subdomain cookies.
    pub fn bare_domain(&self) -> &str {
        self.domain.trim_start_matches('.')
    }
}

/// Parameters of a single set call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDetails {
    pub url: Url,
    pub name: String,
    pub value: String,
    pub path: Option<String>,
    pub secure: Option<bool>,
}

/// Selects cookies during enumeration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieFilter {
    pub domain: Option<String>,
}

impl CookieFilter {
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
        }
    }

    /// A cookie matches when its domain equals the filter domain or is a
    /// subdomain of it.
    pub fn matches(&self, cookie: &StoreCookie) -> bool {
        let Some(domain) = &self.domain else {
            return true;
        };
        let wanted = domain.trim_start_matches('.').to_ascii_lowercase();
        let have = cookie.bare_domain().to_ascii_lowercase();
        have == wanted || have.ends_with(&format!(".{}", wanted))
    }
}

/// External cookie storage used for capture and restore
#[async_trait]
pub trait CookieStore: Send + Sync {
    /// Enumerate cookies matching the filter.
    async fn get_all(&self, filter: &CookieFilter) -> Result<Vec<StoreCookie>>;

    /// Store one cookie. Any error means the store refused it.
    async fn set(&self, details: SetDetails) -> Result<()>;
}

/// Replace the cookie with the same domain, path and name, or append.
pub(crate) fn upsert(cookies: &mut Vec<StoreCookie>, cookie: StoreCookie) {
    let existing = cookies.iter_mut().find(|c| {
        c.name == cookie.name
            && c.path == cookie.path
            && c.domain.eq_ignore_ascii_case(&cookie.domain)
    });
    match existing {
        Some(slot) => *slot = cookie,
        None => cookies.push(cookie),
    }
}

/// Reject secure cookies for URLs that are not on a secure scheme.
pub(crate) fn check_secure_scheme(details: &SetDetails) -> Result<()> {
    if details.secure == Some(true) && !crate::utils::UrlUtils::is_secure(&details.url) {
        return Err(RcookieError::StoreRejected(format!(
            "secure cookie '{}' cannot be set for {}",
            details.name, details.url
        )));
    }
    Ok(())
}

/// RFC 6265 default-path: the directory of the request path.
pub fn default_path(url: &Url) -> String {
    let path = url.path();
    if !path.starts_with('/') {
        return "/".to_string();
    }
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{default_path, upsert, CookieFilter, SetDetails, StoreCookie};
    use url::Url;

    fn cookie(domain: &str, name: &str, value: &str) -> StoreCookie {
        StoreCookie {
            name: name.to_string(),
            value: value.to_string(),
            domain: domain.to_string(),
            path: "/".to_string(),
            secure: false,
            http_only: false,
            expiration_date: None,
        }
    }

    #[test]
    fn filter_matches_domain_and_subdomains() {
        let filter = CookieFilter::for_domain("example.com");
        assert!(filter.matches(&cookie("example.com", "a", "1")));
        assert!(filter.matches(&cookie(".example.com", "a", "1")));
        assert!(filter.matches(&cookie("www.Example.com", "a", "1")));
        assert!(!filter.matches(&cookie("badexample.com", "a", "1")));
        assert!(!filter.matches(&cookie("other.org", "a", "1")));
        assert!(CookieFilter::default().matches(&cookie("other.org", "a", "1")));
    }

    #[test]
    fn default_path_uses_directory() {
        let url = Url::parse("https://example.com").expect("url");
        assert_eq!(default_path(&url), "/");
        let url = Url::parse("https://example.com/a/b/page").expect("url");
        assert_eq!(default_path(&url), "/a/b");
        let url = Url::parse("https://example.com/page").expect("url");
        assert_eq!(default_path(&url), "/");
    }

    #[test]
    fn from_details_takes_host_and_defaults() {
        let details = SetDetails {
            url: Url::parse("https://Example.com/app/login").expect("url"),
            name: "sid".to_string(),
            value: "1".to_string(),
            path: None,
            secure: None,
        };
        let cookie = StoreCookie::from_details(&details).expect("cookie");
        assert_eq!(cookie.domain, "example.com");
        assert_eq!(cookie.path, "/app");
        assert!(!cookie.secure);
    }

    #[test]
    fn upsert_replaces_same_identity() {
        let mut cookies = vec![cookie("example.com", "a", "1")];
        upsert(&mut cookies, cookie("EXAMPLE.com", "a", "2"));
        upsert(&mut cookies, cookie("example.com", "b", "3"));
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0].value, "2");
    }
}
