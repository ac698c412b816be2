//! Captured cookie state for one browsing context
//!
//! A `Session` is owned by the caller and passed to export operations,
//! replacing any process-wide "last captured cookies" cache.

use crate::codec::{self, CookieRecord};
use crate::error::{RcookieError, Result};
use crate::store::{CookieFilter, CookieStore, StoreCookie};
use crate::utils::UrlUtils;
use log::{debug, info};
use url::Url;

#[derive(Debug, Clone, Default)]
pub struct Session {
    domain: String,
    cookies: Vec<StoreCookie>,
}

impl Session {
    /// Capture every cookie the store holds for the URL's host.
    pub async fn capture<S: CookieStore + ?Sized>(store: &S, url: &Url) -> Result<Self> {
        let domain = UrlUtils::cookie_host(url)
            .ok_or_else(|| RcookieError::InvalidUrl(format!("URL has no host: {}", url)))?;
        let cookies = store.get_all(&CookieFilter::for_domain(&domain)).await?;
        info!("Captured {} cookies for {}", cookies.len(), domain);
        Ok(Self { domain, cookies })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn count(&self) -> usize {
        self.cookies.len()
    }

    pub fn cookies(&self) -> &[StoreCookie] {
        &self.cookies
    }

    /// Captured cookies reduced to name/value records
    pub fn records(&self) -> Vec<CookieRecord> {
        let records: Vec<CookieRecord> = self
            .cookies
            .iter()
            .filter_map(|c| CookieRecord::new(&c.name, &c.value))
            .collect();
        if records.len() != self.cookies.len() {
            debug!(
                "skipped {} captured cookies with blank names",
                self.cookies.len() - records.len()
            );
        }
        records
    }

    /// The portable `name=value; ...` text of the capture
    pub fn export_text(&self) -> Result<String> {
        self.ensure_not_empty()?;
        Ok(codec::format(&self.records()))
    }

    /// The full captured cookies as pretty JSON
    pub fn export_json(&self) -> Result<String> {
        self.ensure_not_empty()?;
        Ok(serde_json::to_string_pretty(&self.cookies)?)
    }

    fn ensure_not_empty(&self) -> Result<()> {
        if self.cookies.is_empty() {
            return Err(RcookieError::NoCookies(self.domain.clone()));
        }
        Ok(())
    }
}
