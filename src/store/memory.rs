//! In-memory cookie store

use super::{check_secure_scheme, upsert, CookieFilter, CookieStore, SetDetails, StoreCookie};
use crate::error::{RcookieError, Result};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

/// Cookie store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    cookies: Mutex<Vec<StoreCookie>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with cookies
    pub fn with_cookies(cookies: Vec<StoreCookie>) -> Self {
        Self {
            cookies: Mutex::new(cookies),
        }
    }

    /// Snapshot of everything currently stored
    pub fn cookies(&self) -> Result<Vec<StoreCookie>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<StoreCookie>>> {
        self.cookies
            .lock()
            .map_err(|_| RcookieError::StoreRejected("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl CookieStore for MemoryStore {
    async fn get_all(&self, filter: &CookieFilter) -> Result<Vec<StoreCookie>> {
        Ok(self
            .lock()?
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn set(&self, details: SetDetails) -> Result<()> {
        check_secure_scheme(&details)?;
        let cookie = StoreCookie::from_details(&details)?;
        let mut cookies = self.lock()?;
        upsert(&mut cookies, cookie);
        Ok(())
    }
}
