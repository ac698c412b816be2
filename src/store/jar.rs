//! Netscape cookie jar file store
//!
//! Reads and writes the tab-separated `cookies.txt` format used by curl:
//!
//! ```text
//! domain  include_subdomains  path  secure  expiry  name  value
//! ```
//!
//! Lines starting with `#` are comments, except the `#HttpOnly_` prefix that
//! marks an HttpOnly cookie. An expiry of `0` is a session cookie.

use super::{check_secure_scheme, upsert, CookieFilter, CookieStore, SetDetails, StoreCookie};
use crate::error::{RcookieError, Result};
use async_trait::async_trait;
use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";
const JAR_HEADER: &str = "# Netscape HTTP Cookie File\n\
# This file was generated by rcookie. Edit at your own risk.\n\n";
const FIELD_COUNT: usize = 7;

/// Cookie store persisted to a Netscape-format jar file
#[derive(Debug, Clone)]
pub struct JarStore {
    path: PathBuf,
}

impl JarStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load all cookies; a missing jar reads as empty.
    pub fn load(&self) -> Result<Vec<StoreCookie>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => parse_jar(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("cookie jar {:?} does not exist yet", self.path);
                Ok(Vec::new())
            }
            Err(e) => Err(map_jar_io_error(&self.path, e)),
        }
    }

    /// Replace the jar contents atomically.
    pub fn save(&self, cookies: &[StoreCookie]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir).map_err(|e| map_jar_io_error(dir, e))?;
        temp.write_all(render_jar(cookies).as_bytes())?;
        temp.persist(&self.path)
            .map_err(|e| map_jar_io_error(&self.path, e.error))?;
        Ok(())
    }
}

#[async_trait]
impl CookieStore for JarStore {
    async fn get_all(&self, filter: &CookieFilter) -> Result<Vec<StoreCookie>> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|c| filter.matches(c))
            .collect())
    }

    async fn set(&self, details: SetDetails) -> Result<()> {
        check_secure_scheme(&details)?;
        let cookie = StoreCookie::from_details(&details)?;
        check_jar_fields(&cookie)?;
        let mut cookies = self.load()?;
        upsert(&mut cookies, cookie);
        self.save(&cookies)
    }
}

/// Tabs and line breaks would split the cookie's jar line.
fn check_jar_fields(cookie: &StoreCookie) -> Result<()> {
    let fields = [&cookie.name, &cookie.value, &cookie.path];
    if fields
        .iter()
        .any(|f| f.contains(|c| matches!(c, '\t' | '\r' | '\n')))
    {
        return Err(RcookieError::StoreRejected(format!(
            "cookie '{}' contains a tab or line break",
            cookie.name.escape_debug()
        )));
    }
    Ok(())
}

/// Parse jar text into cookies.
pub fn parse_jar(content: &str) -> Result<Vec<StoreCookie>> {
    let mut cookies = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        let (line, http_only) = match line.strip_prefix(HTTP_ONLY_PREFIX) {
            Some(rest) => (rest, true),
            None => (line, false),
        };
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        cookies.push(parse_jar_line(line, http_only, idx + 1)?);
    }
    Ok(cookies)
}

fn parse_jar_line(line: &str, http_only: bool, line_no: usize) -> Result<StoreCookie> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != FIELD_COUNT {
        return Err(RcookieError::MalformedJar {
            line: line_no,
            reason: format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
        });
    }

    let include_subdomains = parse_flag(fields[1], line_no)?;
    let secure = parse_flag(fields[3], line_no)?;
    let expiry: i64 = fields[4].parse().map_err(|_| RcookieError::MalformedJar {
        line: line_no,
        reason: format!("invalid expiry '{}'", fields[4]),
    })?;

    let bare = fields[0].trim_start_matches('.');
    let domain = if include_subdomains {
        format!(".{}", bare)
    } else {
        bare.to_string()
    };

    Ok(StoreCookie {
        name: fields[5].to_string(),
        value: fields[6].to_string(),
        domain,
        path: fields[2].to_string(),
        secure,
        http_only,
        expiration_date: (expiry != 0).then_some(expiry),
    })
}

fn parse_flag(field: &str, line_no: usize) -> Result<bool> {
    match field {
        "TRUE" => Ok(true),
        "FALSE" => Ok(false),
        other => Err(RcookieError::MalformedJar {
            line: line_no,
            reason: format!("expected TRUE or FALSE, found '{}'", other),
        }),
    }
}

/// Render cookies as jar text, header included.
pub fn render_jar(cookies: &[StoreCookie]) -> String {
    let mut out = String::from(JAR_HEADER);
    for c in cookies {
        out.push_str(&format!(
            "{}{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
            if c.http_only { HTTP_ONLY_PREFIX } else { "" },
            c.domain,
            flag(c.domain.starts_with('.')),
            c.path,
            flag(c.secure),
            c.expiration_date.unwrap_or(0),
            c.name,
            c.value
        ));
    }
    out
}

fn flag(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

fn map_jar_io_error(path: &Path, err: io::Error) -> RcookieError {
    match err.kind() {
        io::ErrorKind::NotFound => {
            RcookieError::FileNotFound(format!("Cookie jar path not found: {:?}", path))
        }
        io::ErrorKind::PermissionDenied => {
            RcookieError::PermissionDenied(format!("Cannot access cookie jar {:?}: {}", path, err))
        }
        _ => RcookieError::Io(err),
    }
}
