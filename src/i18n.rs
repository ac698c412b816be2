use crate::error::RcookieError;
use fluent_templates::fluent_bundle::FluentValue;
use fluent_templates::{static_loader, Loader};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

static_loader! {
    static LOCALES = {
        locales: "locales",
        fallback_language: "en-US",
        customise: |bundle| bundle.set_use_isolating(false),
    };
}

pub fn localize_error(err: &RcookieError) -> String {
    let langid = resolve_language();
    match err {
        RcookieError::InvalidUrl(detail) => {
            message_with_detail(&langid, "error-invalid-url", detail)
        }
        RcookieError::Io(detail) => message_with_detail(&langid, "error-io", &detail.to_string()),
        RcookieError::Json(detail) => {
            message_with_detail(&langid, "error-json", &detail.to_string())
        }
        RcookieError::Config(detail) => message_with_detail(&langid, "error-config", detail),
        RcookieError::PermissionDenied(detail) => {
            message_with_detail(&langid, "error-permission-denied", detail)
        }
        RcookieError::FileNotFound(detail) => {
            message_with_detail(&langid, "error-file-not-found", detail)
        }
        RcookieError::MalformedJar { line, reason } => {
            let mut args = HashMap::new();
            args.insert("line", FluentValue::from(*line));
            args.insert("detail", FluentValue::from(reason.as_str()));
            LOCALES.lookup_with_args(&langid, "error-malformed-jar", &args)
        }
        RcookieError::StoreRejected(detail) => {
            message_with_detail(&langid, "error-store-rejected", detail)
        }
        RcookieError::NoCookies(domain) => {
            let mut args = HashMap::new();
            args.insert("domain", FluentValue::from(domain.as_str()));
            LOCALES.lookup_with_args(&langid, "error-no-cookies", &args)
        }
    }
}

fn message_with_detail(langid: &LanguageIdentifier, key: &str, detail: &str) -> String {
    let mut args = HashMap::new();
    args.insert("detail", FluentValue::from(detail));
    LOCALES.lookup_with_args(langid, key, &args)
}

fn resolve_language() -> LanguageIdentifier {
    for key in ["LC_ALL", "LC_MESSAGES", "LANG"] {
        if let Ok(value) = std::env::var(key) {
            if let Some(lang) = normalize_lang(value) {
                if let Ok(langid) = lang.parse::<LanguageIdentifier>() {
                    return langid;
                }
            }
        }
    }
    "en-US".parse().unwrap_or_default()
}

fn normalize_lang(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == "C" || value == "POSIX" {
        return None;
    }
    let value = value.split('.').next().unwrap_or(value);
    let value = value.replace('_', "-");
    Some(value)
}
