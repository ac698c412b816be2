use async_trait::async_trait;
use rcookie::codec::{self, CookieRecord};
use rcookie::error::{RcookieError, Result};
use rcookie::inserter::{CookieInserter, NO_COOKIES_MESSAGE};
use rcookie::store::{CookieFilter, CookieStore, MemoryStore, SetDetails, StoreCookie};
use std::sync::Mutex;
use url::Url;

type Rule = Box<dyn Fn(&SetDetails) -> bool + Send + Sync>;

/// Records every set call and accepts those the rule allows
struct RecordingStore {
    calls: Mutex<Vec<SetDetails>>,
    accept: Rule,
}

impl RecordingStore {
    fn new(accept: impl Fn(&SetDetails) -> bool + Send + Sync + 'static) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            accept: Box::new(accept),
        }
    }

    fn calls(&self) -> Vec<SetDetails> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl CookieStore for RecordingStore {
    async fn get_all(&self, _filter: &CookieFilter) -> Result<Vec<StoreCookie>> {
        Ok(Vec::new())
    }

    async fn set(&self, details: SetDetails) -> Result<()> {
        let accepted = (self.accept)(&details);
        self.calls.lock().expect("calls lock").push(details);
        if accepted {
            Ok(())
        } else {
            Err(RcookieError::StoreRejected("rejected by rule".to_string()))
        }
    }
}

fn https_url() -> Url {
    Url::parse("https://example.com/account").expect("url")
}

fn records(text: &str) -> Vec<CookieRecord> {
    codec::parse(text)
}

#[tokio::test]
async fn empty_input_makes_no_store_calls() {
    let store = RecordingStore::new(|_| true);
    let result = CookieInserter::new(&store).insert(&[], &https_url()).await;

    assert_eq!(result.success_count(), 0);
    assert_eq!(result.fail_count(), 0);
    assert_eq!(result.message(), NO_COOKIES_MESSAGE);
    assert_eq!(result.message(), "No valid cookies found");
    assert!(!result.is_success());
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn accepting_store_takes_every_full_attempt() {
    let store = RecordingStore::new(|_| true);
    let result = CookieInserter::new(&store)
        .insert(&records("a=1; b=2"), &https_url())
        .await;

    assert_eq!(result.success_count(), 2);
    assert_eq!(result.fail_count(), 0);
    assert_eq!(result.message(), "Inserted 2 cookies");

    let calls = store.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls
        .iter()
        .all(|c| c.path.as_deref() == Some("/") && c.secure == Some(true)));
}

#[tokio::test]
async fn minimal_fallback_masks_full_rejection() {
    // Refuse the full attempt for "a" only.
    let store = RecordingStore::new(|d| !(d.name == "a" && d.path.is_some()));
    let result = CookieInserter::new(&store)
        .insert(&records("a=1; b=2"), &https_url())
        .await;

    assert_eq!(result.success_count(), 2);
    assert_eq!(result.fail_count(), 0);

    let calls = store.calls();
    let names: Vec<(&str, bool)> = calls
        .iter()
        .map(|c| (c.name.as_str(), c.path.is_some()))
        .collect();
    assert_eq!(names, vec![("a", true), ("a", false), ("b", true)]);
    assert_eq!(calls[1].secure, None);
}

#[tokio::test]
async fn double_rejection_counts_as_failure_and_continues() {
    let store = RecordingStore::new(|d| d.name != "a");
    let result = CookieInserter::new(&store)
        .insert(&records("a=1; b=2"), &https_url())
        .await;

    assert_eq!(result.success_count(), 1);
    assert_eq!(result.fail_count(), 1);
    assert!(result.is_success());
    assert_eq!(result.message(), "Inserted 1 cookie (1 failed)");
    assert_eq!(store.calls().len(), 3);
}

#[tokio::test]
async fn records_are_applied_in_input_order() {
    let store = RecordingStore::new(|_| true);
    CookieInserter::new(&store)
        .insert(&records("z=1; a=2; m=3; a=4"), &https_url())
        .await;

    let order: Vec<(String, String)> = store
        .calls()
        .into_iter()
        .map(|c| (c.name, c.value))
        .collect();
    assert_eq!(
        order,
        vec![
            ("z".to_string(), "1".to_string()),
            ("a".to_string(), "2".to_string()),
            ("m".to_string(), "3".to_string()),
            ("a".to_string(), "4".to_string()),
        ]
    );
}

#[tokio::test]
async fn plain_http_target_never_requests_secure() {
    let store = RecordingStore::new(|_| true);
    let url = Url::parse("http://example.com/").expect("url");
    CookieInserter::new(&store)
        .insert(&records("a=1"), &url)
        .await;
    assert_eq!(store.calls()[0].secure, None);
}

#[tokio::test]
async fn wss_target_requests_secure() {
    let store = RecordingStore::new(|_| true);
    let url = Url::parse("wss://example.com/socket").expect("url");
    CookieInserter::new(&store)
        .insert(&records("a=1"), &url)
        .await;
    let calls = store.calls();
    assert_eq!(calls[0].secure, Some(true));
    assert_eq!(calls[0].path.as_deref(), Some("/"));
}

#[tokio::test]
async fn memory_store_restores_captured_session() {
    let store = MemoryStore::new();
    let url = https_url();
    let result = CookieInserter::new(&store)
        .insert(&records("sid=abc==; theme=dark; sid=def"), &url)
        .await;
    assert_eq!(result.success_count(), 3);

    let cookies = store
        .get_all(&CookieFilter::for_domain("example.com"))
        .await
        .expect("get_all");
    assert_eq!(cookies.len(), 2);
    let sid = cookies.iter().find(|c| c.name == "sid").expect("sid");
    assert_eq!(sid.value, "def");
    assert_eq!(sid.path, "/");
    assert!(sid.secure);
}
