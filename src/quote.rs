//! Motivational quote fetched when a task is completed.
//!
//! The fetch is a side channel of the complete operation: it runs in the
//! background, its failures are logged and swallowed, and callers only ever
//! see a cached quote or a fixed fallback message.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::Deserialize;

use crate::storage::config::QuoteConfig;
use crate::storage::tasks::Task;

/// Served when no quote has been fetched successfully
pub const FALLBACK_MESSAGE: &str = "Keep going! No motivational quote is available right now.";

/// Hook invoked after a task is marked completed.
///
/// Implementations must not block the caller and must not fail.
pub trait CompletionNotifier: Send + Sync {
    fn task_completed(&self, task: &Task);

    /// Message to show the user after a completion
    fn latest_message(&self) -> String {
        FALLBACK_MESSAGE.to_string()
    }
}

/// Notifier that does nothing (quotes disabled)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl CompletionNotifier for NoopNotifier {
    fn task_completed(&self, _task: &Task) {}
}

/// Quote returned by the remote API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub content: String,
    pub author: Option<String>,
}

impl Quote {
    pub fn message(&self) -> String {
        match &self.author {
            Some(author) if !author.is_empty() => format!("\"{}\" - {}", self.content, author),
            _ => format!("\"{}\"", self.content),
        }
    }
}

#[derive(Deserialize)]
struct QuoteBody {
    #[serde(alias = "q")]
    content: String,
    #[serde(default, alias = "a")]
    author: Option<String>,
}

/// quotable.io returns an object, zenquotes.io a one-element array
#[derive(Deserialize)]
#[serde(untagged)]
enum QuotePayload {
    One(QuoteBody),
    Many(Vec<QuoteBody>),
}

/// Parse a quote API response body
pub fn parse_quote(body: &str) -> Option<Quote> {
    let payload: QuotePayload = serde_json::from_str(body).ok()?;
    let body = match payload {
        QuotePayload::One(b) => b,
        QuotePayload::Many(list) => list.into_iter().next()?,
    };
    let content = body.content.trim().to_string();
    if content.is_empty() {
        return None;
    }
    Some(Quote {
        content,
        author: body.author.map(|a| a.trim().to_string()),
    })
}

/// Fetch one quote. Returns None on any failure (network, status, body).
pub fn fetch_quote(url: &str, timeout: Duration) -> Option<Quote> {
    let response = match ureq::get(url)
        .set("User-Agent", "todo-rs")
        .set("Accept", "application/json")
        .timeout(timeout)
        .call()
    {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(url, error = %e, "quote request failed");
            return None;
        }
    };

    let body = match response.into_string() {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(url, error = %e, "quote response unreadable");
            return None;
        }
    };

    let quote = parse_quote(&body);
    if quote.is_none() {
        tracing::warn!(url, "quote response had no usable quote");
    }
    quote
}

/// Fetches a fresh quote over HTTP after each completion
#[derive(Debug, Clone)]
pub struct QuoteNotifier {
    url: String,
    timeout: Duration,
    latest: Arc<RwLock<Option<Quote>>>,
}

impl QuoteNotifier {
    pub fn new(config: &QuoteConfig) -> Self {
        Self {
            url: config.url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            latest: Arc::new(RwLock::new(None)),
        }
    }

    /// Fetch synchronously and cache the result. Returns whether a quote
    /// was stored.
    pub fn refresh(&self) -> bool {
        let Some(quote) = fetch_quote(&self.url, self.timeout) else {
            return false;
        };
        tracing::debug!(quote = %quote.content, "fetched motivational quote");
        match self.latest.write() {
            Ok(mut latest) => {
                *latest = Some(quote);
                true
            }
            Err(_) => false,
        }
    }
}

impl CompletionNotifier for QuoteNotifier {
    fn task_completed(&self, task: &Task) {
        tracing::debug!(task_id = task.id, "fetching quote for completed task");
        let notifier = self.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || {
                    notifier.refresh();
                });
            }
            Err(_) => {
                std::thread::spawn(move || {
                    notifier.refresh();
                });
            }
        }
    }

    fn latest_message(&self) -> String {
        self.latest
            .read()
            .ok()
            .and_then(|q| q.as_ref().map(Quote::message))
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
    }
}

/// Build the notifier selected by config
pub fn notifier_from_config(config: &QuoteConfig) -> Arc<dyn CompletionNotifier> {
    if config.enabled {
        Arc::new(QuoteNotifier::new(config))
    } else {
        Arc::new(NoopNotifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quotable_object() {
        let quote = parse_quote(r#"{"_id":"x","content":"Stay hungry.","author":"Steve Jobs"}"#)
            .unwrap();
        assert_eq!(quote.content, "Stay hungry.");
        assert_eq!(quote.message(), "\"Stay hungry.\" - Steve Jobs");
    }

    #[test]
    fn test_parse_zenquotes_array() {
        let quote = parse_quote(r#"[{"q":"Act now.","a":"Anon","h":"<b>"}]"#).unwrap();
        assert_eq!(quote.content, "Act now.");
        assert_eq!(quote.author.as_deref(), Some("Anon"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_quote("<html>").is_none());
        assert!(parse_quote("[]").is_none());
        assert!(parse_quote(r#"{"content":"   "}"#).is_none());
    }

    #[test]
    fn test_failed_fetch_serves_fallback() {
        // Nothing listens on the discard port; the request fails fast.
        let notifier = QuoteNotifier::new(&QuoteConfig {
            enabled: true,
            url: "http://127.0.0.1:9/random".to_string(),
            timeout_secs: 1,
        });
        assert!(!notifier.refresh());
        assert_eq!(notifier.latest_message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_disabled_config_uses_noop() {
        let config = QuoteConfig {
            enabled: false,
            ..QuoteConfig::default()
        };
        let notifier = notifier_from_config(&config);
        assert_eq!(notifier.latest_message(), FALLBACK_MESSAGE);
    }
}
