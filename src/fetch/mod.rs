//! Book search against the volumes endpoint.
//!
//! The fetch layer has two halves split by Zellij's asynchronous web request
//! API:
//!
//! - **Before**: [`SearchRequest`] validates the query and describes the single
//!   outbound `GET <endpoint>?q=<field>:<query>&maxResults=10`. The plugin shim
//!   turns it into a `web_request` call.
//! - **After**: [`books_from_response`] turns the status and body that come back
//!   into normalized [`Book`] records via [`normalize_volume`].
//!
//! Nothing here fails towards the caller. A bad status, an undecodable body or
//! a payload without `items` all produce an empty list and a log entry.
//!
//! # Modules
//!
//! - [`request`]: Request description, URL building, context map round-trip
//! - [`normalize`]: Per-field defaulting of upstream volumes

pub mod normalize;
pub mod request;

pub use normalize::normalize_volume;
pub use request::{SearchRequest, TraceContext, DEFAULT_ENDPOINT, MAX_RESULTS};

use serde_json::Value;

use crate::domain::{Book, BookscoutError, Result};

/// Decodes a volumes response body into normalized books.
///
/// A missing `items` key is zero results, not an error. At most
/// [`MAX_RESULTS`] records are returned.
///
/// # Errors
///
/// - [`BookscoutError::Decode`] if the body is not JSON
/// - [`BookscoutError::UnexpectedPayload`] if the JSON is not an object or
///   `items` is not an array
pub fn decode_volumes(body: &[u8]) -> Result<Vec<Book>> {
    let payload: Value = serde_json::from_slice(body)?;

    let Some(object) = payload.as_object() else {
        return Err(BookscoutError::UnexpectedPayload(
            "response is not a JSON object".to_string(),
        ));
    };

    let items = match object.get("items") {
        None | Some(Value::Null) => {
            tracing::debug!("response carries no items");
            return Ok(vec![]);
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(BookscoutError::UnexpectedPayload(
                "`items` is not an array".to_string(),
            ))
        }
    };

    Ok(items.iter().take(MAX_RESULTS).map(normalize_volume).collect())
}

/// Turns a completed web request into the new result set.
///
/// Every failure degrades to an empty list with a diagnostic log line.
///
/// # Example
///
/// ```
/// use bookscout::fetch::books_from_response;
///
/// assert!(books_from_response(200, br#"{"totalItems":0}"#).is_empty());
/// assert!(books_from_response(503, b"unavailable").is_empty());
/// assert!(books_from_response(200, b"<html>").is_empty());
/// ```
#[must_use]
pub fn books_from_response(status: u16, body: &[u8]) -> Vec<Book> {
    let result = if (200..300).contains(&status) {
        decode_volumes(body)
    } else {
        Err(BookscoutError::Http { status })
    };

    match result {
        Ok(books) => {
            tracing::debug!(status, book_count = books.len(), "search response decoded");
            books
        }
        Err(e) => {
            tracing::error!(status, body_len = body.len(), error = %e, "error fetching books");
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_items_is_zero_results() {
        assert!(decode_volumes(br#"{"kind":"books#volumes","totalItems":0}"#)
            .unwrap()
            .is_empty());
        assert!(decode_volumes(br#"{"items":null}"#).unwrap().is_empty());
    }

    #[test]
    fn malformed_payloads_are_errors() {
        assert!(matches!(decode_volumes(b"not json"), Err(BookscoutError::Decode(_))));
        assert!(matches!(decode_volumes(b"[]"), Err(BookscoutError::UnexpectedPayload(_))));
        assert!(matches!(
            decode_volumes(br#"{"items":{"title":"Dune"}}"#),
            Err(BookscoutError::UnexpectedPayload(_))
        ));
    }

    #[test]
    fn results_are_capped() {
        let items: Vec<Value> = (0..15)
            .map(|i| serde_json::json!({ "volumeInfo": { "title": format!("Book {i}") } }))
            .collect();
        let body = serde_json::to_vec(&serde_json::json!({ "items": items })).unwrap();

        let books = decode_volumes(&body).unwrap();
        assert_eq!(books.len(), MAX_RESULTS);
        assert_eq!(books[0].title, "Book 0");
        assert_eq!(books[9].title, "Book 9");
    }

    #[test]
    fn failures_degrade_to_empty() {
        let body = br#"{"items":[{"volumeInfo":{"title":"Dune"}}]}"#;
        assert_eq!(books_from_response(200, body).len(), 1);
        assert!(books_from_response(404, body).is_empty());
        assert!(books_from_response(0, b"").is_empty());
        assert!(books_from_response(200, b"").is_empty());
    }
}
