//! Outbound search request description.
//!
//! A [`SearchRequest`] is everything the plugin shim needs to issue one
//! `web_request`, plus the bookkeeping that travels with it. Zellij hands the
//! request's context map back untouched on the matching `WebRequestResult`, so
//! the query, the field, a request number and the tracing context all ride in
//! that map. This lets the response be logged against the request that
//! produced it and lets its span link back to the submitting span.

use std::collections::BTreeMap;

use crate::domain::{BookscoutError, Result, SearchField};

/// Default books endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";

/// Upper bound on results requested from, and accepted from, the endpoint.
pub const MAX_RESULTS: usize = 10;

/// Context key marking a web request as one of ours.
const CONTEXT_MARKER: &str = "bookscout.request";
const CONTEXT_MARKER_VALUE: &str = "search";
const CONTEXT_ID: &str = "request_id";
const CONTEXT_QUERY: &str = "query";
const CONTEXT_FIELD: &str = "field";
const CONTEXT_TRACE_ID: &str = "trace_id";
const CONTEXT_PARENT_SPAN_ID: &str = "parent_span_id";

/// Distributed tracing context carried across the request/response gap.
///
/// Captures the current trace and span IDs from OpenTelemetry so the span
/// handling the response can be parented to the span that submitted the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking the response span.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid, which is always
    /// the case when tracing has not been initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds the submitting span's context as a remote parent.
    ///
    /// Returns `None` if either ID is not valid hex.
    #[must_use]
    pub fn remote_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// One search the user submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Monotonic per-session request number, used only for logging.
    pub id: u64,
    /// Trimmed, non-empty query text.
    pub query: String,
    pub field: SearchField,
    pub trace_context: Option<TraceContext>,
}

impl SearchRequest {
    /// Builds a request from raw user input.
    ///
    /// # Errors
    ///
    /// Returns [`BookscoutError::EmptyQuery`] when the input is empty or only
    /// whitespace.
    ///
    /// # Example
    ///
    /// ```
    /// use bookscout::domain::SearchField;
    /// use bookscout::fetch::SearchRequest;
    ///
    /// let request = SearchRequest::new(1, "  Dune ", SearchField::Title)?;
    /// assert_eq!(request.query, "Dune");
    /// assert!(SearchRequest::new(2, " \t", SearchField::Title).is_err());
    /// # Ok::<(), bookscout::BookscoutError>(())
    /// ```
    pub fn new(id: u64, raw_query: &str, field: SearchField) -> Result<Self> {
        let query = raw_query.trim();
        if query.is_empty() {
            return Err(BookscoutError::EmptyQuery);
        }

        Ok(Self {
            id,
            query: query.to_string(),
            field,
            trace_context: TraceContext::from_current(),
        })
    }

    /// Full request URL against `endpoint`.
    ///
    /// The query text is percent-encoded; the host parses the URL as an
    /// `http::Uri`, which rejects raw spaces and non-ASCII bytes.
    ///
    /// ```
    /// use bookscout::domain::SearchField;
    /// use bookscout::fetch::{SearchRequest, DEFAULT_ENDPOINT};
    ///
    /// let request = SearchRequest::new(1, "Dune", SearchField::Title)?;
    /// assert_eq!(
    ///     request.url(DEFAULT_ENDPOINT),
    ///     "https://www.googleapis.com/books/v1/volumes?q=title:Dune&maxResults=10"
    /// );
    ///
    /// let request = SearchRequest::new(2, "Frank Herbert", SearchField::Author)?;
    /// assert!(request.url(DEFAULT_ENDPOINT).ends_with("?q=author:Frank%20Herbert&maxResults=10"));
    /// # Ok::<(), bookscout::BookscoutError>(())
    /// ```
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{endpoint}?q={}:{}&maxResults={MAX_RESULTS}",
            self.field.as_str(),
            urlencoding::encode(&self.query)
        )
    }

    /// Serializes the request into a `web_request` context map.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_MARKER.to_string(), CONTEXT_MARKER_VALUE.to_string());
        context.insert(CONTEXT_ID.to_string(), self.id.to_string());
        context.insert(CONTEXT_QUERY.to_string(), self.query.clone());
        context.insert(CONTEXT_FIELD.to_string(), self.field.as_str().to_string());

        if let Some(trace) = &self.trace_context {
            context.insert(CONTEXT_TRACE_ID.to_string(), trace.trace_id.clone());
            context.insert(CONTEXT_PARENT_SPAN_ID.to_string(), trace.parent_span_id.clone());
        }

        context
    }

    /// Rebuilds a request from a context map returned with a web response.
    ///
    /// Returns `None` when the map does not carry our marker, i.e. the response
    /// belongs to some other request.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        if context.get(CONTEXT_MARKER).map(String::as_str) != Some(CONTEXT_MARKER_VALUE) {
            return None;
        }

        let trace_context = match (context.get(CONTEXT_TRACE_ID), context.get(CONTEXT_PARENT_SPAN_ID)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Some(Self {
            id: context.get(CONTEXT_ID).and_then(|id| id.parse().ok()).unwrap_or(0),
            query: context.get(CONTEXT_QUERY).cloned().unwrap_or_default(),
            field: context
                .get(CONTEXT_FIELD)
                .and_then(|field| field.parse().ok())
                .unwrap_or_default(),
            trace_context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encodes_multi_word_query() {
        let request = SearchRequest::new(3, "  le guin ", SearchField::Author).unwrap();
        assert_eq!(
            request.url("http://localhost/volumes"),
            "http://localhost/volumes?q=author:le%20guin&maxResults=10"
        );
    }

    #[test]
    fn url_encodes_non_ascii_query() {
        let request = SearchRequest::new(4, "Cien años de soledad", SearchField::Title).unwrap();
        let url = request.url(DEFAULT_ENDPOINT);

        assert_eq!(
            url,
            "https://www.googleapis.com/books/v1/volumes?q=title:Cien%20a%C3%B1os%20de%20soledad&maxResults=10"
        );
        assert!(url.is_ascii());
        assert!(!url.contains(' '));
    }

    #[test]
    fn url_keeps_query_delimiters_inside_the_value() {
        let request = SearchRequest::new(5, "war & peace #1", SearchField::Title).unwrap();
        assert_eq!(
            request.url("http://localhost/volumes"),
            "http://localhost/volumes?q=title:war%20%26%20peace%20%231&maxResults=10"
        );
    }

    #[test]
    fn whitespace_query_is_rejected() {
        assert!(matches!(
            SearchRequest::new(1, "   \n", SearchField::Isbn),
            Err(BookscoutError::EmptyQuery)
        ));
        assert!(matches!(
            SearchRequest::new(1, "", SearchField::Isbn),
            Err(BookscoutError::EmptyQuery)
        ));
    }

    #[test]
    fn context_round_trips_request() {
        let mut request = SearchRequest::new(7, "9780441013593", SearchField::Isbn).unwrap();
        request.trace_context = Some(TraceContext {
            trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
            parent_span_id: "b7ad6b7169203331".to_string(),
        });

        let restored = SearchRequest::from_context(&request.context()).unwrap();
        assert_eq!(restored, request);
    }

    #[test]
    fn foreign_context_is_ignored() {
        let mut context = BTreeMap::new();
        context.insert("query".to_string(), "Dune".to_string());
        assert!(SearchRequest::from_context(&context).is_none());
    }

    #[test]
    fn remote_context_requires_valid_ids() {
        use opentelemetry::trace::TraceContextExt;

        let valid = TraceContext {
            trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
            parent_span_id: "b7ad6b7169203331".to_string(),
        };
        let cx = valid.remote_context().unwrap();
        assert!(cx.span().span_context().is_remote());

        let invalid = TraceContext {
            trace_id: "not-hex".to_string(),
            parent_span_id: "b7ad6b7169203331".to_string(),
        };
        assert!(invalid.remote_context().is_none());
    }
}
