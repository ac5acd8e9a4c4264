//! Span creation helpers for document parsing and manifest fetches

use crate::attributes::{
    HTTP_RESPONSE_STATUS_CODE, TOOLSPEC_BUNDLE_COUNT, TOOLSPEC_MANIFEST_URL, TOOLSPEC_PATH_COUNT,
    TOOLSPEC_WARNING_COUNT,
};
use tracing::Span;
use tracing::field::Empty;

/// Create the span covering one document parse.
///
/// The bundle and warning counts are left empty and filled in by
/// [`record_parse_result`] once the parse succeeds.
pub fn document_parse_span(path_count: usize) -> Span {
    tracing::info_span!(
        "parse_document",
        { TOOLSPEC_PATH_COUNT } = path_count,
        { TOOLSPEC_BUNDLE_COUNT } = Empty,
        { TOOLSPEC_WARNING_COUNT } = Empty,
    )
}

/// Record the outcome of a successful parse on its span.
pub fn record_parse_result(span: &Span, bundle_count: usize, warning_count: usize) {
    span.record(TOOLSPEC_BUNDLE_COUNT, bundle_count);
    span.record(TOOLSPEC_WARNING_COUNT, warning_count);
}

/// Create the span covering the HTTP fetch of a manifest's API document.
pub fn manifest_fetch_span(url: &str) -> Span {
    tracing::info_span!(
        "fetch_api_document",
        { TOOLSPEC_MANIFEST_URL } = %url,
        { HTTP_RESPONSE_STATUS_CODE } = Empty,
    )
}

/// Record the HTTP status of a manifest fetch.
pub fn record_fetch_status(span: &Span, status: u16) {
    span.record(HTTP_RESPONSE_STATUS_CODE, status);
}
