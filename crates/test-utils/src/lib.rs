//! Bazaar test utilities.
//!
//! Assertion helpers for the JSON envelopes every catalog endpoint returns,
//! plus a query string builder for search requests.

/// Build a request URI from a path and query pairs, percent-encoding values.
pub fn uri(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }

    let query: Vec<String> = params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect();
    format!("{path}?{}", query.join("&"))
}

/// Assertion helpers for JSON content.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that a JSON value equals expected.
    pub fn json_eq(actual: &Value, expected: &Value) {
        assert_eq!(
            actual,
            expected,
            "JSON mismatch:\nactual: {}\nexpected: {}",
            serde_json::to_string_pretty(actual).unwrap_or_default(),
            serde_json::to_string_pretty(expected).unwrap_or_default()
        );
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert a successful envelope and return its `data`.
    pub fn ok_envelope(body: &Value) -> &Value {
        assert_eq!(
            body["success"],
            Value::Bool(true),
            "Expected a successful envelope, got: {body}"
        );
        assert!(
            body["errors"].as_array().is_some_and(Vec::is_empty),
            "Expected no errors, got: {body}"
        );
        &body["data"]
    }

    /// Assert a failed envelope and return its message.
    pub fn error_envelope(body: &Value) -> &str {
        assert_eq!(
            body["success"],
            Value::Bool(false),
            "Expected a failed envelope, got: {body}"
        );
        assert!(
            body["data"].is_null(),
            "Expected no data on failure, got: {body}"
        );
        body["message"].as_str().unwrap_or_default()
    }

    /// Assert the pagination fields of a paged result.
    pub fn page_shape(data: &Value, results: usize, total_count: u64, page: u64, total_pages: u64) {
        assert_eq!(
            data["results"].as_array().map(Vec::len),
            Some(results),
            "Unexpected result count in: {data}"
        );
        assert_eq!(data["totalCount"], Value::from(total_count), "totalCount in: {data}");
        assert_eq!(data["page"], Value::from(page), "page in: {data}");
        assert_eq!(data["totalPages"], Value::from(total_pages), "totalPages in: {data}");
    }

    /// Collect a string field from every element of a JSON array.
    pub fn strings(array: &Value, field: &str) -> Vec<String> {
        array
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item[field].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uri_encodes_values() {
        assert_eq!(uri("/health", &[]), "/health");
        assert_eq!(
            uri("/api/search/global", &[("searchTerm", "red brick"), ("limit", "5")]),
            "/api/search/global?searchTerm=red%20brick&limit=5"
        );
    }

    #[test]
    fn envelope_helpers() {
        let ok = json!({"success": true, "message": "m", "data": {"x": 1}, "errors": []});
        assert_eq!(assert::ok_envelope(&ok)["x"], 1);

        let err = json!({"success": false, "message": "bad", "data": null, "errors": ["bad"]});
        assert_eq!(assert::error_envelope(&err), "bad");
    }

    #[test]
    fn contains_passes_on_substring() {
        assert::contains("http_requests_total 3", "http_requests_total");
    }

    #[test]
    #[should_panic(expected = "Expected string to contain")]
    fn contains_fails_on_missing_substring() {
        assert::contains("searches_total", "bulk_items");
    }

    #[test]
    fn strings_collects_field() {
        let items = json!([{"name": "a"}, {"name": "b"}, {"other": 1}]);
        assert_eq!(assert::strings(&items, "name"), vec!["a", "b"]);
    }
}
