//! Ordered multi-map over a URL query string
//!
//! Mirrors the browser's `URLSearchParams`: repeated keys are kept as separate
//! entries in their original order, and both directions follow the
//! `application/x-www-form-urlencoded` rules.

use url::form_urlencoded;

/// Query string parameters, in order of appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Parse a query string, with or without the leading `?`
    ///
    /// # Example
    /// ```
    /// use contracts::shared::query_params::QueryParams;
    /// let params = QueryParams::parse("?brands=Nike&brands=Ad%C3%ADdas");
    /// assert_eq!(params.get_all("brands"), vec!["Nike", "Adídas"]);
    /// ```
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values for `key`, in order
    pub fn get_all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    pub fn has(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn append(&mut self, key: &str, value: &str) {
        self.pairs.push((key.to_string(), value.to_string()));
    }

    /// Remove every entry for `key`
    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serialize without the leading `?`
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_keys_in_order() {
        let params = QueryParams::parse("?start=2024-01-01&statuses=A&brands=X&statuses=B");
        assert_eq!(params.get_all("statuses"), vec!["A", "B"]);
        assert_eq!(params.get("start"), Some("2024-01-01"));
        assert!(params.has("brands"));
        assert!(!params.has("shops"));
    }

    #[test]
    fn test_decodes_unicode_and_spaces() {
        let params = QueryParams::parse("statuses=%C4%90ang+x%E1%BB%AD+l%C3%BD&shops=Shop%20A");
        assert_eq!(params.get_all("statuses"), vec!["Đang xử lý"]);
        assert_eq!(params.get("shops"), Some("Shop A"));
    }

    #[test]
    fn test_encodes_spaces_as_plus() {
        let mut params = QueryParams::new();
        params.append("statuses", "Đang giao");
        params.append("brands", "A&B");
        assert_eq!(
            params.to_query_string(),
            "statuses=%C4%90ang+giao&brands=A%26B"
        );
        let reparsed = QueryParams::parse(&params.to_query_string());
        assert_eq!(reparsed, params);
    }

    #[test]
    fn test_delete_keeps_other_entries() {
        let mut params = QueryParams::parse("a=1&b=2&a=3&c=4");
        params.delete("a");
        assert_eq!(params.to_query_string(), "b=2&c=4");
    }

    #[test]
    fn test_key_without_value_and_bad_escape() {
        let params = QueryParams::parse("flag&x=%ZZ");
        assert!(params.has("flag"));
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.get("x"), Some("%ZZ"));
        assert!(QueryParams::parse("").is_empty());
        assert!(QueryParams::parse("?").is_empty());
    }

    #[test]
    fn test_invalid_utf8_decodes_like_the_browser() {
        let mut params = QueryParams::parse("tab=%FF&statuses=A");
        assert_eq!(params.get("tab"), Some("\u{FFFD}"));

        params.delete("statuses");
        params.append("statuses", "B");
        assert_eq!(params.to_query_string(), "tab=%EF%BF%BD&statuses=B");
    }

    #[test]
    fn test_serializes_with_form_urlencoded_set() {
        let mut params = QueryParams::new();
        params.append("q", "a*b~c");
        assert_eq!(params.to_query_string(), "q=a*b%7Ec");
    }
}
