use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a successful `projects/search` call.
///
/// Kept as the object the server sent, in its key order, so it can be written back
/// out unchanged. Accessors are lenient: a `meta` or `results` of an unexpected type
/// reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResponse(Map<String, Value>);

impl SearchResponse {
    /// Project records; a missing, null or non-array `results` reads as empty.
    pub fn results(&self) -> &[Value] {
        self.0
            .get("results")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// A non-null entry of the `meta` object, whatever its type.
    pub fn meta_field(&self, name: &str) -> Option<&Value> {
        self.0
            .get("meta")
            .and_then(Value::as_object)
            .and_then(|m| m.get(name))
            .filter(|v| !v.is_null())
    }

    pub fn total(&self) -> Option<&Value> {
        self.meta_field("total")
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for SearchResponse {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_unknown_keys_in_order() {
        let raw = r#"{"results":[{"ProjectTitle":"T","appl_id":1}],"meta":{"total":3,"sort_field":null},"facet_results":[]}"#;
        let resp: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.total(), Some(&json!(3)));
        assert_eq!(resp.meta_field("sort_field"), None);
        assert_eq!(resp.results().len(), 1);
        assert_eq!(serde_json::to_string(&resp).unwrap(), raw);
    }

    #[test]
    fn loosely_typed_meta_still_parses() {
        let resp: SearchResponse =
            serde_json::from_str(r#"{"meta":{"total":"12","offset":-1,"limit":12.0},"results":{}}"#)
                .unwrap();
        assert_eq!(resp.total(), Some(&json!("12")));
        assert_eq!(resp.meta_field("offset"), Some(&json!(-1)));
        assert_eq!(resp.meta_field("limit"), Some(&json!(12.0)));
        assert!(resp.results().is_empty());
    }

    #[test]
    fn null_results_read_as_empty() {
        let resp: SearchResponse = serde_json::from_value(json!({"results": null})).unwrap();
        assert!(resp.results().is_empty());
        assert_eq!(resp.total(), None);
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(serde_json::from_str::<SearchResponse>("[1, 2]").is_err());
    }
}
