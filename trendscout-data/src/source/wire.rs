//! Response shapes returned by the trends bridge service.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Body of `GET /related`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RelatedResponse {
    /// Rising queries keyed by the seed that produced them.
    #[serde(default)]
    pub rising: BTreeMap<String, Vec<RelatedQuery>>,
}

/// One rising query.
#[derive(Debug, Deserialize)]
pub(crate) struct RelatedQuery {
    pub query: String,
}

/// Body of `GET /interest`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct InterestResponse {
    /// Daily interest keyed by keyword, most recent point last.
    #[serde(default)]
    pub series: BTreeMap<String, Vec<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn related_response_ignores_extra_fields() {
        let json = r#"{
            "rising": {"newsletter tool": [{"query": "beehiiv alternative", "value": 250}]},
            "top": {}
        }"#;
        let response: RelatedResponse = serde_json::from_str(json).expect("should deserialise");
        let queries = response.rising.get("newsletter tool").expect("seed present");
        assert_eq!(queries.len(), 1);
        assert_eq!(queries.first().map(|q| q.query.as_str()), Some("beehiiv alternative"));
    }

    #[test]
    fn missing_maps_default_to_empty() {
        let related: RelatedResponse = serde_json::from_str("{}").expect("should deserialise");
        let interest: InterestResponse = serde_json::from_str("{}").expect("should deserialise");
        assert!(related.rising.is_empty());
        assert!(interest.series.is_empty());
    }
}
