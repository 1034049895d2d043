use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Form fields sent along with the image, keyed by API option name.
pub type Payload = BTreeMap<String, Value>;

pub fn default_payload() -> Payload {
    let defaults = json!({
        "addMetadata": false,
        "keywordsOnly": false,
        "saveFile": false,
        "language": "en",
        "maxKeywords": 20,
        "maxTitleCharacters": 100,
        "maxDescriptionCharacters": 500,
        "minTitleCharacters": 10,
        "minDescriptionCharacters": 50,
        "singleWordKeywordsOnly": false,
    });
    match defaults {
        Value::Object(map) => map.into_iter().collect(),
        _ => Payload::new(),
    }
}

/// Renders a payload value the way it goes over the wire as a form field.
pub(crate) fn form_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_payload_has_api_defaults() {
        let payload = default_payload();
        assert_eq!(payload.len(), 10);
        assert_eq!(payload["maxKeywords"], json!(20));
        assert_eq!(payload["language"], json!("en"));
        assert_eq!(payload["addMetadata"], json!(false));
    }

    #[test]
    fn form_values_are_plain_text() {
        assert_eq!(form_value(&json!("en")), "en");
        assert_eq!(form_value(&json!(20)), "20");
        assert_eq!(form_value(&json!(false)), "false");
        assert_eq!(form_value(&json!(",sky")), ",sky");
        assert_eq!(form_value(&Value::Null), "");
    }
}
