use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A language-tagged string (`{"value": "Age", "lang": "en"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl LocalizedText {
    pub fn new(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            lang: Some(lang.into()),
        }
    }

    /// Read the entries of a localized field.
    ///
    /// Accepts an array of entries or a single entry object. Entries without a
    /// textual `value` are skipped.
    pub fn list(value: Option<&Value>) -> Vec<LocalizedText> {
        match value {
            Some(Value::Array(items)) => items.iter().filter_map(Self::entry).collect(),
            Some(item @ Value::Object(_)) => Self::entry(item).into_iter().collect(),
            _ => Vec::new(),
        }
    }

    fn entry(item: &Value) -> Option<LocalizedText> {
        let map = item.as_object()?;
        let value = map.get("value").and_then(scalar_text)?;
        let lang = map
            .get("lang")
            .and_then(Value::as_str)
            .filter(|lang| !lang.is_empty())
            .map(str::to_string);
        Some(LocalizedText { value, lang })
    }
}

/// Text form of a scalar JSON value; `None` for null, objects and arrays.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
