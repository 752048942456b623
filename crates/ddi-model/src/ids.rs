use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Build the canonical DDI URN `urn:ddi:<agencyID>:<id>:<version>`.
pub fn canonical_urn(agency_id: &str, id: &str, version: &str) -> String {
    format!("urn:ddi:{agency_id}:{id}:{version}")
}

/// Extract the id segment (the fourth `:`-separated part) of a DDI URN.
pub fn id_from_urn(urn: &str) -> Option<&str> {
    let segment = urn.split(':').nth(3)?;
    if segment.is_empty() {
        None
    } else {
        Some(segment)
    }
}

/// Identifying triple of a DDI resource plus its optional explicit URN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "agencyID", default)]
    pub agency_id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urn: Option<String>,
}

impl Identifier {
    pub fn new(
        agency_id: impl Into<String>,
        id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            agency_id: agency_id.into(),
            version: version.into(),
            urn: None,
        }
    }

    /// Read the identifier fields of a JSON object. Non-string values are ignored.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let text = |key: &str| {
            map.get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_default()
        };
        Self {
            id: text("id"),
            agency_id: text("agencyID"),
            version: text("version"),
            urn: map
                .get("urn")
                .and_then(Value::as_str)
                .filter(|urn| !urn.is_empty())
                .map(str::to_string),
        }
    }

    /// The explicit URN if present, otherwise the canonical derivation.
    pub fn urn(&self) -> String {
        match &self.urn {
            Some(urn) => urn.clone(),
            None => canonical_urn(&self.agency_id, &self.id, &self.version),
        }
    }

    /// Key used for collection lookups: the id, or the URN when no id is set.
    pub fn lookup_key(&self) -> Option<&str> {
        if !self.id.is_empty() {
            Some(self.id.as_str())
        } else {
            self.urn.as_deref()
        }
    }

    /// The id, falling back to the id segment of the URN.
    pub fn effective_id(&self) -> Option<&str> {
        if !self.id.is_empty() {
            Some(self.id.as_str())
        } else {
            self.urn.as_deref().and_then(id_from_urn)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn derives_canonical_urn_when_missing() {
        let ident = Identifier::new("ex", "var-001", "1.0.0");
        assert_eq!(ident.urn(), "urn:ddi:ex:var-001:1.0.0");
    }

    #[test]
    fn explicit_urn_wins() {
        let value = json!({"id": "a", "agencyID": "ex", "version": "1", "urn": "urn:ddi:other:a:2"});
        let ident = Identifier::from_map(value.as_object().unwrap());
        assert_eq!(ident.urn(), "urn:ddi:other:a:2");
    }

    #[test]
    fn id_falls_back_to_urn_segment() {
        let value = json!({"urn": "urn:ddi:example.agency:concept-001:1.0.0"});
        let ident = Identifier::from_map(value.as_object().unwrap());
        assert_eq!(ident.effective_id(), Some("concept-001"));
        assert_eq!(
            ident.lookup_key(),
            Some("urn:ddi:example.agency:concept-001:1.0.0")
        );
        assert_eq!(id_from_urn("urn:ddi"), None);
    }
}
