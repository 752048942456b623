//! Collection filtering, label search and offset/limit pagination.
//!
//! Filters narrow a collection slice before any reference resolution takes
//! place. Multi-valued filters match when any of their values match.

use ddi_model::{Entity, Reference, id_from_urn};

use crate::error::{Result, StoreError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceQuery {
    pub urn: Option<String>,
    pub agency_ids: Vec<String>,
    /// Matches the resource id; URN-shaped values match on their id segment.
    pub ids: Vec<String>,
    pub versions: Vec<String>,
    /// Keeps resources whose `conceptReference` names one of these ids/URNs.
    pub concept_references: Vec<String>,
    /// Case-insensitive substring over `label` and `name` values.
    pub search: Option<String>,
    pub offset: usize,
    pub limit: Option<usize>,
}

impl ResourceQuery {
    /// Build a query from decoded query-string pairs.
    ///
    /// Recognised names: `urn`, `agencyID`, `resourceID`/`id`/`variableID`/
    /// `conceptID`, `version`, `conceptReference`, `search`, `offset`, `limit`.
    /// Other names (such as `references`) are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();
        for (name, value) in pairs {
            let (name, value) = (name.as_ref(), value.as_ref());
            match name {
                "urn" => query.urn = Some(value.to_string()),
                "agencyID" => query.agency_ids.push(value.to_string()),
                "resourceID" | "id" | "variableID" | "conceptID" => {
                    query.ids.push(value.to_string());
                }
                "version" => query.versions.push(value.to_string()),
                "conceptReference" => query.concept_references.push(value.to_string()),
                "search" => query.search = Some(value.to_string()),
                "offset" => query.offset = parse_count(name, value)?,
                "limit" => query.limit = Some(parse_count(name, value)?),
                _ => {}
            }
        }
        Ok(query)
    }

    pub fn matches(&self, entity: &Entity) -> bool {
        if let Some(urn) = &self.urn {
            if entity.str_field("urn") != Some(urn.as_str()) {
                return false;
            }
        }
        if !self.agency_ids.is_empty()
            && !entity
                .agency_id()
                .is_some_and(|agency| self.agency_ids.iter().any(|a| a == agency))
        {
            return false;
        }
        if !self.ids.is_empty()
            && !entity
                .id()
                .is_some_and(|id| self.ids.iter().any(|wanted| same_id(wanted, id)))
        {
            return false;
        }
        if !self.versions.is_empty()
            && !entity
                .version()
                .is_some_and(|version| self.versions.iter().any(|v| v == version))
        {
            return false;
        }
        if !self.concept_references.is_empty() {
            let target = entity
                .get("conceptReference")
                .and_then(Reference::from_value)
                .and_then(|reference| reference.identifier.effective_id().map(str::to_string));
            let Some(target) = target else {
                return false;
            };
            if !self
                .concept_references
                .iter()
                .any(|wanted| same_id(wanted, &target))
            {
                return false;
            }
        }
        if let Some(term) = &self.search {
            if !matches_label(entity, term) {
                return false;
            }
        }
        true
    }

    /// Filter then paginate.
    pub fn apply<'a>(&self, entities: &'a [Entity]) -> Vec<&'a Entity> {
        let filtered = entities
            .iter()
            .filter(|entity| self.matches(entity))
            .skip(self.offset);
        match self.limit {
            Some(limit) => filtered.take(limit).collect(),
            None => filtered.collect(),
        }
    }
}

fn same_id(wanted: &str, id: &str) -> bool {
    wanted == id || id_from_urn(wanted) == Some(id)
}

fn matches_label(entity: &Entity, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    ["label", "name"].iter().any(|field| {
        entity
            .localized(field)
            .iter()
            .any(|text| text.value.to_lowercase().contains(&needle))
    })
}

fn parse_count(name: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| StoreError::InvalidQuery {
            name: name.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn variables() -> Vec<Entity> {
        [
            json!({"id": "v1", "agencyID": "ex", "version": "1.0.0", "urn": "urn:ddi:ex:v1:1.0.0",
                   "label": [{"value": "Age of respondent", "lang": "en"}],
                   "conceptReference": {"id": "c1", "typeOfObject": "Concept"}}),
            json!({"id": "v2", "agencyID": "other", "version": "1.0.0",
                   "label": [{"value": "Sex", "lang": "en"}],
                   "conceptReference": {"urn": "urn:ddi:ex:c2:1.0.0", "typeOfObject": "Concept"}}),
            json!({"id": "v3", "agencyID": "ex", "version": "2.0.0",
                   "name": [{"value": "INCOME", "lang": "en"}]}),
        ]
        .into_iter()
        .map(|value| Entity::from_value(value).unwrap())
        .collect()
    }

    fn ids(found: &[&Entity]) -> Vec<String> {
        found.iter().map(|e| e.id().unwrap().to_string()).collect()
    }

    #[test]
    fn filters_by_agency_and_version() {
        let data = variables();
        let query =
            ResourceQuery::from_pairs([("agencyID", "ex"), ("version", "1.0.0")]).unwrap();
        assert_eq!(ids(&query.apply(&data)), vec!["v1"]);
    }

    #[test]
    fn id_filter_accepts_urns() {
        let data = variables();
        let query = ResourceQuery::from_pairs([("variableID", "urn:ddi:ex:v3:2.0.0")]).unwrap();
        assert_eq!(ids(&query.apply(&data)), vec!["v3"]);
    }

    #[test]
    fn concept_reference_filter_reads_urn_segment() {
        let data = variables();
        let query = ResourceQuery::from_pairs([("conceptReference", "c2")]).unwrap();
        assert_eq!(ids(&query.apply(&data)), vec!["v2"]);
    }

    #[test]
    fn search_is_case_insensitive_over_label_and_name() {
        let data = variables();
        let query = ResourceQuery::from_pairs([("search", "income")]).unwrap();
        assert_eq!(ids(&query.apply(&data)), vec!["v3"]);
        let query = ResourceQuery::from_pairs([("search", "AGE")]).unwrap();
        assert_eq!(ids(&query.apply(&data)), vec!["v1"]);
    }

    #[test]
    fn pagination_after_filtering() {
        let data = variables();
        let query = ResourceQuery::from_pairs([("offset", "1"), ("limit", "1")]).unwrap();
        assert_eq!(ids(&query.apply(&data)), vec!["v2"]);
        let query = ResourceQuery::from_pairs([("offset", "2")]).unwrap();
        assert_eq!(ids(&query.apply(&data)), vec!["v3"]);
    }

    #[test]
    fn rejects_bad_counts() {
        let err = ResourceQuery::from_pairs([("limit", "ten")]).unwrap_err();
        assert!(err.to_string().contains("limit"));
    }
}
