//! Request handling: select, resolve, render.
//!
//! A [`Request`] names a resource kind and either one resource (by id or
//! URN) or a filtered list. [`handle`] resolves the selection at the
//! requested level and renders it as JSON or DDI XML.

use std::fmt;
use std::str::FromStr;

use ddi_model::{Entity, Kind, ResolutionLevel};
use ddi_report::{DDI_MEDIA_TYPE, map_document, serialize};
use ddi_resolve::ReferenceResolver;
use ddi_store::{DataStore, EntitySource, ResourceQuery};
use serde_json::{Value, json};
use tracing::{debug, info_span, warn};

pub const STATUS_OK: u16 = 200;
pub const STATUS_NOT_FOUND: u16 = 404;

pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Response body format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Xml,
}

impl OutputFormat {
    /// Pick a format from an `Accept` header value. Any media type mentioning
    /// `xml` selects XML; everything else, including no header, selects JSON.
    pub fn negotiate(accept: Option<&str>) -> Self {
        match accept {
            Some(accept) if accept.to_ascii_lowercase().contains("xml") => OutputFormat::Xml,
            _ => OutputFormat::Json,
        }
    }

    pub fn content_type(self) -> String {
        match self {
            OutputFormat::Json => JSON_MEDIA_TYPE.to_string(),
            OutputFormat::Xml => format!("{DDI_MEDIA_TYPE}; charset=utf-8"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "xml" => Ok(OutputFormat::Xml),
            other => Err(format!("unknown output format '{other}' (expected json or xml)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    pub kind: Kind,
    /// Single resource by id or URN; `None` lists the collection.
    pub id: Option<String>,
    /// List filters. Ignored for single-resource requests.
    pub query: ResourceQuery,
    pub level: ResolutionLevel,
    pub format: OutputFormat,
}

impl Request {
    pub fn list(kind: Kind) -> Self {
        Self {
            kind,
            id: None,
            query: ResourceQuery::default(),
            level: ResolutionLevel::None,
            format: OutputFormat::Json,
        }
    }

    pub fn item(kind: Kind, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::list(kind)
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: ResourceQuery) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: ResolutionLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl Response {
    fn json(status: u16, value: &Value) -> Self {
        let body = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        Self {
            status,
            content_type: OutputFormat::Json.content_type(),
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub fn handle(store: &DataStore, request: &Request) -> Response {
    let span = info_span!(
        "request",
        kind = %request.kind,
        id = request.id.as_deref().unwrap_or_default(),
        level = %request.level,
        format = %request.format,
    );
    let _guard = span.enter();

    let resolver = ReferenceResolver::new(store);
    let payload = match &request.id {
        Some(id) => match store.lookup(request.kind, id) {
            Some(entity) => resolver
                .resolve_as(request.kind, entity, request.level)
                .into_value(),
            None => {
                debug!(%id, "resource not found");
                return not_found(request.kind);
            }
        },
        None => {
            let selected = request.query.apply(store.collection(request.kind));
            debug!(count = selected.len(), "selected resources");
            Value::Array(
                resolver
                    .resolve_all(request.kind, selected, request.level)
                    .into_iter()
                    .map(Entity::into_value)
                    .collect(),
            )
        }
    };
    render(&payload, request.kind, request.format)
}

fn render(payload: &Value, kind: Kind, format: OutputFormat) -> Response {
    if format == OutputFormat::Xml {
        match serialize(&map_document(payload, Some(kind))) {
            Ok(body) => {
                return Response {
                    status: STATUS_OK,
                    content_type: OutputFormat::Xml.content_type(),
                    body,
                };
            }
            Err(error) => warn!(%error, "XML serialization failed, returning JSON"),
        }
    }
    Response::json(STATUS_OK, payload)
}

fn not_found(kind: Kind) -> Response {
    Response::json(
        STATUS_NOT_FOUND,
        &json!({ "error": format!("{} not found", display_name(kind)) }),
    )
}

/// Human-readable kind name for messages.
pub fn display_name(kind: Kind) -> &'static str {
    match kind {
        Kind::Concept => "Concept",
        Kind::ConceptScheme => "Concept scheme",
        Kind::Variable => "Variable",
        Kind::VariableScheme => "Variable scheme",
        Kind::CodeList => "Code list",
        Kind::CodeListScheme => "Code list scheme",
        Kind::Category => "Category",
        Kind::CategoryScheme => "Category scheme",
        Kind::Code => "Code",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negotiation() {
        assert_eq!(OutputFormat::negotiate(None), OutputFormat::Json);
        assert_eq!(OutputFormat::negotiate(Some("application/json")), OutputFormat::Json);
        assert_eq!(OutputFormat::negotiate(Some("*/*")), OutputFormat::Json);
        assert_eq!(OutputFormat::negotiate(Some("application/xml")), OutputFormat::Xml);
        assert_eq!(
            OutputFormat::negotiate(Some("application/vnd.ddi.structure+XML;version=3.3")),
            OutputFormat::Xml
        );
    }

    #[test]
    fn xml_content_type_is_versioned_utf8() {
        let content_type = OutputFormat::Xml.content_type();
        assert!(content_type.starts_with("application/vnd.ddi.structure+xml;version=3.3"));
        assert!(content_type.ends_with("charset=utf-8"));
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("XML".parse::<OutputFormat>(), Ok(OutputFormat::Xml));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
