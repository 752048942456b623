//! Variable value-space representations.
//!
//! A variable carries at most one of four representation shapes under its
//! `representation` object:
//!
//! ```text
//! representation.codeRepresentation     { recommendedDataType, codeListReference | codeList }
//! representation.numericRepresentation  { recommendedDataType, format? }
//! representation.textRepresentation     { recommendedDataType, maxLength? }
//! representation.dateRepresentation     { recommendedDataType, format? }
//! ```
//!
//! When several are present the first in the order above is used.

use serde_json::{Map, Value};

use crate::entity::Entity;
use crate::reference::Reference;
use crate::text::scalar_text;

#[derive(Debug, Clone, PartialEq)]
pub enum Representation {
    Code(CodeRepresentation),
    Numeric(NumericRepresentation),
    Text(TextRepresentation),
    Date(DateRepresentation),
}

/// Code list attached to a code representation, either still a reference or
/// already embedded by the resolver.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeListLink {
    Reference(Reference),
    Embedded(Entity),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeRepresentation {
    pub recommended_data_type: Option<String>,
    pub code_list: Option<CodeListLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericRepresentation {
    pub recommended_data_type: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRepresentation {
    pub recommended_data_type: Option<String>,
    pub max_length: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateRepresentation {
    pub recommended_data_type: Option<String>,
    pub format: Option<String>,
}

impl Representation {
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        if let Some(code) = map.get("codeRepresentation").and_then(Value::as_object) {
            let code_list = if let Some(reference) = code.get("codeListReference") {
                Reference::from_value(reference).map(CodeListLink::Reference)
            } else {
                code.get("codeList")
                    .and_then(|list| Entity::from_value(list.clone()).ok())
                    .map(CodeListLink::Embedded)
            };
            return Some(Representation::Code(CodeRepresentation {
                recommended_data_type: text(code, "recommendedDataType"),
                code_list,
            }));
        }
        if let Some(numeric) = map.get("numericRepresentation").and_then(Value::as_object) {
            return Some(Representation::Numeric(NumericRepresentation {
                recommended_data_type: text(numeric, "recommendedDataType"),
                format: text(numeric, "format"),
            }));
        }
        if let Some(textual) = map.get("textRepresentation").and_then(Value::as_object) {
            return Some(Representation::Text(TextRepresentation {
                recommended_data_type: text(textual, "recommendedDataType"),
                max_length: text(textual, "maxLength"),
            }));
        }
        if let Some(date) = map.get("dateRepresentation").and_then(Value::as_object) {
            return Some(Representation::Date(DateRepresentation {
                recommended_data_type: text(date, "recommendedDataType"),
                format: text(date, "format"),
            }));
        }
        None
    }

    pub fn recommended_data_type(&self) -> Option<&str> {
        match self {
            Representation::Code(code) => code.recommended_data_type.as_deref(),
            Representation::Numeric(numeric) => numeric.recommended_data_type.as_deref(),
            Representation::Text(textual) => textual.recommended_data_type.as_deref(),
            Representation::Date(date) => date.recommended_data_type.as_deref(),
        }
    }
}

fn text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(scalar_text)
        .filter(|value| !value.is_empty())
}
