//! Deterministic XML serialization.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::common::INDENT;
use crate::error::{Result, XmlError};
use crate::tree::{Element, ElementTree, Node};

/// Serialize `tree` as UTF-8 XML with a declaration and indented children.
///
/// Text and attribute values are escaped; characters XML 1.0 cannot carry at
/// all (most C0 controls, U+FFFE, U+FFFF) fail with
/// [`XmlError::InvalidCharacter`].
pub fn serialize(tree: &ElementTree) -> Result<String> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', INDENT);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut xml, &tree.root)?;
    Ok(String::from_utf8(xml.into_inner())?)
}

fn write_element<W: Write>(xml: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        check_chars(&element.name, value)?;
        start.push_attribute((key.as_str(), value.as_str()));
    }
    if element.children.is_empty() {
        xml.write_event(Event::Empty(start))?;
        return Ok(());
    }
    xml.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(nested) => write_element(xml, nested)?,
            Node::Text(text) => {
                check_chars(&element.name, text)?;
                xml.write_event(Event::Text(BytesText::new(text)))?;
            }
        }
    }
    xml.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

fn check_chars(element: &str, text: &str) -> Result<()> {
    match text.chars().find(|c| !is_xml_char(*c)) {
        Some(c) => Err(XmlError::InvalidCharacter {
            element: element.to_string(),
            code: u32::from(c),
        }),
        None => Ok(()),
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}
