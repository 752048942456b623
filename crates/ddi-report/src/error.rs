use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("character U+{code:04X} is not allowed in XML (in <{element}>)")]
    InvalidCharacter { element: String, code: u32 },

    #[error("XML write error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("serialized XML is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, XmlError>;
