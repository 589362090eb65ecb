use thiserror::Error;

#[derive(Debug, Error)]
pub enum KmlError {
    #[error("Failed to write KML")]
    Xml(#[from] quick_xml::Error),

    #[error("Serialized KML is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
