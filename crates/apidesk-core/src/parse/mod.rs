pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod response;
pub mod schema;
pub mod spec;

use crate::error::ParseError;
use spec::ApiDocument;

/// Parse a Swagger document from YAML.
pub fn from_yaml(input: &str) -> Result<ApiDocument, ParseError> {
    let doc: ApiDocument = serde_yaml_ng::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

/// Parse a Swagger document from JSON.
pub fn from_json(input: &str) -> Result<ApiDocument, ParseError> {
    let doc: ApiDocument = serde_json::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

/// Parse a Swagger document from an already decoded JSON value.
pub fn from_value(value: serde_json::Value) -> Result<ApiDocument, ParseError> {
    let doc: ApiDocument = serde_json::from_value(value)?;
    validate_version(&doc)?;
    Ok(doc)
}

fn validate_version(doc: &ApiDocument) -> Result<(), ParseError> {
    if doc.swagger.is_empty() {
        return Err(ParseError::UnsupportedVersion("<missing>".to_string()));
    }
    if doc.swagger != "2.0" {
        return Err(ParseError::UnsupportedVersion(doc.swagger.clone()));
    }
    Ok(())
}
