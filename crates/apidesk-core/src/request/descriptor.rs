use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

use crate::parse::operation::HttpMethod;

/// How the user supplied query/body values for an operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    /// One field per query parameter.
    #[default]
    Form,
    /// A single raw JSON text.
    Json,
}

impl std::str::FromStr for BodyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "form" => Ok(BodyMode::Form),
            "json" => Ok(BodyMode::Json),
            other => Err(format!("unknown body mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FormValue {
    Text(String),
    File(PathBuf),
}

/// One part of a multipart payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: String,
    pub value: FormValue,
}

/// What travels in the request body.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Payload {
    #[default]
    Empty,
    Json(serde_json::Value),
    /// A `body` parameter, sent verbatim.
    Raw(String),
    /// `formData` parameters; the transport picks the boundary.
    Multipart(Vec<FormField>),
}

impl Payload {
    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty)
    }
}

/// A ready-to-send request. Built per submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub url: String,
    pub headers: IndexMap<String, String>,
    pub payload: Payload,
    /// `None` lets the transport decide (multipart).
    pub content_type: Option<String>,
    pub cacheable: bool,
    /// The collected parameters, as logged before sending.
    pub parameters: serde_json::Value,
}
