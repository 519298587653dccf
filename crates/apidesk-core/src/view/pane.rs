use indexmap::IndexMap;
use serde::Serialize;

use crate::parse::operation::HttpMethod;
use crate::parse::parameter::{Parameter, ParameterLocation};

/// Container that response models are resolved into.
pub const RESPONSE_CONTAINER: &str = "path-body-response-model";
/// Container that request body models are resolved into.
pub const REQUEST_CONTAINER: &str = "path-body-request-model";

/// One property of a rendered model, with its display type already rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyView {
    pub name: String,
    #[serde(rename = "type")]
    pub display_type: String,
    pub format: Option<String>,
    pub description: Option<String>,
    pub required: bool,
}

/// A flattened model attached to one container of the pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedModel {
    pub name: String,
    pub dom_id: String,
    pub description: Option<String>,
    pub properties: Vec<PropertyView>,
}

impl RenderedModel {
    /// Element id, unique per `(dom_id, name)`.
    pub fn element_id(&self) -> String {
        model_element_id(&self.dom_id, &self.name)
    }
}

pub fn model_element_id(dom_id: &str, name: &str) -> String {
    format!("ref-{dom_id}-{name}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Container {
    /// Set when the container shows a bare type instead of models.
    pub type_view: Option<String>,
    pub models: Vec<RenderedModel>,
}

/// A parameter row in the detail pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterView {
    pub name: String,
    pub location: ParameterLocation,
    #[serde(rename = "type")]
    pub display_type: String,
    pub required: bool,
    pub description: Option<String>,
}

impl From<&Parameter> for ParameterView {
    fn from(param: &Parameter) -> Self {
        let display_type = match (&param.param_type, param.schema_ref_name()) {
            (_, Some(model)) => model.to_string(),
            (Some(t), None) => t.as_str().to_string(),
            (None, None) => "object".to_string(),
        };
        Self {
            name: param.name.clone(),
            location: param.location,
            display_type,
            required: param.required,
            description: param.description.clone(),
        }
    }
}

/// Everything shown for the selected operation.
///
/// Replaced wholesale when another operation is selected; models are never
/// updated once appended.
#[derive(Debug, Clone, Serialize)]
pub struct DetailPane {
    pub operation_id: String,
    pub method: HttpMethod,
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub consumes: String,
    pub parameters: Vec<ParameterView>,
    containers: IndexMap<String, Container>,
}

impl DetailPane {
    pub fn new(
        operation_id: impl Into<String>,
        method: HttpMethod,
        path: impl Into<String>,
    ) -> Self {
        Self {
            operation_id: operation_id.into(),
            method,
            path: path.into(),
            summary: None,
            description: None,
            consumes: "application/json".to_string(),
            parameters: Vec::new(),
            containers: IndexMap::new(),
        }
    }

    pub fn contains(&self, dom_id: &str, model_name: &str) -> bool {
        self.containers
            .get(dom_id)
            .is_some_and(|c| c.models.iter().any(|m| m.name == model_name))
    }

    pub fn append(&mut self, model: RenderedModel) {
        self.containers
            .entry(model.dom_id.clone())
            .or_default()
            .models
            .push(model);
    }

    pub fn set_type_view(&mut self, dom_id: &str, type_name: impl Into<String>) {
        self.containers.entry(dom_id.to_string()).or_default().type_view =
            Some(type_name.into());
    }

    pub fn container(&self, dom_id: &str) -> Option<&Container> {
        self.containers.get(dom_id)
    }

    /// Models rendered into `dom_id`, in append order.
    pub fn models(&self, dom_id: &str) -> &[RenderedModel] {
        self.containers
            .get(dom_id)
            .map(|c| c.models.as_slice())
            .unwrap_or(&[])
    }

    pub fn containers(&self) -> impl Iterator<Item = (&str, &Container)> {
        self.containers.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Id of the hidden field carrying the body mode for this operation.
    pub fn content_type_id(&self) -> String {
        format!("content_type_{}", self.operation_id)
    }

    pub fn form_id(&self) -> String {
        format!("form_{}", self.operation_id)
    }
}
