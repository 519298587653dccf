use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::operation::{HttpMethod, Operation, PathItem, derived_operation_id};
use super::parameter::{Parameter, ParameterOrRef};
use super::ref_resolve::RefResolver;
use super::schema::Schema;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub version: String,
}

/// Tag definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Top-level Swagger 2.0 document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiDocument {
    #[serde(default)]
    pub swagger: String,

    #[serde(default)]
    pub info: Info,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, Schema>,

    /// Shared parameters addressed by `#/parameters/<name>`.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Parameter>,
}

/// One method bound to one path, with its parameters resolved.
#[derive(Debug, Clone)]
pub struct OperationRef<'a> {
    pub id: String,
    pub path: &'a str,
    pub method: HttpMethod,
    pub operation: &'a Operation,
    /// Path-level and operation-level parameters, `$ref`s resolved.
    pub parameters: Vec<Parameter>,
}

impl OperationRef<'_> {
    /// The `METHOD::path` key used by the quick-select list.
    pub fn route_key(&self) -> String {
        format!("{}::{}", self.method.as_str(), self.path)
    }

    pub fn has_location(&self, location: super::parameter::ParameterLocation) -> bool {
        self.parameters.iter().any(|p| p.location == location)
    }
}

impl ApiDocument {
    /// Base URL declared by the document itself (`schemes`, `host`, `basePath`).
    pub fn declared_base_url(&self) -> Option<String> {
        let host = self.host.as_deref()?;
        let scheme = self.schemes.first().map(String::as_str).unwrap_or("http");
        let base_path = self.base_path.as_deref().unwrap_or("");
        let base_path = base_path.trim_end_matches('/');
        Some(format!("{scheme}://{host}{base_path}"))
    }

    /// Every operation in document order.
    pub fn operations(&self) -> Vec<OperationRef<'_>> {
        let resolver = RefResolver::new(self);
        let mut out = Vec::new();
        for (path, item) in &self.paths {
            for (method, operation) in item.operations() {
                let id = operation
                    .operation_id
                    .clone()
                    .unwrap_or_else(|| derived_operation_id(method, path));
                let parameters =
                    merge_parameters(&resolver, &item.parameters, &operation.parameters);
                out.push(OperationRef {
                    id,
                    path,
                    method,
                    operation,
                    parameters,
                });
            }
        }
        out
    }

    pub fn find_operation(&self, operation_id: &str) -> Option<OperationRef<'_>> {
        self.operations().into_iter().find(|op| op.id == operation_id)
    }

    /// Look an operation up by its `METHOD::path` quick-select key.
    pub fn find_by_route(&self, key: &str) -> Option<OperationRef<'_>> {
        let (method, path) = key.split_once("::")?;
        let method: HttpMethod = method.parse().ok()?;
        self.operations()
            .into_iter()
            .find(|op| op.method == method && op.path == path)
    }

    /// Media type a body parameter is sent with.
    pub fn consumes_for(&self, operation: &Operation) -> String {
        operation
            .consumes
            .first()
            .or_else(|| self.consumes.first())
            .cloned()
            .unwrap_or_else(|| "application/json".to_string())
    }
}

fn merge_parameters(
    resolver: &RefResolver<'_>,
    shared: &[ParameterOrRef],
    own: &[ParameterOrRef],
) -> Vec<Parameter> {
    let own: Vec<Parameter> = own.iter().filter_map(|p| resolver.parameter(p)).collect();
    let mut merged: Vec<Parameter> = shared
        .iter()
        .filter_map(|p| resolver.parameter(p))
        .filter(|p| {
            !own.iter()
                .any(|o| o.name == p.name && o.location == p.location)
        })
        .collect();
    merged.extend(own);
    merged
}
