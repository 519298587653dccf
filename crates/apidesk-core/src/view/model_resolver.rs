use std::collections::HashSet;

use log::{debug, trace};

use crate::parse::ref_resolve::{RefResolver, ref_name};
use crate::parse::schema::{Schema, SchemaOrRef};
use crate::parse::spec::ApiDocument;

use super::pane::{DetailPane, PropertyView, RenderedModel};

/// Expands a named definition, and every definition it reaches, into a
/// [`DetailPane`] container.
///
/// Each `(dom_id, model)` pair is visited once per resolver, so cyclic
/// model graphs terminate.
pub struct SchemaResolver<'a> {
    refs: RefResolver<'a>,
    visited: HashSet<(String, String)>,
}

impl<'a> SchemaResolver<'a> {
    pub fn new(doc: &'a ApiDocument) -> Self {
        Self {
            refs: RefResolver::new(doc),
            visited: HashSet::new(),
        }
    }

    pub fn resolve(&mut self, dom_id: &str, model_name: Option<&str>, pane: &mut DetailPane) {
        let Some(model_name) = model_name.filter(|n| !n.is_empty()) else {
            return;
        };
        if !self
            .visited
            .insert((dom_id.to_string(), model_name.to_string()))
        {
            trace!("already visited {dom_id}/{model_name}");
            return;
        }
        let Some(schema) = self.refs.definition(model_name) else {
            return;
        };

        let (properties, nested) = rewrite_properties(schema);

        if pane.contains(dom_id, model_name) {
            debug!("model {model_name} already rendered in {dom_id}");
        } else {
            pane.append(RenderedModel {
                name: model_name.to_string(),
                dom_id: dom_id.to_string(),
                description: schema.description.clone(),
                properties,
            });
        }

        for name in nested {
            self.resolve(dom_id, Some(&name), pane);
        }
    }
}

/// Resolve `model_name` into `dom_id` with a fresh visited set.
pub fn resolve_model(
    dom_id: &str,
    doc: &ApiDocument,
    model_name: Option<&str>,
    pane: &mut DetailPane,
) {
    SchemaResolver::new(doc).resolve(dom_id, model_name, pane);
}

/// Display type of an array whose items are `items`, plus the referenced
/// model when the items are a `$ref`.
pub fn array_display_type(items: &SchemaOrRef) -> (String, Option<String>) {
    match items {
        SchemaOrRef::Ref { ref_path } => {
            let name = ref_name(ref_path).to_string();
            (format!("Array[{name}]"), Some(name))
        }
        SchemaOrRef::Schema(item) => {
            let literal = item.schema_type.map(|t| t.as_str()).unwrap_or("object");
            (format!("Array[{literal}]"), None)
        }
    }
}

/// First pass: finalize each property's display type and collect, in
/// property order, the models the properties lead to.
fn rewrite_properties(schema: &Schema) -> (Vec<PropertyView>, Vec<String>) {
    let mut views = Vec::with_capacity(schema.properties.len());
    let mut nested = Vec::new();

    for (name, prop) in &schema.properties {
        let required = schema.required.contains(name);
        let view = match prop {
            SchemaOrRef::Ref { ref_path } => {
                let target = ref_name(ref_path).to_string();
                nested.push(target.clone());
                PropertyView {
                    name: name.clone(),
                    display_type: target,
                    format: None,
                    description: None,
                    required,
                }
            }
            SchemaOrRef::Schema(inner) => {
                let display_type = match (&inner.items, inner.schema_type) {
                    (Some(items), _) => {
                        let (display, target) = array_display_type(items);
                        if let Some(target) = target {
                            nested.push(target);
                        }
                        display
                    }
                    (None, Some(t)) => t.as_str().to_string(),
                    (None, None) => "object".to_string(),
                };
                PropertyView {
                    name: name.clone(),
                    display_type,
                    format: inner.format.clone(),
                    description: inner.description.clone(),
                    required,
                }
            }
        };
        views.push(view);
    }

    (views, nested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::operation::HttpMethod;
    use crate::parse::schema::SchemaType;

    #[test]
    fn test_array_display_type_primitive() {
        let items = SchemaOrRef::Schema(Box::new(Schema {
            schema_type: Some(SchemaType::Integer),
            ..Schema::default()
        }));
        assert_eq!(array_display_type(&items), ("Array[integer]".to_string(), None));
    }

    #[test]
    fn test_array_display_type_ref_uses_model_name() {
        let items = SchemaOrRef::Ref {
            ref_path: "#/definitions/Tag".to_string(),
        };
        assert_eq!(
            array_display_type(&items),
            ("Array[Tag]".to_string(), Some("Tag".to_string()))
        );
    }

    #[test]
    fn test_empty_model_name_is_noop() {
        let doc = ApiDocument::default();
        let mut pane = DetailPane::new("x", HttpMethod::Get, "/");
        resolve_model("c", &doc, None, &mut pane);
        resolve_model("c", &doc, Some(""), &mut pane);
        assert!(pane.container("c").is_none());
    }

    #[test]
    fn test_missing_model_is_skipped() {
        let doc = ApiDocument::default();
        let mut pane = DetailPane::new("x", HttpMethod::Get, "/");
        resolve_model("c", &doc, Some("Ghost"), &mut pane);
        assert!(pane.models("c").is_empty());
    }
}
