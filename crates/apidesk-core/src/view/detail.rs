use log::debug;

use crate::parse::ref_resolve::ref_name;
use crate::parse::schema::SchemaOrRef;
use crate::parse::spec::{ApiDocument, OperationRef};

use super::model_resolver::{SchemaResolver, array_display_type};
use super::pane::{DetailPane, ParameterView, REQUEST_CONTAINER, RESPONSE_CONTAINER};

/// Build the detail pane for a selected operation.
///
/// Request body models are resolved first, then the `200` response model.
/// A response without a schema leaves the response container empty; a
/// primitive response schema is shown as a bare type.
pub fn build_detail(doc: &ApiDocument, op: &OperationRef<'_>) -> DetailPane {
    let mut pane = DetailPane::new(op.id.clone(), op.method, op.path);
    pane.summary = op.operation.summary.clone();
    pane.description = op.operation.description.clone();
    pane.consumes = doc.consumes_for(op.operation);
    pane.parameters = op.parameters.iter().map(ParameterView::from).collect();

    let mut resolver = SchemaResolver::new(doc);

    for param in &op.parameters {
        if let Some(model) = param.schema_ref_name() {
            resolver.resolve(REQUEST_CONTAINER, Some(model), &mut pane);
        }
    }

    let Some(schema) = op
        .operation
        .responses
        .get("200")
        .and_then(|r| r.schema.as_ref())
    else {
        debug!("{} has no 200 response schema", op.id);
        return pane;
    };

    match schema {
        SchemaOrRef::Ref { ref_path } => {
            resolver.resolve(RESPONSE_CONTAINER, Some(ref_name(ref_path)), &mut pane);
        }
        SchemaOrRef::Schema(inline) => match (&inline.items, inline.schema_type) {
            (Some(items), _) => {
                let (display, target) = array_display_type(items);
                pane.set_type_view(RESPONSE_CONTAINER, display);
                resolver.resolve(RESPONSE_CONTAINER, target.as_deref(), &mut pane);
            }
            (None, Some(t)) => pane.set_type_view(RESPONSE_CONTAINER, t.as_str()),
            (None, None) => pane.set_type_view(RESPONSE_CONTAINER, "object"),
        },
    }

    pane
}
