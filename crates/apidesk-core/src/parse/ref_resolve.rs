use log::debug;

use super::parameter::{Parameter, ParameterOrRef};
use super::schema::Schema;
use super::spec::ApiDocument;

/// Looks `$ref` targets up in a document's `definitions` and `parameters`.
///
/// Missing targets are not errors: callers skip them.
pub struct RefResolver<'a> {
    doc: &'a ApiDocument,
}

impl<'a> RefResolver<'a> {
    pub fn new(doc: &'a ApiDocument) -> Self {
        Self { doc }
    }

    pub fn definition(&self, name: &str) -> Option<&'a Schema> {
        let found = self.doc.definitions.get(name);
        if found.is_none() {
            debug!("definition not found: {name}");
        }
        found
    }

    pub fn parameter(&self, param: &ParameterOrRef) -> Option<Parameter> {
        match param {
            ParameterOrRef::Parameter(p) => Some(p.clone()),
            ParameterOrRef::Ref { ref_path } => {
                let found = self.doc.parameters.get(ref_name(ref_path)).cloned();
                if found.is_none() {
                    debug!("shared parameter not found: {ref_path}");
                }
                found
            }
        }
    }
}

/// Model name of a `$ref` like `#/definitions/Pet`: the last `/` segment.
pub fn ref_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}
