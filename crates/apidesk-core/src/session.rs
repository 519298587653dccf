use std::collections::HashMap;

use log::{debug, info};

use crate::error::AssembleError;
use crate::parse::spec::ApiDocument;
use crate::request::{Assembler, FormInput, RequestDescriptor};
use crate::view::{DetailPane, Navigation, build_detail};

/// Called with every descriptor assembled for the operation it is
/// registered under.
pub type SubmitHandler<'h> = Box<dyn FnMut(&RequestDescriptor) + 'h>;

/// One viewer session over a loaded document.
///
/// Holds the document, the currently selected detail pane, and submit
/// callbacks keyed by operation id.
pub struct Session<'h> {
    document: ApiDocument,
    request_base: String,
    pane: Option<DetailPane>,
    handlers: HashMap<String, SubmitHandler<'h>>,
}

impl<'h> Session<'h> {
    pub fn new(document: ApiDocument, request_base: impl Into<String>) -> Self {
        Self {
            document,
            request_base: request_base.into(),
            pane: None,
            handlers: HashMap::new(),
        }
    }

    pub fn document(&self) -> &ApiDocument {
        &self.document
    }

    pub fn navigation(&self) -> Navigation {
        Navigation::build(&self.document)
    }

    /// Select an operation, replacing the detail pane wholesale.
    pub fn select(&mut self, operation_id: &str) -> Option<&DetailPane> {
        let Some(op) = self.document.find_operation(operation_id) else {
            debug!("select: unknown operation {operation_id}");
            return None;
        };
        let pane = build_detail(&self.document, &op);
        info!("selected {} {} ({})", pane.method, pane.path, pane.operation_id);
        self.pane = Some(pane);
        self.pane.as_ref()
    }

    /// Select by `METHOD::path` quick-select key.
    pub fn select_route(&mut self, route_key: &str) -> Option<&DetailPane> {
        let id = self.document.find_by_route(route_key)?.id;
        self.select(&id)
    }

    pub fn pane(&self) -> Option<&DetailPane> {
        self.pane.as_ref()
    }

    /// Register the callback run when `operation_id` is submitted.
    /// A later registration replaces an earlier one.
    pub fn on_submit<F>(&mut self, operation_id: impl Into<String>, handler: F)
    where
        F: FnMut(&RequestDescriptor) + 'h,
    {
        self.handlers.insert(operation_id.into(), Box::new(handler));
    }

    pub fn assemble(
        &self,
        operation_id: &str,
        form: &FormInput,
    ) -> Result<RequestDescriptor, AssembleError> {
        Assembler::new(&self.document, self.request_base.as_str()).assemble(operation_id, form)
    }

    /// Assemble a request and hand it to the registered callback.
    ///
    /// Validation failures return early and never reach the callback.
    pub fn submit(
        &mut self,
        operation_id: &str,
        form: &FormInput,
    ) -> Result<RequestDescriptor, AssembleError> {
        let descriptor = self.assemble(operation_id, form)?;
        match self.handlers.get_mut(operation_id) {
            Some(handler) => handler(&descriptor),
            None => debug!("no submit handler for {operation_id}"),
        }
        Ok(descriptor)
    }
}
