use std::path::PathBuf;

use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::Value;

use crate::error::AssembleError;
use crate::parse::operation::HttpMethod;
use crate::parse::parameter::{Parameter, ParameterLocation};
use crate::parse::spec::{ApiDocument, OperationRef};

use super::descriptor::{BodyMode, FormField, FormValue, Payload, RequestDescriptor};
use super::form::FormInput;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Builds [`RequestDescriptor`]s for the operations of one document.
pub struct Assembler<'a> {
    doc: &'a ApiDocument,
    base: String,
}

impl<'a> Assembler<'a> {
    /// `base` is protocol, host and API path; operation paths are appended
    /// to it as-is.
    pub fn new(doc: &'a ApiDocument, base: impl Into<String>) -> Self {
        Self {
            doc,
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn assemble(
        &self,
        operation_id: &str,
        form: &FormInput,
    ) -> Result<RequestDescriptor, AssembleError> {
        let op = self
            .doc
            .find_operation(operation_id)
            .ok_or_else(|| AssembleError::UnknownOperation(operation_id.to_string()))?;
        self.assemble_operation(&op, form)
    }

    pub fn assemble_operation(
        &self,
        op: &OperationRef<'_>,
        form: &FormInput,
    ) -> Result<RequestDescriptor, AssembleError> {
        let mut url = format!("{}{}", self.base, op.path);

        for param in params_in(op, ParameterLocation::Path) {
            let value = form.value(ParameterLocation::Path, &param.name);
            if !value.is_empty() {
                url = url.replace(&format!("{{{}}}", param.name), value);
            }
        }

        let mut headers = IndexMap::new();
        for param in params_in(op, ParameterLocation::Header) {
            let value = form.value(ParameterLocation::Header, &param.name);
            if !value.is_empty() {
                headers.insert(param.name.clone(), value.to_string());
            }
        }

        let mut query = IndexMap::new();
        let mut json_value = None;
        match form.mode {
            BodyMode::Form => {
                for param in params_in(op, ParameterLocation::Query) {
                    let value = form.value(ParameterLocation::Query, &param.name);
                    if value.is_empty() {
                        if param.required {
                            return Err(AssembleError::MissingRequired(param.name.clone()));
                        }
                    } else {
                        query.insert(param.name.clone(), value.to_string());
                    }
                }
            }
            BodyMode::Json => {
                let parsed: Value = serde_json::from_str(&form.json_text)
                    .map_err(|e| AssembleError::InvalidJson(e.to_string()))?;
                json_value = Some(parsed);
            }
        }

        let (payload, content_type, cacheable) = if op.has_location(ParameterLocation::FormData) {
            let fields = params_in(op, ParameterLocation::FormData)
                .filter_map(|param| {
                    let value = form.value(ParameterLocation::FormData, &param.name);
                    (!value.is_empty()).then(|| FormField {
                        name: param.name.clone(),
                        value: form_value(value),
                    })
                })
                .collect();
            (Payload::Multipart(fields), None, false)
        } else if let Some(body) = params_in(op, ParameterLocation::Body).next() {
            let raw = form.value(ParameterLocation::Body, &body.name).to_string();
            (
                Payload::Raw(raw),
                Some(self.doc.consumes_for(op.operation)),
                true,
            )
        } else {
            match json_value.take() {
                Some(value) if sends_body(op.method) => {
                    (Payload::Json(value), Some(JSON_CONTENT_TYPE.to_string()), true)
                }
                other => {
                    json_value = other;
                    (Payload::Empty, None, true)
                }
            }
        };

        // JSON text that did not become the body travels as query parameters.
        if let Some(value) = &json_value {
            match value.as_object() {
                Some(object) => {
                    for (k, v) in object {
                        query.insert(k.clone(), query_value(v));
                    }
                }
                None => warn!("{}: JSON parameters are not an object, dropped", op.id),
            }
        }

        let parameters = match &payload {
            Payload::Raw(raw) => Value::String(raw.clone()),
            Payload::Multipart(fields) => Value::Object(
                fields
                    .iter()
                    .map(|f| {
                        let shown = match &f.value {
                            FormValue::Text(text) => text.clone(),
                            FormValue::File(path) => format!("@{}", path.display()),
                        };
                        (f.name.clone(), Value::String(shown))
                    })
                    .collect(),
            ),
            Payload::Json(value) => value.clone(),
            Payload::Empty => Value::Object(
                query
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            ),
        };

        let url = append_query(&url, &query);
        debug!("assembled {} {}", op.method, url);

        Ok(RequestDescriptor {
            method: op.method,
            url,
            headers,
            payload,
            content_type,
            cacheable,
            parameters,
        })
    }
}

fn params_in<'o>(
    op: &'o OperationRef<'_>,
    location: ParameterLocation,
) -> impl Iterator<Item = &'o Parameter> {
    op.parameters.iter().filter(move |p| p.location == location)
}

fn sends_body(method: HttpMethod) -> bool {
    !matches!(method, HttpMethod::Get | HttpMethod::Head)
}

/// A form value of `@path` uploads the file at `path`.
fn form_value(value: &str) -> FormValue {
    match value.strip_prefix('@') {
        Some(path) if !path.is_empty() => FormValue::File(PathBuf::from(path)),
        _ => FormValue::Text(value.to_string()),
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Append `params` to `url` as `k=v` pairs joined by `&`.
///
/// An empty map leaves the URL unchanged; an existing query string is
/// extended.
pub fn append_query(url: &str, params: &IndexMap<String, String>) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let mut out = url.to_string();
    if !out.contains('?') {
        out.push('?');
    } else if !out.ends_with('?') && !out.ends_with('&') {
        out.push('&');
    }
    for (k, v) in params {
        out.push_str(k);
        out.push('=');
        out.push_str(v);
        out.push('&');
    }
    out.pop();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_append_query_empty_map() {
        assert_eq!(append_query("http://h/pets", &IndexMap::new()), "http://h/pets");
    }

    #[test]
    fn test_append_query_in_order() {
        let url = append_query("http://h/pets", &params(&[("b", "2"), ("a", "1")]));
        assert_eq!(url, "http://h/pets?b=2&a=1");
    }

    #[test]
    fn test_append_query_extends_existing() {
        assert_eq!(
            append_query("http://h/pets?x=1", &params(&[("a", "1")])),
            "http://h/pets?x=1&a=1"
        );
        assert_eq!(
            append_query("http://h/pets?", &params(&[("a", "1")])),
            "http://h/pets?a=1"
        );
    }

    #[test]
    fn test_form_value_file_prefix() {
        assert_eq!(form_value("@/tmp/a.png"), FormValue::File(PathBuf::from("/tmp/a.png")));
        assert_eq!(form_value("@"), FormValue::Text("@".to_string()));
        assert_eq!(form_value("plain"), FormValue::Text("plain".to_string()));
    }

    #[test]
    fn test_query_value_unquotes_strings() {
        assert_eq!(query_value(&Value::String("rex".into())), "rex");
        assert_eq!(query_value(&serde_json::json!(3)), "3");
    }
}
