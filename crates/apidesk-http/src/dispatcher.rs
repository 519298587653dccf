use std::time::Duration;

use apidesk_core::parse::operation::HttpMethod;
use apidesk_core::request::{FormValue, Payload, RequestDescriptor};
use reqwest::Method;
use reqwest::blocking::multipart::Form;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use serde_json::Value;

use crate::console::Console;
use crate::error::DispatchError;

/// Sends assembled requests and decodes their JSON results.
pub struct Dispatcher {
    client: Client,
}

impl Dispatcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Send one request, logging its progress to `console`.
    ///
    /// The console is cleared first, so it only ever shows the latest request.
    pub fn dispatch(
        &self,
        request: &RequestDescriptor,
        console: &mut Console,
    ) -> Result<Value, DispatchError> {
        console.clear();
        console.write(format!("Send {} request", request.method));
        console.write(format!("Parameters {}", request.parameters));

        let builder = self.build(request)?;
        let response = builder.send().map_err(|e| {
            log::warn!("{} {} failed: {e}", request.method, request.url);
            DispatchError::Transport {
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        let body = response.text().map_err(|e| DispatchError::Transport {
            message: e.to_string(),
        })?;
        if !status.is_success() {
            log::warn!("{} {} returned {status}", request.method, request.url);
            return Err(DispatchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }
        let value: Value = serde_json::from_str(&body).map_err(|_| DispatchError::NotJson {
            status: status.as_u16(),
            body,
        })?;

        console.write(format!("{} {}", request.method, request.url));
        console.write("Result :");
        Ok(value)
    }

    fn build(&self, request: &RequestDescriptor) -> Result<RequestBuilder, DispatchError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.cacheable {
            builder = builder.header(CACHE_CONTROL, "no-cache");
        }
        if request.method == HttpMethod::Get {
            return Ok(builder);
        }

        let builder = match &request.payload {
            Payload::Empty => builder,
            Payload::Json(value) => builder
                .header(
                    CONTENT_TYPE,
                    request.content_type.as_deref().unwrap_or("application/json"),
                )
                .body(value.to_string()),
            Payload::Raw(text) => {
                let builder = match &request.content_type {
                    Some(content_type) => builder.header(CONTENT_TYPE, content_type.as_str()),
                    None => builder,
                };
                builder.body(text.clone())
            }
            Payload::Multipart(fields) => {
                let mut form = Form::new();
                for field in fields {
                    form = match &field.value {
                        FormValue::Text(text) => form.text(field.name.clone(), text.clone()),
                        FormValue::File(path) => form.file(field.name.clone(), path).map_err(
                            |source| DispatchError::Attachment {
                                path: path.display().to_string(),
                                source,
                            },
                        )?,
                    };
                }
                builder.multipart(form)
            }
        };
        Ok(builder)
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Post => Method::POST,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Options => Method::OPTIONS,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Patch => Method::PATCH,
    }
}
