use std::path::Path;
use std::time::Duration;

use apidesk_core::config::ApideskConfig;
use apidesk_core::parse;
use apidesk_core::parse::spec::ApiDocument;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::error::LoadError;

/// Fetches and parses the API document once per session.
pub struct DocumentLoader {
    client: Client,
}

impl DocumentLoader {
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Load the document the config points at.
    ///
    /// A location that is not an absolute URL is read from disk when such a
    /// file exists, otherwise it is resolved against `base_url`.
    pub fn load(&self, config: &ApideskConfig) -> Result<ApiDocument, LoadError> {
        let location = config.document_url();
        if is_absolute_url(&location) {
            return self.fetch(&location);
        }
        let path = Path::new(&location);
        if path.is_file() {
            return load_file(path);
        }
        let url = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            location.trim_start_matches('/')
        );
        self.fetch(&url)
    }

    pub fn fetch(&self, url: &str) -> Result<ApiDocument, LoadError> {
        log::debug!("fetching API document from {url}");
        let fetch_err = |source| LoadError::Fetch {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().map_err(fetch_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("json"));
        if is_json {
            let value: Value = response.json().map_err(fetch_err)?;
            return Ok(parse::from_value(value)?);
        }
        let body = response.text().map_err(fetch_err)?;
        Ok(parse_document(&body)?)
    }
}

/// Read a document from a local JSON or YAML file.
pub fn load_file(path: &Path) -> Result<ApiDocument, LoadError> {
    log::debug!("reading API document from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_document(&content)?)
}

fn parse_document(content: &str) -> Result<ApiDocument, apidesk_core::error::ParseError> {
    if content.trim_start().starts_with('{') {
        parse::from_json(content)
    } else {
        parse::from_yaml(content)
    }
}

fn is_absolute_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}
