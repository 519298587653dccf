use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Marker in the page query that switches document loading to the static file.
pub const STATIC_DOCUMENT_MARKER: &str = "_ijt=";

/// Top-level configuration loaded from `.apidesk.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApideskConfig {
    /// Protocol and host of the served API, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Path prefix inserted between `base_url` and every operation path.
    pub api_path: String,
    /// Where the document lives. Falls back to `base_url` when unset.
    pub api_url: Option<String>,
    pub docs_path: String,
    /// Query string of the page that launched the session, if any.
    pub page_query: Option<String>,
    pub static_document: String,
    pub timeout_secs: Option<u64>,
    pub locale: LocaleConfig,
}

impl Default for ApideskConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_path: String::new(),
            api_url: None,
            docs_path: "/v2/api-docs".to_string(),
            page_query: None,
            static_document: "swagger.json".to_string(),
            timeout_secs: None,
            locale: LocaleConfig::default(),
        }
    }
}

impl ApideskConfig {
    /// Location of the API document.
    ///
    /// The static document wins when the page query carries
    /// [`STATIC_DOCUMENT_MARKER`].
    pub fn document_url(&self) -> String {
        let uses_static = self
            .page_query
            .as_deref()
            .is_some_and(|q| q.contains(STATIC_DOCUMENT_MARKER));
        if uses_static {
            return self.static_document.clone();
        }
        let root = self.api_url.as_deref().unwrap_or(&self.base_url);
        format!("{}{}", root.trim_end_matches('/'), self.docs_path)
    }

    /// Base that operation paths are appended to.
    pub fn request_base(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let api_path = self.api_path.trim_end_matches('/');
        if api_path.is_empty() {
            base.to_string()
        } else if api_path.starts_with('/') {
            format!("{base}{api_path}")
        } else {
            format!("{base}/{api_path}")
        }
    }
}

/// Locale plugin settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub endpoint: String,
    pub language: String,
    pub catalog_dir: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            endpoint: "/i18n/language".to_string(),
            language: "en".to_string(),
            catalog_dir: "i18n".to_string(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".apidesk.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ApideskConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: ApideskConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# apidesk configuration
base_url: http://localhost:8080
api_path: ""            # prefix between base_url and operation paths
# api_url: http://docs.internal:8080   # where /v2/api-docs is served, defaults to base_url
docs_path: /v2/api-docs
# page_query: "?_ijt=1"  # presence of _ijt= loads static_document instead
static_document: swagger.json
# timeout_secs: 30

locale:
  endpoint: /i18n/language
  language: en
  catalog_dir: i18n
"#
}
