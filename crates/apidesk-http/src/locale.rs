use std::collections::HashMap;
use std::path::Path;

use apidesk_core::config::LocaleConfig;
use apidesk_core::render::Translate;
use reqwest::blocking::Client;

use crate::error::LocaleError;

/// Translation strings for one language.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub language: String,
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Load `<dir>/<language>.json`. A missing file yields an empty catalog.
    pub fn load(dir: &Path, language: &str) -> Result<Self, LocaleError> {
        let path = dir.join(format!("{language}.json"));
        if !path.exists() {
            log::debug!("no catalog at {}, using keys as text", path.display());
            return Ok(Self {
                language: language.to_string(),
                entries: HashMap::new(),
            });
        }
        let content = std::fs::read_to_string(&path).map_err(|source| LocaleError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let entries = serde_json::from_str(&content).map_err(|source| LocaleError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            language: language.to_string(),
            entries,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translate for Catalog {
    fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.translate(key)
    }
}

/// What the caller should do after a language switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    Reload(String),
}

/// Tells the server which language the user picked.
pub struct LocaleSwitcher {
    client: Client,
    endpoint: String,
}

impl LocaleSwitcher {
    pub fn new(base_url: &str, config: &LocaleConfig) -> Self {
        let endpoint = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            config.endpoint.trim_start_matches('/')
        );
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the choice, then reload `page_url` whether or not it was accepted.
    pub fn switch(&self, language: &str, page_url: &str) -> SwitchOutcome {
        let result = self
            .client
            .post(&self.endpoint)
            .form(&[("language", language), ("url", page_url)])
            .send()
            .and_then(|response| response.error_for_status());
        match result {
            Ok(_) => log::info!("switched language to {language}"),
            Err(e) => log::warn!("language switch to {language} failed: {e}"),
        }
        SwitchOutcome::Reload(page_url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use apidesk_core::parse::operation::HttpMethod;
    use apidesk_core::parse::parameter::ParameterLocation;
    use apidesk_core::render::render_detail;
    use apidesk_core::view::{DetailPane, ParameterView};

    use super::*;

    #[test]
    fn test_missing_catalog_translates_to_key() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::load(dir.path(), "fr").unwrap();
        assert_eq!(catalog.language, "fr");
        assert!(catalog.is_empty());
        assert_eq!(catalog.translate("Parameters"), "Parameters");
    }

    #[test]
    fn test_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("zh_CN.json"),
            r#"{"Parameters": "参数", "Send": "发送"}"#,
        )
        .unwrap();
        let catalog = Catalog::load(dir.path(), "zh_CN").unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.translate("Send"), "发送");
        assert_eq!(catalog.translate("Result"), "Result");
    }

    #[test]
    fn test_catalog_translates_rendered_detail() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("zh_CN.json"),
            r#"{"Parameters": "参数", "required": "必填"}"#,
        )
        .unwrap();
        let catalog = Catalog::load(dir.path(), "zh_CN").unwrap();

        let mut pane = DetailPane::new("getPet", HttpMethod::Get, "/pets/{id}");
        pane.parameters.push(ParameterView {
            name: "id".to_string(),
            location: ParameterLocation::Path,
            display_type: "integer".to_string(),
            description: None,
            required: true,
        });
        let text = render_detail(&pane, &catalog).unwrap();
        assert!(text.contains("参数\n  id (path, integer) 必填"));
    }

    #[test]
    fn test_malformed_catalog_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.json"), "[1, 2").unwrap();
        let err = Catalog::load(dir.path(), "en").unwrap_err();
        assert!(matches!(err, LocaleError::Parse { .. }));
    }

    #[test]
    fn test_endpoint_joins_base_and_path() {
        let switcher = LocaleSwitcher::new("http://localhost:8080/", &LocaleConfig::default());
        assert_eq!(switcher.endpoint(), "http://localhost:8080/i18n/language");
    }
}
