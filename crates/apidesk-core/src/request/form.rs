use indexmap::IndexMap;

use crate::parse::parameter::ParameterLocation;

use super::descriptor::BodyMode;

/// The values a user typed into one operation's form.
///
/// Fields are addressed by `(location, name)`; an absent field reads as
/// empty.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub mode: BodyMode,
    /// Raw text of the JSON editor, used in [`BodyMode::Json`].
    pub json_text: String,
    fields: IndexMap<(ParameterLocation, String), String>,
}

impl FormInput {
    pub fn new(mode: BodyMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn json(text: impl Into<String>) -> Self {
        Self {
            mode: BodyMode::Json,
            json_text: text.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn set(
        &mut self,
        location: ParameterLocation,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.fields.insert((location, name.into()), value.into());
    }

    pub fn with(
        mut self,
        location: ParameterLocation,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set(location, name, value);
        self
    }

    pub fn value(&self, location: ParameterLocation, name: &str) -> &str {
        self.fields
            .get(&(location, name.to_string()))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_field_reads_empty() {
        let form = FormInput::default();
        assert_eq!(form.value(ParameterLocation::Query, "q"), "");
        assert_eq!(form.mode, BodyMode::Form);
    }

    #[test]
    fn test_same_name_different_location() {
        let form = FormInput::default()
            .with(ParameterLocation::Query, "id", "1")
            .with(ParameterLocation::Header, "id", "2");
        assert_eq!(form.value(ParameterLocation::Query, "id"), "1");
        assert_eq!(form.value(ParameterLocation::Header, "id"), "2");
    }
}
