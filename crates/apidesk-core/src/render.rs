use std::collections::{BTreeMap, HashMap};

use minijinja::{Environment, context};
use serde_json::Value;

use crate::error::RenderError;
use crate::view::{DetailPane, Navigation};

fn environment() -> Result<Environment<'static>, RenderError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_template(
        "navigation.txt.j2",
        include_str!("../templates/navigation.txt.j2"),
    )?;
    env.add_template("detail.txt.j2", include_str!("../templates/detail.txt.j2"))?;
    Ok(env)
}

/// Fixed words the templates print around document content.
pub const LABEL_KEYS: &[&str] = &["Parameters", "none", "required", "deprecated", "consumes"];

/// Looks up display text for a label key.
pub trait Translate {
    /// Text for `key`, or `key` itself when there is no entry.
    fn translate<'a>(&'a self, key: &'a str) -> &'a str;
}

/// Shows every label as its key.
pub struct Untranslated;

impl Translate for Untranslated {
    fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        key
    }
}

impl Translate for HashMap<String, String> {
    fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).map(String::as_str).unwrap_or(key)
    }
}

fn labels(tr: &dyn Translate) -> BTreeMap<&'static str, String> {
    LABEL_KEYS
        .iter()
        .map(|key| (*key, tr.translate(key).to_string()))
        .collect()
}

/// Render the navigation menu.
pub fn render_navigation(nav: &Navigation, tr: &dyn Translate) -> Result<String, RenderError> {
    let env = environment()?;
    let tmpl = env.get_template("navigation.txt.j2")?;
    Ok(tmpl.render(context! {
        title => nav.title.clone(),
        description => nav.description.clone(),
        version => nav.version.clone(),
        groups => nav.groups.clone(),
        labels => labels(tr),
    })?)
}

/// Render the detail pane of the selected operation.
pub fn render_detail(pane: &DetailPane, tr: &dyn Translate) -> Result<String, RenderError> {
    let env = environment()?;
    let tmpl = env.get_template("detail.txt.j2")?;
    Ok(tmpl.render(context! { pane => pane, labels => labels(tr) })?)
}

/// Render a JSON value as an indented tree, one node per line.
pub fn render_json_tree(value: &Value) -> String {
    let mut out = label(value);
    out.push('\n');
    write_children(&mut out, value, "");
    out
}

fn label(value: &Value) -> String {
    match value {
        Value::Object(map) => format!("Object {{{}}}", map.len()),
        Value::Array(items) => format!("Array [{}]", items.len()),
        scalar => scalar.to_string(),
    }
}

fn write_children(out: &mut String, value: &Value, prefix: &str) {
    let children: Vec<(String, &Value)> = match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => return,
    };
    let count = children.len();
    for (i, (key, child)) in children.into_iter().enumerate() {
        let last = i + 1 == count;
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(&key);
        out.push_str(": ");
        out.push_str(&label(child));
        out.push('\n');
        let nested = format!("{prefix}{}", if last { "    " } else { "│   " });
        write_children(out, child, &nested);
    }
}
