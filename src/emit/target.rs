//! The secondary target model and its rendering.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// A reference to a target or file in the secondary representation.
///
/// Renders as `:name` when the reference stays in its own directory and as
/// `//dir:name` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    dir: Option<String>,
    name: String,
}

impl Label {
    /// A same-directory reference.
    pub fn local(name: impl Into<String>) -> Self {
        Label {
            dir: None,
            name: name.into(),
        }
    }

    /// A fully-qualified reference.
    pub fn absolute(dir: impl Into<String>, name: impl Into<String>) -> Self {
        Label {
            dir: Some(dir.into()),
            name: name.into(),
        }
    }

    /// Reference from `from_dir` to `name`, declared in `decl_dir`.
    pub fn reference(from_dir: &str, decl_dir: &str, name: impl Into<String>) -> Self {
        if from_dir == decl_dir {
            Label::local(name)
        } else {
            Label::absolute(decl_dir, name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.dir {
            Some(dir) => write!(f, "//{}:{}", dir, self.name),
            None => write!(f, ":{}", self.name),
        }
    }
}

impl Serialize for Label {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// An attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    String(String),
    Label(Label),
    StringList(Vec<String>),
    LabelList(Vec<Label>),
}

/// One emitted target.
#[derive(Debug, Clone, Serialize)]
pub struct BuildTarget {
    /// Rule class instantiated by this target.
    pub rule_class: String,
    /// Where that rule class is loaded from.
    pub bzl_load_location: String,
    /// Target name; equals the originating module name.
    pub name: String,
    /// Directory the target is emitted into, tree-relative.
    pub dir: String,
    /// Attributes, ordered by attribute name. `name` is not stored here.
    pub attrs: BTreeMap<String, AttrValue>,
}

impl BuildTarget {
    pub fn new(
        rule_class: impl Into<String>,
        bzl_load_location: impl Into<String>,
        name: impl Into<String>,
        dir: impl Into<String>,
    ) -> Self {
        BuildTarget {
            rule_class: rule_class.into(),
            bzl_load_location: bzl_load_location.into(),
            name: name.into(),
            dir: dir.into(),
            attrs: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: AttrValue) {
        self.attrs.insert(key.into(), value);
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    /// Render the target in the secondary representation's syntax.
    pub fn render(&self) -> String {
        let mut out = format!("{}(\n    name = \"{}\",\n", self.rule_class, self.name);
        for (key, value) in &self.attrs {
            out.push_str(&format!("    {} = {},\n", key, render_value(value)));
        }
        out.push(')');
        out
    }
}

fn render_value(value: &AttrValue) -> String {
    match value {
        AttrValue::String(s) => quote(s),
        AttrValue::Label(l) => quote(&l.to_string()),
        AttrValue::StringList(items) => render_list(items.iter().map(|s| quote(s))),
        AttrValue::LabelList(items) => render_list(items.iter().map(|l| quote(&l.to_string()))),
    }
}

fn render_list(items: impl Iterator<Item = String>) -> String {
    let items: Vec<String> = items.collect();
    match items.len() {
        0 => "[]".to_string(),
        1 => format!("[{}]", items[0]),
        _ => {
            let mut out = "[\n".to_string();
            for item in &items {
                out.push_str(&format!("        {},\n", item));
            }
            out.push_str("    ]");
            out
        }
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
