//! Mounted - The Activated Tree
//!
//! What the renderer produces after activating every component. Callbacks
//! are gone at this point; only their names are kept.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mounted {
    Empty,
    Text { text: String },
    Fragment { children: Vec<Mounted> },
    Component(MountedComponent),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MountedComponent {
    pub name: String,
    pub props: BTreeMap<String, Value>,
    pub callbacks: Vec<String>,
    pub child: Box<Mounted>,
}

impl MountedComponent {
    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    pub fn has_callback(&self, name: &str) -> bool {
        self.callbacks.iter().any(|c| c == name)
    }

    /// The nearest components below this one, looking through fragments.
    pub fn children(&self) -> Vec<&MountedComponent> {
        self.child.top_components()
    }

    /// First component child, like `childAt(0)`.
    pub fn child_at(&self, index: usize) -> Option<&MountedComponent> {
        self.children().into_iter().nth(index)
    }
}

impl Mounted {
    pub fn as_component(&self) -> Option<&MountedComponent> {
        match self {
            Mounted::Component(component) => Some(component),
            _ => None,
        }
    }

    /// Every component named `name`, in pre-order.
    pub fn find(&self, name: &str) -> Vec<&MountedComponent> {
        let mut found = Vec::new();
        self.walk(&mut |component| {
            if component.name == name {
                found.push(component);
            }
        });
        found
    }

    pub fn first(&self, name: &str) -> Option<&MountedComponent> {
        self.find(name).into_iter().next()
    }

    /// True when components named `path[0] > path[1] > ...` are nested in
    /// that order (each a descendant of the previous, not necessarily direct).
    pub fn has_path(&self, path: &[&str]) -> bool {
        let Some((head, rest)) = path.split_first() else {
            return true;
        };
        self.find(head)
            .into_iter()
            .any(|component| component.child.has_path(rest))
    }

    /// Concatenated text of every text node, in order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.text().contains(needle)
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a MountedComponent)) {
        match self {
            Mounted::Empty | Mounted::Text { .. } => {}
            Mounted::Fragment { children } => {
                for child in children {
                    child.walk(visit);
                }
            }
            Mounted::Component(component) => {
                visit(component);
                component.child.walk(visit);
            }
        }
    }

    fn top_components(&self) -> Vec<&MountedComponent> {
        match self {
            Mounted::Empty | Mounted::Text { .. } => Vec::new(),
            Mounted::Fragment { children } => {
                children.iter().flat_map(Mounted::top_components).collect()
            }
            Mounted::Component(component) => vec![component],
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Mounted::Empty => {}
            Mounted::Text { text } => out.push_str(text),
            Mounted::Fragment { children } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            Mounted::Component(component) => component.child.collect_text(out),
        }
    }
}
