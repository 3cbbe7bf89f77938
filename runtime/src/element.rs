//! Element - Immutable Host Nodes
//!
//! Elements are the nodes a chain is made of when Cascade runs on the
//! in-memory host. They are immutable: attaching a prop returns a new
//! element that shares the old prop map's structure.

use crate::error::RenderError;
use cascade_core::{Attach, Continuation, ContinuationArgs, FieldName};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A continuation living in a prop.
pub type Callback = Continuation<Value, Element>;

/// A component's render function. It receives the component (name and
/// props) and returns what the component renders.
pub type RenderFn = Arc<dyn Fn(&Component) -> anyhow::Result<Element> + Send + Sync>;

#[derive(Clone, Debug)]
pub enum Prop {
    Value(Value),
    Callback(Callback),
}

impl Prop {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Prop::Value(value) => Some(value),
            Prop::Callback(_) => None,
        }
    }

    pub fn as_callback(&self) -> Option<&Callback> {
        match self {
            Prop::Value(_) => None,
            Prop::Callback(callback) => Some(callback),
        }
    }
}

/// Persistent prop map; `with` is clone-and-extend.
#[derive(Clone, Default)]
pub struct Props {
    inner: im::OrdMap<String, Prop>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(&self, name: impl Into<String>, prop: Prop) -> Self {
        Self {
            inner: self.inner.update(name.into(), prop),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Prop> {
        self.inner.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Plain values by name, plus the names of callback props.
    pub fn snapshot(&self) -> (BTreeMap<String, Value>, Vec<String>) {
        let mut values = BTreeMap::new();
        let mut callbacks = Vec::new();
        for (name, prop) in self.inner.iter() {
            match prop {
                Prop::Value(value) => {
                    values.insert(name.clone(), value.clone());
                }
                Prop::Callback(_) => callbacks.push(name.clone()),
            }
        }
        (values, callbacks)
    }
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.iter()).finish()
    }
}

#[derive(Clone)]
pub struct Component {
    name: Arc<str>,
    props: Props,
    render: RenderFn,
}

impl Component {
    pub fn new<F>(name: &str, render: F) -> Self
    where
        F: Fn(&Component) -> anyhow::Result<Element> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            props: Props::new(),
            render: Arc::new(render),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Builder: set a plain value prop.
    pub fn prop(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_prop(name, Prop::Value(value.into()))
    }

    /// Builder: set a callback prop.
    pub fn callback<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(ContinuationArgs<Value>) -> Element + Send + Sync + 'static,
    {
        self.with_prop(name, Prop::Callback(Continuation::new(f)))
    }

    /// A copy of this component with one more prop. `self` is unchanged.
    pub fn with_prop(&self, name: impl Into<String>, prop: Prop) -> Self {
        Self {
            name: Arc::clone(&self.name),
            props: self.props.with(name, prop),
            render: Arc::clone(&self.render),
        }
    }

    pub fn value(&self, prop: &str) -> Option<&Value> {
        self.props.get(prop).and_then(Prop::as_value)
    }

    pub fn str(&self, prop: &str) -> Option<&str> {
        self.value(prop).and_then(Value::as_str)
    }

    pub fn callback_prop(&self, prop: &str) -> Result<&Callback, RenderError> {
        match self.props.get(prop) {
            Some(Prop::Callback(callback)) => Ok(callback),
            Some(Prop::Value(_)) => Err(RenderError::not_callable(self.name(), prop)),
            None => Err(RenderError::missing_prop(self.name(), prop)),
        }
    }

    /// Call the callback stored under `prop`.
    pub fn invoke(
        &self,
        prop: &str,
        args: impl Into<ContinuationArgs<Value>>,
    ) -> Result<Element, RenderError> {
        Ok(self.callback_prop(prop)?.call(args))
    }

    /// Call the callback stored under `prop` with a single argument.
    pub fn invoke_one(&self, prop: &str, value: impl Into<Value>) -> Result<Element, RenderError> {
        Ok(self.callback_prop(prop)?.call_one(value.into()))
    }

    pub(crate) fn render(&self) -> anyhow::Result<Element> {
        (self.render)(self)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.name)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Default)]
pub enum Element {
    /// Renders nothing.
    #[default]
    Empty,
    Text(String),
    Component(Component),
    Fragment(Vec<Element>),
}

impl Element {
    pub fn text(text: impl Into<String>) -> Self {
        Element::Text(text.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Element::Empty => "empty",
            Element::Text(_) => "text",
            Element::Component(_) => "component",
            Element::Fragment(_) => "fragment",
        }
    }

    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Element::Component(component) => Some(component),
            _ => None,
        }
    }
}

impl From<Component> for Element {
    fn from(component: Component) -> Self {
        Element::Component(component)
    }
}

impl Attach<Value> for Element {
    fn attach(&self, field: &FieldName, continuation: Callback) -> Self {
        match self {
            Element::Component(component) => {
                Element::Component(component.with_prop(field.as_str(), Prop::Callback(continuation)))
            }
            other => {
                tracing::warn!(
                    field = %field,
                    kind = other.kind(),
                    "Only components carry props; the chain stops at this element"
                );
                other.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn label() -> Component {
        Component::new("Label", |c| Ok(Element::text(c.str("text").unwrap_or_default())))
    }

    #[test]
    fn test_with_prop_leaves_original_untouched() {
        let base = label().prop("text", "hi");
        let extended = base.with_prop("extra", Prop::Value(json!(1)));

        assert_eq!(base.props().len(), 1);
        assert_eq!(extended.props().len(), 2);
        assert_eq!(extended.str("text"), Some("hi"));
    }

    #[test]
    fn test_attach_adds_callback_under_field() {
        let element: Element = label().into();
        let attached = element.attach(&FieldName::Render, Continuation::new(|_| Element::Empty));

        let component = attached.as_component().unwrap();
        assert!(component.callback_prop("render").is_ok());
        assert!(!element.as_component().unwrap().props().contains("render"));
    }

    #[test]
    fn test_attach_to_text_is_a_no_op() {
        let element = Element::text("plain");
        let attached = element.attach(&FieldName::Children, Continuation::new(|_| Element::Empty));
        assert!(matches!(attached, Element::Text(ref t) if t == "plain"));
    }

    #[test]
    fn test_callback_prop_errors() {
        let component = label().prop("text", "hi");
        assert!(matches!(
            component.callback_prop("children"),
            Err(RenderError::MissingProp { .. })
        ));
        assert!(matches!(
            component.callback_prop("text"),
            Err(RenderError::NotCallable { .. })
        ));
    }

    #[test]
    fn test_snapshot_splits_values_and_callbacks() {
        let component = label()
            .prop("text", "hi")
            .callback("children", |_| Element::Empty);
        let (values, callbacks) = component.props().snapshot();

        assert_eq!(values.get("text"), Some(&json!("hi")));
        assert_eq!(callbacks, vec!["children".to_string()]);
    }
}
