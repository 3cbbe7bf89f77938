//! Fixture producers.
//!
//! Small host components that call back in well-known ways, for exercising
//! chains end to end.

use cascade_core::{ContinuationArgs, FieldName, ResultsSequence};
use cascade_runtime::{Component, Element};
use serde_json::{Value, json};

/// Calls `children` with `{"value": value}`.
pub fn echo(value: impl Into<Value>) -> Element {
    echo_under(FieldName::Children, value)
}

/// Calls `renderProp` with `{"value": value}`.
pub fn echo_render_prop(value: impl Into<Value>) -> Element {
    echo_under("renderProp", value)
}

/// Calls its continuation under `field` with `{"value": value}`.
pub fn echo_under(field: impl Into<FieldName>, value: impl Into<Value>) -> Element {
    let field = field.into();
    let name = match &field {
        FieldName::Children => "Echo",
        _ => "EchoRenderProp",
    };
    Component::new(name, move |c| {
        let value = c.value("value").cloned().unwrap_or(Value::Null);
        Ok(c.invoke_one(field.as_str(), json!({ "value": value }))?)
    })
    .prop("value", value)
    .into()
}

/// Calls `children` with two arguments: `value` and its upper-case form.
pub fn double_echo(value: &str) -> Element {
    Component::new("DoubleEcho", |c| {
        let value = c.str("value").unwrap_or_default();
        Ok(c.invoke(
            "children",
            vec![json!(value), json!(value.to_uppercase())],
        )?)
    })
    .prop("value", value)
    .into()
}

/// Calls `field` with exactly `args`, whatever their number.
pub fn emit(name: &str, field: impl Into<FieldName>, args: Vec<Value>) -> Element {
    let field = field.into();
    Component::new(name, move |c| {
        Ok(c.invoke(field.as_str(), ContinuationArgs::from(args.clone()))?)
    })
    .into()
}

/// Calls `field` once per value and renders every branch side by side.
pub fn fan_out(field: impl Into<FieldName>, values: Vec<Value>) -> Element {
    let field = field.into();
    Component::new("FanOut", move |c| {
        let callback = c.callback_prop(field.as_str())?;
        Ok(Element::Fragment(
            values.iter().cloned().map(|v| callback.call_one(v)).collect(),
        ))
    })
    .into()
}

/// Renders without ever calling back.
pub fn silent(name: &str) -> Element {
    Component::new(name, |_| Ok(Element::text("waiting"))).into()
}

/// Does nothing but render, so its `results` prop can be inspected.
pub fn inspector(results: &ResultsSequence<Value>) -> Element {
    let results = serde_json::to_value(results).unwrap_or(Value::Null);
    Component::new("MyComponent", |_| Ok(Element::text("Inspect my props!")))
        .prop("results", results)
        .into()
}

/// Aggregator that hands the results to [`inspector`].
pub fn inspect_results() -> impl Fn(ResultsSequence<Value>) -> Element + Send + Sync + 'static {
    |results| inspector(&results)
}
