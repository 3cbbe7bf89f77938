use cascade::prelude::*;
use cascade_test::{
    Recorder, assert_tree_path, double_echo, echo, echo_render_prop, echo_under, emit, fan_out,
    inspect_results, inspector, render, silent,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

type Results = ResultsSequence<Value>;

fn value_of(results: &Results, index: usize) -> String {
    results
        .single(index)
        .and_then(|r| r["value"].as_str())
        .unwrap_or_default()
        .to_string()
}

#[test]
fn no_units_renders_the_aggregator_output() {
    let recorder: Recorder<Results> = Recorder::new();
    let composer = Composer::<Value, Element>::new()
        .aggregator(recorder.aggregator(|_| Element::text("Sandwiches")));

    let tree = render(&composer);

    assert!(tree.contains_text("Sandwiches"));
    assert_eq!(recorder.call_count(), 1);
    assert!(recorder.last().unwrap().is_empty());
}

#[test]
fn one_unit_passes_its_value_through() {
    let recorder: Recorder<Results> = Recorder::new();
    let composer = Composer::new()
        .bound(echo("spaghetti"))
        .aggregator(recorder.aggregator(|results| Element::text(value_of(results, 0))));

    let tree = render(&composer);

    assert_eq!(tree.text(), "spaghetti");
    assert_eq!(recorder.call_count(), 1);
    let results = serde_json::to_value(recorder.last().unwrap()).unwrap();
    assert_eq!(results, json!([{ "value": "spaghetti" }]));
}

#[test]
fn two_units_keep_input_order() {
    let recorder: Recorder<Results> = Recorder::new();
    let composer = Composer::new()
        .bound(echo("spaghetti"))
        .bound(echo("pls"))
        .aggregator(recorder.aggregator(|results| {
            Element::text(format!("{} {}", value_of(results, 0), value_of(results, 1)))
        }));

    let tree = render(&composer);

    assert_eq!(tree.text(), "spaghetti pls");
    assert_eq!(recorder.call_count(), 1);
    let results = serde_json::to_value(recorder.last().unwrap()).unwrap();
    assert_eq!(results, json!([{ "value": "spaghetti" }, { "value": "pls" }]));
}

#[test]
fn first_unit_is_outermost() {
    let composer = Composer::new()
        .bound(emit("Outer", FieldName::Children, vec![json!("Outer result")]))
        .bound(emit("Middle", FieldName::Children, vec![json!("Middle result")]))
        .bound(emit("Inner", FieldName::Children, vec![json!("Inner result")]))
        .aggregator(inspect_results());

    let tree = render(&composer);

    assert_tree_path!(tree, ["Outer", "Middle"]);
    assert_tree_path!(tree, ["Outer", "Middle", "Inner"]);
    assert_tree_path!(tree, ["Outer", "Middle", "Inner", "MyComponent"]);
    assert!(!tree.has_path(&["Inner", "Outer"]));

    let inspected = tree.first("MyComponent").unwrap();
    assert_eq!(
        inspected.prop("results"),
        Some(&json!(["Outer result", "Middle result", "Inner result"]))
    );
}

#[test]
fn factories_build_from_earlier_results() {
    let composer = Composer::new()
        .bound(echo("outer"))
        .factory(|results: &Results| echo(format!("{} + middle", value_of(results, 0))))
        .factory(|results: &Results| echo(format!("{} + inner", value_of(results, 1))))
        .aggregator(inspect_results());

    let tree = render(&composer);

    assert_eq!(tree.find("Echo").len(), 3);
    let outer = tree.as_component().unwrap();
    assert_eq!(outer.prop("value"), Some(&json!("outer")));
    let middle = outer.child_at(0).unwrap();
    assert_eq!(middle.prop("value"), Some(&json!("outer + middle")));
    let inner = middle.child_at(0).unwrap();
    assert_eq!(inner.prop("value"), Some(&json!("outer + middle + inner")));

    assert_eq!(
        tree.first("MyComponent").unwrap().prop("results"),
        Some(&json!([
            { "value": "outer" },
            { "value": "outer + middle" },
            { "value": "outer + middle + inner" }
        ]))
    );
}

#[test]
fn factory_sees_exactly_the_prefix() {
    let seen = Recorder::<usize>::new();
    let mut composer = Composer::new();
    for _ in 0..4 {
        let seen = seen.clone();
        composer = composer.factory(move |results: &Results| {
            seen.record(results.len());
            echo(results.len())
        });
    }
    let tree = render(&composer.aggregator(inspect_results()));

    assert_eq!(seen.calls(), vec![0, 1, 2, 3]);
    assert_eq!(
        tree.first("MyComponent").unwrap().prop("results"),
        Some(&json!([{ "value": 0 }, { "value": 1 }, { "value": 2 }, { "value": 3 }]))
    );
}

#[test]
fn units_can_use_different_field_names() {
    let composer = Composer::new()
        .bound(echo("one"))
        .unit_with_field(ProducerUnit::bound(echo_render_prop("two")), "renderProp")
        .aggregator(inspect_results());

    let tree = render(&composer);

    assert_eq!(
        tree.first("MyComponent").unwrap().prop("results"),
        Some(&json!([{ "value": "one" }, { "value": "two" }]))
    );
}

#[test]
fn multi_argument_producers_become_tuples() {
    let composer = Composer::new()
        .bound(echo("one"))
        .bound(double_echo("two"))
        .aggregator(inspect_results());

    let tree = render(&composer);

    assert_eq!(
        tree.first("MyComponent").unwrap().prop("results"),
        Some(&json!([{ "value": "one" }, ["two", "TWO"]]))
    );
}

#[test]
fn mapper_transforms_raw_arguments() {
    let composer = Composer::new()
        .bound(emit("Pair", FieldName::Children, vec![json!("spaghetti"), json!("SPAGHETTI")]))
        .bound(emit("Single", FieldName::Children, vec![json!("spaghetti")]))
        .bound(emit("Nothing", FieldName::Children, vec![]))
        .mapper(|args: ContinuationArgs<Value>| {
            if args.len() == 1 {
                Produced::from_args(args)
            } else {
                Produced::Tuple(args.into_vec())
            }
        })
        .aggregator(inspect_results());

    let tree = render(&composer);

    assert_eq!(
        tree.first("MyComponent").unwrap().prop("results"),
        Some(&json!([["spaghetti", "SPAGHETTI"], "spaghetti", []]))
    );
}

#[test]
fn mapper_can_rewrite_values() {
    let composer = Composer::new()
        .bound(echo("quiet"))
        .mapper(|args: ContinuationArgs<Value>| {
            Produced::from_args(args).map(|v| json!(v["value"].as_str().unwrap_or_default().to_uppercase()))
        })
        .aggregator(inspect_results());

    let tree = render(&composer);
    assert_eq!(
        tree.first("MyComponent").unwrap().prop("results"),
        Some(&json!(["QUIET"]))
    );
}

#[test]
fn refiring_a_continuation_forks_the_chain() {
    let recorder: Recorder<Results> = Recorder::new();
    let composer = Composer::new()
        .bound(fan_out(FieldName::Children, vec![json!("left"), json!("right")]))
        .bound(echo("tail"))
        .aggregator(recorder.aggregator(inspector));

    let tree = render(&composer);

    let inspected: Vec<_> = tree
        .find("MyComponent")
        .into_iter()
        .map(|c| c.prop("results").cloned().unwrap())
        .collect();
    assert_eq!(
        inspected,
        vec![
            json!(["left", { "value": "tail" }]),
            json!(["right", { "value": "tail" }])
        ]
    );
    assert_eq!(recorder.call_count(), 2);
    assert!(recorder.calls().iter().all(|results| results.len() == 2));
}

#[test]
fn custom_field_name_must_be_used_by_producers() {
    let matching = Composer::new()
        .field("render")
        .bound(echo_under("render", "a"))
        .bound(echo_under("render", "b"))
        .aggregator(inspect_results());
    let tree = render(&matching);
    assert_eq!(
        tree.first("MyComponent").unwrap().prop("results"),
        Some(&json!([{ "value": "a" }, { "value": "b" }]))
    );
    assert!(tree.first("EchoRenderProp").unwrap().has_callback("render"));

    let mismatched = Composer::new()
        .field("render")
        .bound(echo("a"))
        .aggregator(inspect_results());
    let err = Renderer::new().render(&mismatched).unwrap_err();
    assert!(matches!(err, RenderError::MissingProp { ref prop, .. } if prop == "children"));
}

#[test]
fn silent_producer_stalls_the_chain() {
    let recorder: Recorder<Results> = Recorder::new();
    let later = Arc::new(AtomicUsize::new(0));
    let counter = later.clone();
    let composer = Composer::new()
        .bound(echo("first"))
        .bound(silent("Pending"))
        .factory(move |_: &Results| {
            counter.fetch_add(1, Ordering::SeqCst);
            echo("never")
        })
        .aggregator(recorder.aggregator(inspector));

    let tree = render(&composer);

    assert_tree_path!(tree, ["Echo", "Pending"]);
    assert!(tree.first("MyComponent").is_none());
    assert_eq!(recorder.call_count(), 0);
    assert_eq!(later.load(Ordering::SeqCst), 0);
}

#[test]
fn missing_aggregator_renders_nothing() {
    let composer = Composer::<Value, Element>::new().bound(echo("unused"));
    assert_eq!(render(&composer), Mounted::Empty);
}

#[test]
fn every_render_starts_fresh() {
    let recorder: Recorder<Results> = Recorder::new();
    let composer = Composer::new()
        .bound(echo("again"))
        .aggregator(recorder.aggregator(inspector));

    let first = render(&composer);
    let second = render(&composer);

    assert_eq!(first, second);
    assert_eq!(recorder.call_count(), 2);
    assert!(recorder.calls().iter().all(|results| results.len() == 1));
}

#[test]
fn composer_from_config() {
    let config = ComposerConfig::from_toml_str(
        r#"
        name = "profile"
        continuation_field = "render"
        "#,
    )
    .unwrap();
    let composer = Composer::from_config(&config)
        .bound(echo_under("render", "configured"))
        .aggregator(inspect_results());

    let tree = render(&composer);
    assert_eq!(
        tree.first("MyComponent").unwrap().prop("results"),
        Some(&json!([{ "value": "configured" }]))
    );

    let schematic = composer.schematic().to_json();
    assert_eq!(schematic["name"], json!("profile"));
    assert_eq!(schematic["field"], json!("render"));
    assert_eq!(schematic["nodes"].as_array().unwrap().len(), 3);
}

#[test]
fn compose_matches_the_builder() {
    let units = vec![ProducerUnit::bound(echo("x")), ProducerUnit::bound(echo("y"))];
    let aggregator: Aggregator<Value, Element> = Arc::new(inspect_results());
    let root = compose(units, Some(aggregator), FieldName::Children, None).unwrap();

    let tree = Renderer::new().mount(&root).unwrap();
    assert_eq!(
        tree.first("MyComponent").unwrap().prop("results"),
        Some(&json!([{ "value": "x" }, { "value": "y" }]))
    );
}
