//! Test utilities for Cascade chains.
//!
//! - fixture producers (`echo`, `double_echo`, `silent`, ...)
//! - `Recorder`, a shared call log usable as an aggregator
//! - `mount` / `render` shortcuts and the `assert_tree_path!` macro

pub mod fixtures;
pub mod recorder;

pub use fixtures::*;
pub use recorder::Recorder;

use cascade_runtime::{ElementComposer, Element, Mounted, Renderer};

/// Mount `element` with a default renderer, panicking on render errors.
pub fn mount(element: &Element) -> Mounted {
    Renderer::new()
        .mount(element)
        .unwrap_or_else(|err| panic!("render failed: {err}"))
}

/// Build and mount `composer`, panicking on render errors.
pub fn render(composer: &ElementComposer) -> Mounted {
    Renderer::new()
        .render(composer)
        .unwrap_or_else(|err| panic!("render failed: {err}"))
}

/// Assert that components are nested in the given order.
///
/// ```rust,ignore
/// assert_tree_path!(tree, ["Outer", "Middle", "Inner"]);
/// ```
#[macro_export]
macro_rules! assert_tree_path {
    ($tree:expr, [$($name:expr),+ $(,)?]) => {{
        let path: &[&str] = &[$($name),+];
        assert!(
            $tree.has_path(path),
            "Expected component tree: {}",
            path.join(" > ")
        );
    }};
}
