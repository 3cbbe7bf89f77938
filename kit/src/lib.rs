//! Cascade facade crate.
//!
//! Re-exports the core chain builder and, with the default `runtime`
//! feature, the in-memory host renderer under a single entry point.

pub use cascade_core as core;
#[cfg(feature = "runtime")]
pub use cascade_runtime as runtime;

pub use cascade_core::{
    Attach, Composer, ComposerConfig, Continuation, ContinuationArgs, FieldName, Produced,
    ProducerUnit, ResultsSequence, Schematic, compose,
};
#[cfg(feature = "runtime")]
pub use cascade_runtime::{Component, Element, ElementComposer, Mounted, Renderer};

pub mod prelude {
    pub use cascade_core::prelude::*;
    #[cfg(feature = "runtime")]
    pub use cascade_runtime::prelude::*;
}
