//! Cascade Core - Sequential Continuation Aggregation
//!
//! This crate holds the renderer-agnostic part of Cascade:
//! - `Composer`: builds a nested chain out of ordered producer units
//! - `Continuation` / `Attach`: how a chain hooks into a host's nodes
//! - `ResultsSequence`: the persistent, ordered results handed to the aggregator
//!
//! **IMPORTANT**: This layer is synchronous and knows nothing about any
//! particular renderer.

pub mod chain;
pub mod config;
pub mod continuation;
pub mod field;
pub mod results;
pub mod schematic;
pub mod telemetry;
pub mod unit;

pub use chain::{Aggregator, Composer, compose};
pub use config::{ComposerConfig, ConfigError};
pub use continuation::{Attach, Continuation};
pub use field::FieldName;
pub use results::{ContinuationArgs, Mapper, Produced, ResultsSequence};
pub use schematic::Schematic;
pub use unit::{Factory, ProducerUnit, UnitKind};

pub mod prelude {
    pub use crate::chain::{Aggregator, Composer, compose};
    pub use crate::config::ComposerConfig;
    pub use crate::continuation::{Attach, Continuation};
    pub use crate::field::FieldName;
    pub use crate::results::{ContinuationArgs, Produced, ResultsSequence};
    pub use crate::unit::ProducerUnit;
}
