pub mod element;
pub mod error;
pub mod mounted;
pub mod renderer;

pub mod prelude {
    pub use crate::element::{Callback, Component, Element, Prop, Props};
    pub use crate::error::RenderError;
    pub use crate::mounted::{Mounted, MountedComponent};
    pub use crate::renderer::{Renderer, RendererConfig};
}

pub use element::{Callback, Component, Element, Prop, Props};
pub use error::RenderError;
pub use mounted::{Mounted, MountedComponent};
pub use renderer::{Renderer, RendererConfig};

/// A composer whose units are host elements.
pub type ElementComposer = cascade_core::Composer<serde_json::Value, Element>;
