//! # Renderer: Activating Elements
//!
//! The renderer is the host side of a chain. Mounting a component runs its
//! render function, which is where producers call the continuation attached
//! to them; whatever that returns is mounted next.

use crate::element::Element;
use crate::error::RenderError;
use crate::mounted::{Mounted, MountedComponent};
use cascade_core::{Composer, ConfigError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ENV_MAX_DEPTH: &str = "CASCADE_MAX_DEPTH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Deepest nesting the renderer will activate before giving up.
    pub max_depth: usize,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

impl RendererConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_MAX_DEPTH) {
            config.max_depth = raw.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{ENV_MAX_DEPTH} must be a positive integer, got `{raw}`"))
            })?;
        }
        if config.max_depth == 0 {
            return Err(ConfigError::Invalid(format!("{ENV_MAX_DEPTH} must be at least 1")));
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Activate `element` and everything it renders.
    pub fn mount(&self, element: &Element) -> Result<Mounted, RenderError> {
        self.mount_at(element, 0)
    }

    /// Build `composer` and mount the result. A composer without an
    /// aggregator mounts as [`Mounted::Empty`].
    pub fn render(&self, composer: &Composer<Value, Element>) -> Result<Mounted, RenderError> {
        let root = composer.build().unwrap_or_default();
        self.mount(&root)
    }

    fn mount_at(&self, element: &Element, depth: usize) -> Result<Mounted, RenderError> {
        if depth > self.config.max_depth {
            return Err(RenderError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }

        match element {
            Element::Empty => Ok(Mounted::Empty),
            Element::Text(text) => Ok(Mounted::Text { text: text.clone() }),
            Element::Fragment(children) => children
                .iter()
                .map(|child| self.mount_at(child, depth + 1))
                .collect::<Result<Vec<_>, _>>()
                .map(|children| Mounted::Fragment { children }),
            Element::Component(component) => {
                let span = tracing::debug_span!(
                    "Component",
                    cascade.component = %component.name(),
                    depth
                );
                let _guard = span.enter();

                let rendered = component.render().map_err(|source| {
                    // Prop errors raised through `?` keep their own shape.
                    match source.downcast::<RenderError>() {
                        Ok(err) => err,
                        Err(source) => RenderError::Component {
                            name: component.name().to_string(),
                            source,
                        },
                    }
                })?;
                tracing::trace!(rendered = rendered.kind(), "Component rendered");

                let child = self.mount_at(&rendered, depth + 1)?;
                let (props, callbacks) = component.props().snapshot();
                Ok(Mounted::Component(MountedComponent {
                    name: component.name().to_string(),
                    props,
                    callbacks,
                    child: Box::new(child),
                }))
            }
        }
    }
}
