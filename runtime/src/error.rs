use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("component `{component}` has no prop `{prop}`")]
    MissingProp { component: String, prop: String },
    #[error("prop `{prop}` of component `{component}` is not callable")]
    NotCallable { component: String, prop: String },
    #[error("render depth exceeded the limit of {limit}")]
    DepthExceeded { limit: usize },
    #[error("component `{name}` failed to render: {source}")]
    Component {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

impl RenderError {
    pub fn missing_prop(component: impl Into<String>, prop: impl Into<String>) -> Self {
        RenderError::MissingProp {
            component: component.into(),
            prop: prop.into(),
        }
    }

    pub fn not_callable(component: impl Into<String>, prop: impl Into<String>) -> Self {
        RenderError::NotCallable {
            component: component.into(),
            prop: prop.into(),
        }
    }
}
