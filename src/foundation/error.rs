/// Convenience result type used across fractree.
pub type FractreeResult<T> = Result<T, FractreeError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum FractreeError {
    /// Invalid user-provided numeric or style input that could not be coerced.
    #[error("validation error: {0}")]
    Validation(String),

    /// A caller broke a documented contract (e.g. queried a layer outside a built style map).
    #[error("contract violation: {0}")]
    Contract(String),

    /// A style attribute name outside the fixed attribute set.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// An external resource (defaults document, bounds store file) failed to load or save.
    #[error("resource error: {0}")]
    Resource(String),

    /// Errors raised by a drawing surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors raised by the animation pacer.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FractreeError {
    /// Build a [`FractreeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FractreeError::Contract`] value.
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::Contract(msg.into())
    }

    /// Build a [`FractreeError::UnknownAttribute`] value.
    pub fn unknown_attribute(name: impl Into<String>) -> Self {
        Self::UnknownAttribute(name.into())
    }

    /// Build a [`FractreeError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`FractreeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FractreeError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`FractreeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for programming errors that must never occur in steady-state operation.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Contract(_) | Self::UnknownAttribute(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
