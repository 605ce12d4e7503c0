//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! missing bindings detected before a placement run, invalid configuration,
//! malformed surface data, and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("no surface bound: mesh or material is unset")]
    NoSurfaceBound,

    #[error("no prefab bound")]
    NoPrefabBound,

    #[error("no texture bound: material has no texture in any known property")]
    NoTextureBound,

    #[error("manual texture mode is active but no texture is set")]
    MissingManualTexture,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid surface: {0}")]
    InvalidSurface(String),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        matches!(err, Error::Other(_))
            .then_some(())
            .expect("expected Other variant");
    }

    #[test]
    fn from_str_allocates_owned_message() {
        let err: Error = "issue".into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "issue"));
    }

    #[test]
    fn binding_errors_render_stable_messages() {
        assert_eq!(
            Error::MissingManualTexture.to_string(),
            "manual texture mode is active but no texture is set"
        );
        assert_eq!(Error::NoPrefabBound.to_string(), "no prefab bound");
    }
}
