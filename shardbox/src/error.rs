//! Error type shared by the parser, serializer, pool and stores.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Rust uses `Result<T, E>` instead of exceptions. `thiserror` writes the
//! `Display` and `std::error::Error` impls for us from the `#[error]`
//! attributes, so each variant reads like the message it prints.

/// Shorthand used throughout the crate.
pub type ShardResult<T> = Result<T, ShardError>;

#[derive(thiserror::Error, Debug)]
pub enum ShardError {
    /// Missing or malformed document root.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The root element has no usable `viewBox`.
    #[error("{}", missing_view_box_message(.found))]
    MissingViewBox { found: Option<String> },

    /// Curve or arc path data (`C`, `S`, `Q`, `T`, `A`).
    #[error("unsupported path command '{0}': only M, L, H, V and Z are supported")]
    UnsupportedCommand(char),

    /// The hosting environment has no container with this id.
    #[error("container #{0} not found")]
    ContainerMissing(String),

    #[error("scene json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn missing_view_box_message(found: &Option<String>) -> String {
    match found {
        None => "SVG element missing viewBox attribute".to_string(),
        Some(value) => format!("SVG element has an unusable viewBox \"{}\"", value),
    }
}

impl ShardError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn bad_view_box(value: impl Into<String>) -> Self {
        Self::MissingViewBox { found: Some(value.into()) }
    }
}
