use thiserror::Error;

/// Errors raised while building or resolving a wing assembly. Degenerate interpolations,
/// out-of-range span positions and unbound hinges are not errors and never show up here.
#[derive(Debug, Error)]
pub enum WingError {
    /// A control pattern references a segment whose inner or outer hinge does not exist on the
    /// named control surface.
    #[error(
        "control '{pattern}' references segment {segment} of '{surface}', which has only {available} hinge points"
    )]
    MalformedReference {
        pattern: String,
        surface: String,
        segment: usize,
        available: usize,
    },

    /// A control surface names a wing that is not part of the assembly.
    #[error("control surface '{surface}' references unknown wing '{wing}'")]
    UnknownWing { surface: String, wing: String },

    #[error("wing name '{0}' is used more than once")]
    DuplicateWing(String),

    #[error("wing '{wing}' has no sections")]
    EmptyWing { wing: String },

    /// The authored sections of a wing change direction in span coordinate.
    #[error("sections of wing '{wing}' are not ordered by span coordinate")]
    UnsortedSections { wing: String },

    #[error("invalid airfoil points in section '{section}': {reason}")]
    InvalidProfile { section: String, reason: String },

    #[error("cannot parse participation id '{0}'")]
    InvalidSegmentId(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl WingError {
    pub(crate) fn invalid_profile(section: &str, reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            section: section.to_string(),
            reason: reason.into(),
        }
    }
}
