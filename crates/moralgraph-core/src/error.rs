use std::fmt;

/// Machine-readable error codes for graph construction and loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DuplicateVertex,
    UnknownVertex,
    MalformedInput,
    InputUnreadable,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DuplicateVertex => "E1001",
            Self::UnknownVertex => "E1002",
            Self::MalformedInput => "E2001",
            Self::InputUnreadable => "E2002",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::DuplicateVertex => "Vertex already exists",
            Self::UnknownVertex => "Vertex not found",
            Self::MalformedInput => "Malformed graph description",
            Self::InputUnreadable => "Graph description could not be read",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::DuplicateVertex => Some("Vertex names must be unique within a graph."),
            Self::UnknownVertex => {
                Some("Declare a vertex before any other vertex references it.")
            }
            Self::MalformedInput => Some("Every vertex and neighbor entry needs a `name`."),
            Self::InputUnreadable => Some("Check the path and that the file is valid JSON."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failures raised by graph mutators.
///
/// Removal of an absent vertex or edge is not an error; only insertions
/// validate their arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The vertex name is already present.
    #[error("graph already contains vertex `{0}`")]
    DuplicateVertex(String),

    /// An edge or neighbor map references a vertex that does not exist.
    #[error("graph does not contain vertex `{0}`")]
    UnknownVertex(String),

    /// Input is structurally invalid (missing field, mismatched lengths).
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl GraphError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateVertex(_) => ErrorCode::DuplicateVertex,
            Self::UnknownVertex(_) => ErrorCode::UnknownVertex,
            Self::MalformedInput(_) => ErrorCode::MalformedInput,
        }
    }

    /// Optional remediation hint for operators.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

/// Errors from reading a graph description.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read graph description: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse graph description: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl LoadError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) | Self::Json(_) => ErrorCode::InputUnreadable,
            Self::Graph(err) => err.code(),
        }
    }
}
