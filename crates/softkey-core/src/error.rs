use std::fmt;

/// Misuse of the scoped keyboard provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// A keyboard accessor ran outside every `KeyboardProvider::provide` scope.
    NoProvider { accessor: &'static str },
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::NoProvider { accessor } => {
                write!(f, "{accessor} must be used within a KeyboardProvider")
            }
        }
    }
}

impl std::error::Error for ContextError {}
