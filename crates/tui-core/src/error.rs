//! Error types for tui-core.

use std::io;

/// Error type for tui-core operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TuiError {
    /// I/O error talking to the terminal device.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Terminal setup/teardown operation failed (raw mode, alternate screen, ...).
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Layout calculation failed for a reason other than an unsatisfiable
    /// constraint set (e.g. malformed input).
    #[error("layout error: {0}")]
    Layout(String),

    /// Style construction or parsing error.
    #[error("style error: {0}")]
    Style(String),

    /// Rendering failed while translating a diff into backend writes.
    #[error("render error: {0}")]
    Render(String),

    /// Unicode/grapheme handling error.
    #[error("unicode error: {0}")]
    Unicode(String),

    /// A backend I/O operation failed (distinct from [`TuiError::Io`] so
    /// callers can tell terminal-write failures apart from filesystem ones).
    #[error("backend I/O error: {0}")]
    BackendIo(String),

    /// A constraint set has no feasible solution.
    #[error("unsatisfiable constraint: {0}")]
    UnsatisfiableConstraint(String),

    /// The same constraint was added to a solver twice.
    #[error("duplicate constraint: {0}")]
    DuplicateConstraint(String),

    /// A constraint was removed that the solver does not know about.
    #[error("unknown constraint: {0}")]
    UnknownConstraint(String),

    /// The simplex solver reached an internally inconsistent state.
    #[error("internal solver error: {0}")]
    InternalSolverError(String),

    /// A render-thread-affine operation (solver, buffer, cache) was invoked
    /// from a thread other than the one that owns it.
    #[error("wrong thread: {0}")]
    WrongThreadError(String),

    /// A structural invariant was violated (e.g. diffing buffers of
    /// mismatched size).
    #[error("invariant violated: {0}")]
    InvariantError(String),

    /// Exact-rational arithmetic overflowed or divided by zero.
    #[error("arithmetic error: {0}")]
    ArithmeticError(String),

    /// Internal error not covered by a more specific variant.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for tui-core operations.
pub type Result<T> = std::result::Result<T, TuiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TuiError::Terminal("no tty".into());
        assert_eq!(err.to_string(), "terminal error: no tty");
    }

    #[test]
    fn io_error_converts() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: TuiError = io_err.into();
        assert!(matches!(err, TuiError::Io(_)));
    }

    #[test]
    fn unsatisfiable_constraint_display() {
        let err = TuiError::UnsatisfiableConstraint("width >= 200 && width <= 10".into());
        assert!(err.to_string().contains("unsatisfiable"));
    }

    #[test]
    fn wrong_thread_display() {
        let err = TuiError::WrongThreadError("solver accessed off render thread".into());
        assert!(err.to_string().contains("wrong thread"));
    }
}
