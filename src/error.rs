use crate::report::Diagnostic;

#[derive(thiserror::Error, Debug)]
pub enum LintError {
  /// A diagnostic raised while the throw policy is active.
  #[error(transparent)]
  Diagnostic(#[from] Diagnostic),

  #[error("invalid configuration: {0}")]
  Config(#[from] serde_json::Error),
}

impl LintError {
  pub fn as_diagnostic(&self) -> Option<&Diagnostic> {
    match self {
      Self::Diagnostic(diagnostic) => Some(diagnostic),
      Self::Config(_) => None,
    }
  }
}
