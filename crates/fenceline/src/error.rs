use thiserror::Error;

/// Errors surfaced to the interaction shell. Every variant is recoverable:
/// the shell reports it and the user adjusts their input; nothing here
/// should terminate the process beyond a nonzero exit.
#[derive(Error, Debug)]
pub enum FencelineError {
  /// A comparison was requested with inputs the cost model must not run on.
  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// An empty or whitespace-only question. Rejected shell-side so blank
  /// text never reaches the embedding provider.
  #[error("question is empty; type a few words about virtual fencing")]
  EmptyQuery,

  /// The embedding provider failed to produce a vector.
  #[error("embedding provider failed: {0}")]
  Embedding(String),
}
