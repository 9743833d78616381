/*!
 * Core Types
 * Common types used across the runtime
 */

/// Stable index of an execution context, fixed at creation
pub type ContextId = usize;

/// Element type of the arrays sorted by the pipeline
pub type Value = i64;

/// Common result type for runtime operations
pub type RuntimeResult<T> = Result<T, super::errors::RuntimeError>;
