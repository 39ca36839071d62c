#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An item unit references a bundle that does not exist in the working
    /// set. This signals a mapping bug or a stale/partial dataset upstream,
    /// not a user-facing condition, so it propagates as a hard failure.
    #[error("Bundle not found for unit {unit_id}: bundle {bundle_id}")]
    MissingBundle { unit_id: String, bundle_id: String },
}
