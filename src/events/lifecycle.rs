//! Lifecycle notifications emitted by [`Lifecycle`](crate::entity::Lifecycle).

/// Payload for the killed/revived notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    /// Name of the entity whose lifecycle changed.
    pub name: String,
}
