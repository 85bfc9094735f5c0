//! # Error Types
//!
//! Absence is not an error: reads, removals and destroys on dead entities
//! return empty results. Only writes into a dead entity and config loading
//! can fail.

use thiserror::Error;

use crate::ecs::EntityId;

/// Errors that can occur in the entity component store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// Attempted to attach a component to an entity that is not live.
    ///
    /// Accepting the write would leave data in a free slot for the next
    /// unrelated entity to inherit.
    #[error("cannot set component \"{component}\" for dead entity {entity}")]
    DeadEntity {
        /// Name of the component type.
        component: &'static str,
        /// The dead entity.
        entity: EntityId,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(String),
}

/// Result type for store operations.
pub type EcsResult<T> = Result<T, EcsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_entity_message() {
        let err = EcsError::DeadEntity {
            component: "Position",
            entity: EntityId::new(0, 0),
        };
        assert_eq!(
            err.to_string(),
            "cannot set component \"Position\" for dead entity 0"
        );
    }
}
