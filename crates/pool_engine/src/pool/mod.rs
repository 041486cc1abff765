//! Object pooling strategies
//!
//! Two strategies share one contract (pre-allocate, recycle, never destroy
//! during steady state) with different structural realizations:
//!
//! - [`QueuePoolManager`] - tag-keyed fixed-capacity circular queues with
//!   O(1) round-robin acquire
//! - [`BulkEntityPool`] - declarative pool definitions expanded and activated
//!   through deferred command batches, for very large instance counts

pub mod activation;
pub mod bulk;
pub mod command_buffer;
pub mod definition;
pub mod expansion;
pub mod queue;

#[cfg(test)]
mod tests;

pub use activation::ActivationSystem;
pub use bulk::{BulkEntityPool, TickReport};
pub use command_buffer::{CommandBuffer, PendingInstance};
pub use definition::{PoolDefinition, PoolDefinitionHandle};
pub use expansion::{ExpansionReport, PoolExpansionSystem};
pub use queue::{PoolSpec, PoolStats, QueuePoolManager};

/// Pooling errors
///
/// Configuration-time failures surface here and halt setup. Steady-state
/// misses (unknown tag on acquire) are not errors: they log a warning and
/// return `None` so callers can branch without error handling.
#[derive(thiserror::Error, Debug)]
pub enum PoolError {
    /// A pool tag was configured twice
    #[error("duplicate pool tag '{0}'")]
    DuplicateTag(String),

    /// A template handle did not resolve to a registered template
    #[error("template handle does not resolve to a registered template")]
    InvalidTemplate,

    /// A pool was declared with zero capacity
    #[error("pool '{0}' declared with zero capacity")]
    ZeroCapacity(String),

    /// A config entry named a template the world does not know
    #[error("config references unknown template '{0}'")]
    UnknownTemplateName(String),
}
