//! Pool expansion step
//!
//! Turns declarative [`PoolDefinition`]s into live instances, in bulk. All
//! creation and tagging for a tick lands in a single command buffer applied
//! once at step end, so no other step observes a half-expanded pool.

use super::command_buffer::CommandBuffer;
use super::definition::PoolDefinition;
use super::PoolError;
use crate::foundation::collections::{DefaultKey, HandleMap};
use crate::world::InstanceWorld;

/// What one expansion run produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionReport {
    /// Definitions expanded this tick
    pub pools_expanded: usize,

    /// Instances created this tick
    pub instances_created: usize,
}

/// Batch-instantiates every unconsumed pool definition
///
/// Each new instance receives its template back-reference and default
/// placement at construction, plus the pooled and activation markers through
/// the batch. Definitions are marked consumed only after the batch commits,
/// so a failed apply leaves them eligible for retry; a committed definition
/// is never expanded again (see [`PoolDefinition::is_consumed`]).
pub struct PoolExpansionSystem;

impl PoolExpansionSystem {
    /// Run the step once over the definition table
    pub fn run(
        definitions: &mut HandleMap<PoolDefinition>,
        world: &mut InstanceWorld,
    ) -> Result<ExpansionReport, PoolError> {
        let mut buffer = CommandBuffer::new();
        let mut expanded: Vec<DefaultKey> = Vec::new();

        for (key, definition) in definitions.iter() {
            if definition.is_consumed() {
                continue;
            }
            for _ in 0..definition.capacity {
                let pending = buffer.instantiate(definition.template);
                buffer.set_pooled(pending, true);
                buffer.set_needs_init(pending, true);
            }
            expanded.push(key);
        }

        let created = buffer.apply(world)?;
        for key in &expanded {
            definitions[*key].mark_consumed();
        }

        let report = ExpansionReport {
            pools_expanded: expanded.len(),
            instances_created: created.len(),
        };
        if report.pools_expanded > 0 {
            log::debug!(
                "expanded {} pool definition(s) into {} instance(s)",
                report.pools_expanded,
                report.instances_created
            );
        }
        Ok(report)
    }
}
