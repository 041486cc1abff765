//! # Bulk Entity Pool
//!
//! Data-oriented pooling for very large instance counts. Pools are declared
//! as lightweight [`PoolDefinition`] records; each tick the expansion step
//! batch-instantiates unconsumed definitions, then the activation step
//! batch-initializes the new instances. Step order is fixed: expansion's
//! batch is fully committed before activation begins, within the same tick.

use super::activation::ActivationSystem;
use super::definition::{PoolDefinition, PoolDefinitionHandle};
use super::expansion::{ExpansionReport, PoolExpansionSystem};
use super::PoolError;
use crate::foundation::collections::HandleMap;
use crate::world::{InstanceHandle, InstanceWorld, TemplateHandle};

/// What one tick of the bulk pool did
#[derive(Debug, Clone, Copy, Default)]
pub struct TickReport {
    /// Expansion step outcome
    pub expansion: ExpansionReport,

    /// Instances the activation step initialized
    pub instances_activated: usize,
}

/// Owner of pool definitions and the per-tick step driver
///
/// Plainly owned and passed by reference like [`QueuePoolManager`]; one bulk
/// pool per active scope, no global instance.
///
/// [`QueuePoolManager`]: super::QueuePoolManager
pub struct BulkEntityPool {
    definitions: HandleMap<PoolDefinition>,
    ticks: u64,
}

impl BulkEntityPool {
    /// Create a bulk pool with no definitions
    pub fn new() -> Self {
        Self {
            definitions: HandleMap::new(),
            ticks: 0,
        }
    }

    /// Declare a pool of `capacity` instances of `template`
    ///
    /// Fails fast on an unresolvable template or zero capacity; the expansion
    /// step assumes only valid definitions reach it.
    pub fn declare_pool(
        &mut self,
        world: &InstanceWorld,
        template: TemplateHandle,
        capacity: usize,
    ) -> Result<PoolDefinitionHandle, PoolError> {
        self.declare(world, template, capacity, None)
    }

    /// Declare a pool carrying a category label for diagnostics
    pub fn declare_tagged_pool(
        &mut self,
        world: &InstanceWorld,
        template: TemplateHandle,
        capacity: usize,
        tag: impl Into<String>,
    ) -> Result<PoolDefinitionHandle, PoolError> {
        self.declare(world, template, capacity, Some(tag.into()))
    }

    fn declare(
        &mut self,
        world: &InstanceWorld,
        template: TemplateHandle,
        capacity: usize,
        tag: Option<String>,
    ) -> Result<PoolDefinitionHandle, PoolError> {
        if !world.contains_template(template) {
            return Err(PoolError::InvalidTemplate);
        }
        if capacity == 0 {
            let label = tag.unwrap_or_else(|| "<untagged>".to_string());
            return Err(PoolError::ZeroCapacity(label));
        }
        let key = self
            .definitions
            .insert(PoolDefinition::new(template, capacity, tag));
        Ok(PoolDefinitionHandle::new(key))
    }

    /// Look up a declared definition
    pub fn definition(&self, handle: PoolDefinitionHandle) -> Option<&PoolDefinition> {
        self.definitions.get(handle.key())
    }

    /// Number of declared definitions, consumed or not
    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    /// Run one tick: expansion, then activation
    pub fn tick(&mut self, world: &mut InstanceWorld) -> Result<TickReport, PoolError> {
        let expansion = PoolExpansionSystem::run(&mut self.definitions, world)?;
        let instances_activated = ActivationSystem::run(world)?;
        self.ticks += 1;
        Ok(TickReport {
            expansion,
            instances_activated,
        })
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// All instances currently tagged as pooled, for external spawn triggers
    pub fn pooled_instances(&self, world: &InstanceWorld) -> Vec<InstanceHandle> {
        world
            .instances()
            .filter(|(_, record)| record.pooled)
            .map(|(handle, _)| handle)
            .collect()
    }
}

impl Default for BulkEntityPool {
    fn default() -> Self {
        Self::new()
    }
}
