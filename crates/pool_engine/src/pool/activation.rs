//! Instance activation step
//!
//! Gives every freshly created instance a concrete default state. Scans for
//! the activation marker, batches a placement reset per marked instance, and
//! commits once at step end.
//!
//! Documented default: position zero, rotation identity, scale preserved.
//! The step also clears the marker, so an instance is initialized exactly
//! once per creation; subsequent ticks leave its placement alone.

use super::command_buffer::CommandBuffer;
use super::PoolError;
use crate::foundation::math::{Quat, Vec3};
use crate::world::{InstanceHandle, InstanceWorld};

/// Batch-initializes instances bearing the activation marker
pub struct ActivationSystem;

impl ActivationSystem {
    /// Run the step once; returns how many instances were initialized
    pub fn run(world: &mut InstanceWorld) -> Result<usize, PoolError> {
        let marked: Vec<InstanceHandle> = world
            .instances()
            .filter(|(_, record)| record.needs_init)
            .map(|(handle, _)| handle)
            .collect();

        let mut buffer = CommandBuffer::new();
        for &handle in &marked {
            buffer.set_placement(handle, Vec3::zeros(), Quat::identity());
            buffer.set_needs_init(handle, false);
        }
        buffer.apply(world)?;

        if !marked.is_empty() {
            log::debug!("activated {} pooled instance(s)", marked.len());
        }
        Ok(marked.len())
    }
}
