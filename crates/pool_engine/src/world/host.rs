//! Host boundary consumed by the pooling core

use super::instance::{InstanceHandle, TemplateHandle};
use crate::foundation::math::{Quat, Vec3};
use crate::pool::PoolError;

/// Boundary trait for constructing and manipulating pooled instances
///
/// [`InstanceWorld`](super::InstanceWorld) implements this in-memory; a host
/// engine wires it to its own entity store instead. Pools only ever touch
/// instances through this surface.
pub trait InstanceHost {
    /// Construct a new inactive instance from a template
    fn construct(&mut self, template: TemplateHandle) -> Result<InstanceHandle, PoolError>;

    /// Destroy an instance (pool teardown only; never during acquire cycles)
    fn destroy(&mut self, instance: InstanceHandle);

    /// Toggle an instance's active flag
    fn set_active(&mut self, instance: InstanceHandle, active: bool);

    /// Set an instance's position and rotation, preserving its scale
    fn set_placement(&mut self, instance: InstanceHandle, position: Vec3, rotation: Quat);

    /// Deliver the spawn notification if the instance's template registered one
    fn notify_spawn(&mut self, instance: InstanceHandle);
}
