//! Instance world - templates and live instance records
//!
//! The pooling core never owns rendering or physics state; it drives an
//! instance store through the [`InstanceHost`] boundary. [`InstanceWorld`] is
//! the in-memory realization of that boundary: templates and instance records
//! held in slot maps, addressed by typed handles. A host engine can substitute
//! its own [`InstanceHost`] implementation without touching the pools.

pub mod host;
pub mod instance;

pub use host::InstanceHost;
pub use instance::{
    InstanceHandle, InstanceRecord, SpawnHook, TemplateDescriptor, TemplateHandle,
};

use crate::foundation::collections::HandleMap;
use crate::foundation::math::{Quat, Vec3};
use crate::pool::PoolError;

/// Owned store of templates and live instances
///
/// Exclusively mutated through its own methods and the [`InstanceHost`]
/// surface; pooling code never reaches into the maps directly.
pub struct InstanceWorld {
    templates: HandleMap<TemplateDescriptor>,
    instances: HandleMap<InstanceRecord>,
}

impl InstanceWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self {
            templates: HandleMap::new(),
            instances: HandleMap::new(),
        }
    }

    /// Register a template and return its handle
    pub fn register_template(&mut self, descriptor: TemplateDescriptor) -> TemplateHandle {
        let key = self.templates.insert(descriptor);
        TemplateHandle::new(key)
    }

    /// Look up a template by handle
    pub fn template(&self, handle: TemplateHandle) -> Option<&TemplateDescriptor> {
        self.templates.get(handle.key())
    }

    /// Find a template handle by its registered name
    pub fn find_template(&self, name: &str) -> Option<TemplateHandle> {
        self.templates
            .iter()
            .find(|(_, descriptor)| descriptor.name() == name)
            .map(|(key, _)| TemplateHandle::new(key))
    }

    /// Check whether a template handle is still valid
    pub fn contains_template(&self, handle: TemplateHandle) -> bool {
        self.templates.contains_key(handle.key())
    }

    /// Look up an instance record by handle
    pub fn instance(&self, handle: InstanceHandle) -> Option<&InstanceRecord> {
        self.instances.get(handle.key())
    }

    /// Look up an instance record mutably
    pub fn instance_mut(&mut self, handle: InstanceHandle) -> Option<&mut InstanceRecord> {
        self.instances.get_mut(handle.key())
    }

    /// Number of live instances
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Iterate over all live instances
    pub fn instances(&self) -> impl Iterator<Item = (InstanceHandle, &InstanceRecord)> {
        self.instances
            .iter()
            .map(|(key, record)| (InstanceHandle::new(key), record))
    }
}

impl Default for InstanceWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl InstanceHost for InstanceWorld {
    fn construct(&mut self, template: TemplateHandle) -> Result<InstanceHandle, PoolError> {
        let descriptor = self
            .templates
            .get(template.key())
            .ok_or(PoolError::InvalidTemplate)?;
        let record = InstanceRecord::from_template(template, descriptor);
        let key = self.instances.insert(record);
        Ok(InstanceHandle::new(key))
    }

    fn destroy(&mut self, instance: InstanceHandle) {
        if self.instances.remove(instance.key()).is_none() {
            log::debug!("destroy called on stale instance handle {instance:?}");
        }
    }

    fn set_active(&mut self, instance: InstanceHandle, active: bool) {
        if let Some(record) = self.instances.get_mut(instance.key()) {
            record.active = active;
        }
    }

    fn set_placement(&mut self, instance: InstanceHandle, position: Vec3, rotation: Quat) {
        if let Some(record) = self.instances.get_mut(instance.key()) {
            record.placement.set_pose(position, rotation);
        }
    }

    fn notify_spawn(&mut self, instance: InstanceHandle) {
        let hook = self
            .instances
            .get(instance.key())
            .and_then(|record| self.templates.get(record.template().key()))
            .and_then(TemplateDescriptor::spawn_hook);
        if let Some(hook) = hook {
            (hook.as_ref())(instance);
        }
    }
}
