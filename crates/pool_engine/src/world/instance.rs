//! Template descriptors and live instance records

use crate::foundation::collections::TypedHandle;
use crate::foundation::math::Transform;
use std::rc::Rc;

/// Handle to a registered template
pub type TemplateHandle = TypedHandle<TemplateDescriptor>;

/// Handle to a live instance
pub type InstanceHandle = TypedHandle<InstanceRecord>;

/// Callback fired when a pooled instance is (re)activated
pub type SpawnHook = Rc<dyn Fn(InstanceHandle)>;

/// Prototype from which pooled instances are constructed
///
/// The spawn hook is the activation-notification capability: templates that
/// register one get it invoked on every acquire of one of their instances.
/// Templates without a hook simply skip the notification.
pub struct TemplateDescriptor {
    name: String,

    /// Placement copied onto freshly constructed instances
    pub default_placement: Transform,

    spawn_hook: Option<SpawnHook>,
}

impl TemplateDescriptor {
    /// Create a template with identity default placement and no spawn hook
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_placement: Transform::identity(),
            spawn_hook: None,
        }
    }

    /// Attach a spawn hook, builder style
    pub fn with_spawn_hook(mut self, hook: impl Fn(InstanceHandle) + 'static) -> Self {
        self.spawn_hook = Some(Rc::new(hook));
        self
    }

    /// Template name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The registered spawn hook, if any
    pub fn spawn_hook(&self) -> Option<SpawnHook> {
        self.spawn_hook.clone()
    }
}

impl std::fmt::Debug for TemplateDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateDescriptor")
            .field("name", &self.name)
            .field("default_placement", &self.default_placement)
            .field("spawn_hook", &self.spawn_hook.is_some())
            .finish()
    }
}

/// A live reusable instance
///
/// Many records reference one template. Records are created in bulk by the
/// expansion step or one at a time during queue pool configuration, and are
/// destroyed only at pool teardown.
#[derive(Debug, Clone)]
pub struct InstanceRecord {
    template: TemplateHandle,

    /// Whether the instance is currently active in the world
    pub active: bool,

    /// Spatial payload; owned by the activation collaborator, opaque to pools
    pub placement: Transform,

    /// Marks the instance as belonging to a bulk pool (query surface)
    pub pooled: bool,

    /// Activation marker: set at bulk creation, cleared by the activation step
    pub needs_init: bool,
}

impl InstanceRecord {
    /// Build an inactive record inheriting the template's default placement
    pub fn from_template(template: TemplateHandle, descriptor: &TemplateDescriptor) -> Self {
        Self {
            template,
            active: false,
            placement: descriptor.default_placement.clone(),
            pooled: false,
            needs_init: false,
        }
    }

    /// Back-reference to the originating template
    pub fn template(&self) -> TemplateHandle {
        self.template
    }
}
