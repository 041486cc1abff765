//! Deferred command batching
//!
//! Bulk pooling never mutates the world mid-step. Operations accumulate in a
//! [`CommandBuffer`] and become visible atomically when [`CommandBuffer::apply`]
//! commits them. `apply` takes the buffer by value, so issuing an operation
//! against an already-applied batch is unrepresentable rather than a runtime
//! error.
//!
//! Instances that do not exist yet are addressed through [`PendingInstance`]
//! refs returned by [`CommandBuffer::instantiate`]; they resolve to real
//! handles during apply. A pending ref reaching apply without its instantiate
//! command is a step-ordering bug and panics.

use super::PoolError;
use crate::foundation::math::{Quat, Vec3};
use crate::world::{InstanceHandle, InstanceHost, InstanceWorld, TemplateHandle};

/// Reference to an instance a batch will create on apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingInstance(usize);

/// Addressee of a batched operation: already live, or created by this batch
#[derive(Debug, Clone, Copy)]
pub enum Target {
    /// An instance that already exists in the world
    Existing(InstanceHandle),
    /// An instance this batch instantiates
    Pending(PendingInstance),
}

impl From<InstanceHandle> for Target {
    fn from(handle: InstanceHandle) -> Self {
        Self::Existing(handle)
    }
}

impl From<PendingInstance> for Target {
    fn from(pending: PendingInstance) -> Self {
        Self::Pending(pending)
    }
}

#[derive(Debug)]
enum Command {
    Instantiate { template: TemplateHandle, slot: usize },
    SetPooled { target: Target, pooled: bool },
    SetNeedsInit { target: Target, needs_init: bool },
    SetPlacement { target: Target, position: Vec3, rotation: Quat },
    SetActive { target: Target, active: bool },
}

/// Builder accumulating deferred world mutations
pub struct CommandBuffer {
    commands: Vec<Command>,
    pending_count: usize,
}

impl CommandBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            pending_count: 0,
        }
    }

    /// Queue construction of an instance from a template
    pub fn instantiate(&mut self, template: TemplateHandle) -> PendingInstance {
        let slot = self.pending_count;
        self.pending_count += 1;
        self.commands.push(Command::Instantiate { template, slot });
        PendingInstance(slot)
    }

    /// Queue setting the pooled marker
    pub fn set_pooled(&mut self, target: impl Into<Target>, pooled: bool) {
        self.commands.push(Command::SetPooled {
            target: target.into(),
            pooled,
        });
    }

    /// Queue setting the activation marker
    pub fn set_needs_init(&mut self, target: impl Into<Target>, needs_init: bool) {
        self.commands.push(Command::SetNeedsInit {
            target: target.into(),
            needs_init,
        });
    }

    /// Queue a position/rotation update; scale is preserved
    pub fn set_placement(&mut self, target: impl Into<Target>, position: Vec3, rotation: Quat) {
        self.commands.push(Command::SetPlacement {
            target: target.into(),
            position,
            rotation,
        });
    }

    /// Queue toggling the active flag
    pub fn set_active(&mut self, target: impl Into<Target>, active: bool) {
        self.commands.push(Command::SetActive {
            target: target.into(),
            active,
        });
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the buffer holds no commands
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commit every queued command in order, consuming the buffer
    ///
    /// Returns the handles created by this batch, in instantiate order.
    ///
    /// # Panics
    ///
    /// Panics if a command addresses a pending instance whose instantiate
    /// command was not applied first. Buffers are built front to back within
    /// one step, so this indicates a step-ordering bug.
    pub fn apply(self, world: &mut InstanceWorld) -> Result<Vec<InstanceHandle>, PoolError> {
        let mut created: Vec<Option<InstanceHandle>> = vec![None; self.pending_count];

        let resolve = |target: Target, created: &[Option<InstanceHandle>]| -> InstanceHandle {
            match target {
                Target::Existing(handle) => handle,
                Target::Pending(PendingInstance(slot)) => created[slot]
                    .unwrap_or_else(|| panic!("batch addressed pending instance {slot} before its instantiate command")),
            }
        };

        for command in self.commands {
            match command {
                Command::Instantiate { template, slot } => {
                    let handle = world.construct(template)?;
                    created[slot] = Some(handle);
                }
                Command::SetPooled { target, pooled } => {
                    let handle = resolve(target, &created);
                    if let Some(record) = world.instance_mut(handle) {
                        record.pooled = pooled;
                    }
                }
                Command::SetNeedsInit { target, needs_init } => {
                    let handle = resolve(target, &created);
                    if let Some(record) = world.instance_mut(handle) {
                        record.needs_init = needs_init;
                    }
                }
                Command::SetPlacement {
                    target,
                    position,
                    rotation,
                } => {
                    let handle = resolve(target, &created);
                    world.set_placement(handle, position, rotation);
                }
                Command::SetActive { target, active } => {
                    let handle = resolve(target, &created);
                    world.set_active(handle, active);
                }
            }
        }

        Ok(created.into_iter().flatten().collect())
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}
