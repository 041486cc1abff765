//! # Queue Pool Manager
//!
//! Simple-mode pooling: each tag owns a fixed-capacity circular queue of
//! pre-constructed instances. Acquire dequeues the front instance, activates
//! and places it, then re-enqueues the same handle at the back, so reuse is
//! strict round-robin and O(1) with no linear scan.
//!
//! The manager never tracks which handles are "in use". Because a handle is
//! re-enqueued immediately on acquire, a caller still holding it will collide
//! with a later acquire once the queue wraps around. Capacity is therefore a
//! concurrency budget: size each pool to at least the expected peak number of
//! concurrently live instances of that tag. Debug builds add a bookkeeping
//! check (see [`QueuePoolManager::release`]) that logs when a wrap-around
//! hands out a handle that was never released.

use super::PoolError;
use crate::foundation::math::{Quat, Vec3};
use crate::world::{InstanceHandle, InstanceHost, TemplateHandle};
use std::collections::{HashMap, VecDeque};

#[cfg(debug_assertions)]
use std::collections::HashSet;

/// Configuration for one tag-keyed pool
#[derive(Debug, Clone)]
pub struct PoolSpec {
    /// Tag identifying the pool
    pub tag: String,

    /// Template instances are constructed from
    pub template: TemplateHandle,

    /// Fixed number of instances to pre-construct
    pub size: usize,
}

impl PoolSpec {
    /// Create a pool spec
    pub fn new(tag: impl Into<String>, template: TemplateHandle, size: usize) -> Self {
        Self {
            tag: tag.into(),
            template,
            size,
        }
    }
}

/// Steady-state counters for pool monitoring
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolStats {
    /// Successful acquires across all tags
    pub acquires: u64,

    /// Acquire calls that named an unregistered tag
    pub misses: u64,
}

/// Tag-keyed manager of fixed-capacity round-robin pools
///
/// Owned plainly and passed by reference; there is deliberately no global
/// instance. The registry is exclusively mutated through [`configure`] and
/// [`acquire`].
///
/// [`configure`]: QueuePoolManager::configure
/// [`acquire`]: QueuePoolManager::acquire
pub struct QueuePoolManager {
    registry: HashMap<String, VecDeque<InstanceHandle>>,
    stats: PoolStats,

    /// Handles handed out and not yet released, for wrap-collision detection
    #[cfg(debug_assertions)]
    outstanding: HashSet<InstanceHandle>,
}

impl QueuePoolManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self {
            registry: HashMap::new(),
            stats: PoolStats::default(),
            #[cfg(debug_assertions)]
            outstanding: HashSet::new(),
        }
    }

    /// Pre-construct every configured pool
    ///
    /// For each spec, constructs `size` instances from the template, marks
    /// them inactive, and enqueues them under the tag. Fails fast on a
    /// duplicate tag or zero size; pools configured before the failing entry
    /// remain registered.
    pub fn configure(
        &mut self,
        host: &mut dyn InstanceHost,
        specs: &[PoolSpec],
    ) -> Result<(), PoolError> {
        for spec in specs {
            if self.registry.contains_key(&spec.tag) {
                log::error!("pool tag '{}' configured twice", spec.tag);
                return Err(PoolError::DuplicateTag(spec.tag.clone()));
            }
            if spec.size == 0 {
                return Err(PoolError::ZeroCapacity(spec.tag.clone()));
            }

            let mut queue = VecDeque::with_capacity(spec.size);
            for _ in 0..spec.size {
                let handle = host.construct(spec.template)?;
                host.set_active(handle, false);
                queue.push_back(handle);
            }
            log::info!("configured pool '{}' with {} instances", spec.tag, spec.size);
            self.registry.insert(spec.tag.clone(), queue);
        }
        Ok(())
    }

    /// Serve the next instance of a tag, round-robin
    ///
    /// Returns `None` and logs a warning if the tag is unregistered. The
    /// returned instance is active, placed at `position`/`rotation` (scale
    /// untouched), and its template's spawn hook has fired.
    pub fn acquire(
        &mut self,
        host: &mut dyn InstanceHost,
        tag: &str,
        position: Vec3,
        rotation: Quat,
    ) -> Option<InstanceHandle> {
        let Some(queue) = self.registry.get_mut(tag) else {
            log::warn!("pool '{tag}' does not exist");
            self.stats.misses += 1;
            return None;
        };
        // Queues are never empty: size >= 1 is enforced at configure time and
        // acquire always re-enqueues what it dequeues.
        let handle = queue.pop_front()?;

        #[cfg(debug_assertions)]
        if !self.outstanding.insert(handle) {
            log::warn!(
                "pool '{tag}' wrapped around to an unreleased instance; \
                 capacity is below peak concurrent usage"
            );
        }

        host.set_active(handle, true);
        host.set_placement(handle, position, rotation);
        host.notify_spawn(handle);

        queue.push_back(handle);
        self.stats.acquires += 1;
        Some(handle)
    }

    /// Record that the caller is done with a handle
    ///
    /// Pure bookkeeping for the debug-build wrap-collision warning; the
    /// instance itself stays in its queue regardless. No-op in release
    /// builds.
    pub fn release(&mut self, handle: InstanceHandle) {
        #[cfg(debug_assertions)]
        self.outstanding.remove(&handle);
        #[cfg(not(debug_assertions))]
        let _ = handle;
    }

    /// Capacity of a tag's pool, if registered
    pub fn capacity(&self, tag: &str) -> Option<usize> {
        self.registry.get(tag).map(VecDeque::len)
    }

    /// Iterate over registered tags
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }

    /// Steady-state counters
    pub fn stats(&self) -> PoolStats {
        self.stats
    }
}

impl Default for QueuePoolManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{InstanceWorld, TemplateDescriptor};
    use std::cell::Cell;
    use std::rc::Rc;

    fn bullet_world() -> (InstanceWorld, TemplateHandle) {
        let mut world = InstanceWorld::new();
        let template = world.register_template(TemplateDescriptor::new("bullet"));
        (world, template)
    }

    #[test]
    fn test_configure_preconstructs_inactive_instances() {
        let (mut world, template) = bullet_world();
        let mut pools = QueuePoolManager::new();
        pools
            .configure(&mut world, &[PoolSpec::new("bullet", template, 4)])
            .unwrap();

        assert_eq!(world.instance_count(), 4);
        assert_eq!(pools.capacity("bullet"), Some(4));
        assert!(world.instances().all(|(_, record)| !record.active));
    }

    #[test]
    fn test_configure_rejects_duplicate_tag() {
        let (mut world, template) = bullet_world();
        let mut pools = QueuePoolManager::new();
        let result = pools.configure(
            &mut world,
            &[
                PoolSpec::new("bullet", template, 2),
                PoolSpec::new("bullet", template, 3),
            ],
        );
        assert!(matches!(result, Err(PoolError::DuplicateTag(tag)) if tag == "bullet"));
    }

    #[test]
    fn test_configure_rejects_zero_size() {
        let (mut world, template) = bullet_world();
        let mut pools = QueuePoolManager::new();
        let result = pools.configure(&mut world, &[PoolSpec::new("bullet", template, 0)]);
        assert!(matches!(result, Err(PoolError::ZeroCapacity(_))));
    }

    #[test]
    fn test_acquire_activates_and_places() {
        let (mut world, template) = bullet_world();
        let mut pools = QueuePoolManager::new();
        pools
            .configure(&mut world, &[PoolSpec::new("bullet", template, 2)])
            .unwrap();

        let position = Vec3::new(1.0, 2.0, 3.0);
        let rotation = Quat::from_euler_angles(0.0, 0.5, 0.0);
        let handle = pools
            .acquire(&mut world, "bullet", position, rotation)
            .unwrap();

        let record = world.instance(handle).unwrap();
        assert!(record.active);
        assert_eq!(record.placement.position, position);
        assert_eq!(record.placement.rotation, rotation);
    }

    #[test]
    fn test_round_robin_wraps_to_first_handle() {
        let (mut world, template) = bullet_world();
        let mut pools = QueuePoolManager::new();
        pools
            .configure(&mut world, &[PoolSpec::new("bullet", template, 3)])
            .unwrap();

        let mut acquire =
            |pools: &mut QueuePoolManager, world: &mut InstanceWorld| -> InstanceHandle {
                pools
                    .acquire(world, "bullet", Vec3::zeros(), Quat::identity())
                    .unwrap()
            };

        let h1 = acquire(&mut pools, &mut world);
        let h2 = acquire(&mut pools, &mut world);
        let h3 = acquire(&mut pools, &mut world);
        assert_ne!(h1, h2);
        assert_ne!(h2, h3);
        assert_ne!(h1, h3);

        // Fourth acquire wraps back to the first handle.
        let h4 = acquire(&mut pools, &mut world);
        assert_eq!(h4, h1);
        assert_eq!(pools.capacity("bullet"), Some(3));
    }

    #[test]
    fn test_unknown_tag_returns_none_without_mutation() {
        let (mut world, template) = bullet_world();
        let mut pools = QueuePoolManager::new();
        pools
            .configure(&mut world, &[PoolSpec::new("bullet", template, 2)])
            .unwrap();

        let result = pools.acquire(&mut world, "rocket", Vec3::zeros(), Quat::identity());
        assert!(result.is_none());
        assert_eq!(pools.stats().misses, 1);
        assert_eq!(pools.stats().acquires, 0);
        assert!(world.instances().all(|(_, record)| !record.active));
    }

    #[test]
    fn test_acquire_fires_spawn_hook() {
        let mut world = InstanceWorld::new();
        let spawned = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&spawned);
        let template = world.register_template(
            TemplateDescriptor::new("bullet").with_spawn_hook(move |_| {
                counter.set(counter.get() + 1);
            }),
        );

        let mut pools = QueuePoolManager::new();
        pools
            .configure(&mut world, &[PoolSpec::new("bullet", template, 2)])
            .unwrap();

        pools.acquire(&mut world, "bullet", Vec3::zeros(), Quat::identity());
        pools.acquire(&mut world, "bullet", Vec3::zeros(), Quat::identity());
        assert_eq!(spawned.get(), 2);
    }

    #[test]
    fn test_release_bookkeeping_round_trip() {
        let (mut world, template) = bullet_world();
        let mut pools = QueuePoolManager::new();
        pools
            .configure(&mut world, &[PoolSpec::new("bullet", template, 1)])
            .unwrap();

        let handle = pools
            .acquire(&mut world, "bullet", Vec3::zeros(), Quat::identity())
            .unwrap();
        pools.release(handle);

        // Released before the wrap, so the second acquire is a clean reuse.
        let again = pools
            .acquire(&mut world, "bullet", Vec3::zeros(), Quat::identity())
            .unwrap();
        assert_eq!(handle, again);
        assert_eq!(pools.stats().acquires, 2);
    }
}
