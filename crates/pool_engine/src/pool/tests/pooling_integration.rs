//! End-to-end pooling scenarios
//!
//! Exercises the full lifecycle of both strategies: declarative bulk pools
//! through expansion and activation, and queue pools from a config file
//! through steady-state acquire cycles.

use crate::config::{Config, PoolSetupConfig};
use crate::foundation::math::{Quat, Vec3};
use crate::pool::{BulkEntityPool, QueuePoolManager};
use crate::world::{InstanceWorld, TemplateDescriptor};
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn test_goblin_pool_full_lifecycle() {
    crate::foundation::logging::init_for_tests();
    let mut world = InstanceWorld::new();
    let goblin = world.register_template(TemplateDescriptor::new("goblin"));

    let mut pool = BulkEntityPool::new();
    pool.declare_tagged_pool(&world, goblin, 10, "goblin").unwrap();

    // Before the first tick nothing exists.
    assert_eq!(world.instance_count(), 0);

    let report = pool.tick(&mut world).unwrap();
    assert_eq!(report.expansion.instances_created, 10);
    assert_eq!(report.instances_activated, 10);

    let pooled = pool.pooled_instances(&world);
    assert_eq!(pooled.len(), 10);
    for handle in &pooled {
        let record = world.instance(*handle).unwrap();
        assert_eq!(record.template(), goblin);
        assert!(record.pooled);
        assert!(!record.needs_init);
        assert_eq!(record.placement.position, Vec3::zeros());
        assert_eq!(record.placement.rotation, Quat::identity());
    }

    // Further ticks are quiescent.
    let report = pool.tick(&mut world).unwrap();
    assert_eq!(report.expansion.instances_created, 0);
    assert_eq!(report.instances_activated, 0);
    assert_eq!(world.instance_count(), 10);
}

#[test]
fn test_bullet_pool_wrap_scenario() {
    let mut world = InstanceWorld::new();
    let spawn_count = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&spawn_count);
    world.register_template(
        TemplateDescriptor::new("bullet_prefab").with_spawn_hook(move |_| {
            counter.set(counter.get() + 1);
        }),
    );

    let config: PoolSetupConfig = toml::from_str(
        r#"
        [[pools]]
        tag = "bullet"
        template = "bullet_prefab"
        size = 3
        "#,
    )
    .unwrap();

    let mut pools = QueuePoolManager::new();
    let specs = config.resolve(&world).unwrap();
    pools.configure(&mut world, &specs).unwrap();

    let muzzle = Vec3::new(0.0, 1.0, 0.0);
    let h1 = pools.acquire(&mut world, "bullet", muzzle, Quat::identity()).unwrap();
    let h2 = pools.acquire(&mut world, "bullet", muzzle, Quat::identity()).unwrap();
    let h3 = pools.acquire(&mut world, "bullet", muzzle, Quat::identity()).unwrap();
    assert!(h1 != h2 && h2 != h3 && h1 != h3);

    // Fourth acquire wraps back to the first bullet, now repositioned.
    let target = Vec3::new(5.0, 1.0, 0.0);
    let h4 = pools.acquire(&mut world, "bullet", target, Quat::identity()).unwrap();
    assert_eq!(h4, h1);
    assert_eq!(world.instance(h4).unwrap().placement.position, target);
    assert!(world.instance(h4).unwrap().active);

    // One spawn notification per acquire.
    assert_eq!(spawn_count.get(), 4);
    assert_eq!(pools.stats().acquires, 4);
}

#[test]
fn test_strategies_share_one_world() {
    let mut world = InstanceWorld::new();
    let goblin = world.register_template(TemplateDescriptor::new("goblin"));
    let bullet = world.register_template(TemplateDescriptor::new("bullet"));

    let mut bulk = BulkEntityPool::new();
    bulk.declare_pool(&world, goblin, 6).unwrap();
    bulk.tick(&mut world).unwrap();

    let mut queue = QueuePoolManager::new();
    queue
        .configure(&mut world, &[crate::pool::PoolSpec::new("bullet", bullet, 4)])
        .unwrap();

    assert_eq!(world.instance_count(), 10);
    // Queue-pooled instances never carry the bulk pooled marker.
    assert_eq!(bulk.pooled_instances(&world).len(), 6);

    let acquired = queue
        .acquire(&mut world, "bullet", Vec3::zeros(), Quat::identity())
        .unwrap();
    assert!(!world.instance(acquired).unwrap().pooled);
}

#[test]
fn test_config_file_to_acquire_round_trip() {
    let mut world = InstanceWorld::new();
    world.register_template(TemplateDescriptor::new("spark_prefab"));

    let config = PoolSetupConfig {
        pools: vec![crate::config::PoolEntry {
            tag: "spark".to_string(),
            template: "spark_prefab".to_string(),
            size: 2,
        }],
    };
    let path = std::env::temp_dir().join("pool_engine_integration_setup.ron");
    let path = path.to_string_lossy().to_string();
    config.save_to_file(&path).unwrap();

    let loaded = PoolSetupConfig::load_from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let mut pools = QueuePoolManager::new();
    let specs = loaded.resolve(&world).unwrap();
    pools.configure(&mut world, &specs).unwrap();

    assert!(pools
        .acquire(&mut world, "spark", Vec3::zeros(), Quat::identity())
        .is_some());
}
