//! Pooling demo application
//!
//! Drives both pooling strategies against one instance world: a bulk goblin
//! pool expanded and activated over a few ticks, and a queue bullet pool
//! fired at random scatter positions until it wraps around.

use pool_engine::prelude::*;
use rand::Rng;

const GOBLIN_POOL_SIZE: usize = 10;
const BULLET_POOL_SIZE: usize = 3;
const SIMULATED_TICKS: u32 = 4;
const SHOTS_PER_TICK: u32 = 2;

fn main() {
    pool_engine::foundation::logging::init();
    log::info!("Starting pooling demo...");

    let mut world = InstanceWorld::new();
    let goblin = world.register_template(TemplateDescriptor::new("goblin"));
    world.register_template(TemplateDescriptor::new("bullet_prefab").with_spawn_hook(
        |instance| {
            log::debug!("bullet {instance:?} spawned");
        },
    ));

    // Bulk strategy: declare once, expand and activate on the first tick.
    let mut bulk = BulkEntityPool::new();
    bulk.declare_tagged_pool(&world, goblin, GOBLIN_POOL_SIZE, "goblin")
        .expect("goblin pool declaration failed");

    // Queue strategy: configure from data, the same shape a setup file has.
    let config = PoolSetupConfig {
        pools: vec![pool_engine::config::PoolEntry {
            tag: "bullet".to_string(),
            template: "bullet_prefab".to_string(),
            size: BULLET_POOL_SIZE,
        }],
    };
    let specs = config.resolve(&world).expect("template lookup failed");
    let mut pools = QueuePoolManager::new();
    pools
        .configure(&mut world, &specs)
        .expect("bullet pool setup failed");

    let mut rng = rand::thread_rng();
    for tick in 0..SIMULATED_TICKS {
        let report = bulk.tick(&mut world).expect("bulk pool tick failed");
        if report.expansion.instances_created > 0 {
            log::info!(
                "tick {tick}: expanded {} instance(s), activated {}",
                report.expansion.instances_created,
                report.instances_activated
            );
        }

        for _ in 0..SHOTS_PER_TICK {
            let position = Vec3::new(rng.gen_range(-5.0..5.0), 0.0, rng.gen_range(-5.0..5.0));
            if let Some(handle) = pools.acquire(&mut world, "bullet", position, Quat::identity()) {
                log::info!("tick {tick}: fired bullet {handle:?} at {position:?}");
                pools.release(handle);
            }
        }
    }

    let pooled = bulk.pooled_instances(&world);
    log::info!(
        "demo done: {} live instances, {} bulk-pooled, {} bullet acquires",
        world.instance_count(),
        pooled.len(),
        pools.stats().acquires
    );
}
