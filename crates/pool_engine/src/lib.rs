//! # Pool Engine
//!
//! A tag-keyed object pooling library for games and simulations.
//!
//! ## Features
//!
//! - **Queue Pooling**: Fixed-capacity round-robin pools keyed by string tag
//! - **Bulk Pooling**: Data-driven pool definitions expanded and activated
//!   through deferred command batches
//! - **Host Abstraction**: Pools drive any instance store through the
//!   [`InstanceHost`](world::InstanceHost) trait
//! - **Config Driven**: Pool setups loadable from TOML or RON files
//!
//! ## Quick Start
//!
//! ```rust
//! use pool_engine::prelude::*;
//!
//! let mut world = InstanceWorld::new();
//! let bullet = world.register_template(TemplateDescriptor::new("bullet"));
//!
//! let mut pools = QueuePoolManager::new();
//! pools
//!     .configure(&mut world, &[PoolSpec::new("bullet", bullet, 8)])
//!     .expect("pool setup failed");
//!
//! let handle = pools.acquire(&mut world, "bullet", Vec3::zeros(), Quat::identity());
//! assert!(handle.is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod pool;
pub mod world;

pub use config::{Config, ConfigError, PoolSetupConfig};
pub use pool::{BulkEntityPool, PoolError, QueuePoolManager};

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{Config, PoolSetupConfig},
        foundation::math::{Quat, Transform, Vec3},
        pool::{
            BulkEntityPool, PoolDefinition, PoolDefinitionHandle, PoolError, PoolSpec,
            QueuePoolManager,
        },
        world::{InstanceHandle, InstanceHost, InstanceWorld, TemplateDescriptor, TemplateHandle},
    };
}
