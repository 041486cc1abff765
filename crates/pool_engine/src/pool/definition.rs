//! Declarative pool definition records

use crate::foundation::collections::TypedHandle;
use crate::world::TemplateHandle;

/// Handle to a declared pool definition
pub type PoolDefinitionHandle = TypedHandle<PoolDefinition>;

/// Describes one bulk pool to create
///
/// Written once at declaration time and consumed by the expansion step. The
/// `consumed` flag is the only mutable part: it flips when the definition has
/// been expanded, so a definition that stays registered across ticks is never
/// expanded twice. Re-declaring creates a fresh definition.
#[derive(Debug, Clone)]
pub struct PoolDefinition {
    /// Template the pool's instances are cloned from
    pub template: TemplateHandle,

    /// Number of instances the expansion step creates
    pub capacity: usize,

    /// Optional category label for diagnostics
    pub tag: Option<String>,

    consumed: bool,
}

impl PoolDefinition {
    /// Create an unconsumed definition
    pub fn new(template: TemplateHandle, capacity: usize, tag: Option<String>) -> Self {
        Self {
            template,
            capacity,
            tag,
            consumed: false,
        }
    }

    /// Whether the expansion step has already processed this definition
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    pub(crate) fn mark_consumed(&mut self) {
        self.consumed = true;
    }
}
