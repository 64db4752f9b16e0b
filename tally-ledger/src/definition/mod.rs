//! The configuration-time schema the posting engine executes against:
//! tenants, their chart of accounts, and the entry shapes each tenant
//! may post. Built once at startup through [`DefinitionRegistry::builder`],
//! validated eagerly, and immutable afterwards. It is passed by
//! reference into every engine operation.

mod account;
mod builder;
mod entry;
pub mod error;
mod movement;
mod tenant;

use std::collections::HashMap;

pub use account::{AccountDefinition, AccountType};
pub use builder::{DefinitionRegistryBuilder, EntryMovementsBuilder, TenantBuilder};
pub use entry::EntryDefinition;
pub use movement::MovementDefinition;
pub use tenant::TenantDefinition;

#[derive(Debug, Clone)]
pub struct DefinitionRegistry {
    tenants: HashMap<String, TenantDefinition>,
}

impl DefinitionRegistry {
    pub fn builder() -> DefinitionRegistryBuilder {
        DefinitionRegistryBuilder::new()
    }

    pub fn find_tenant(&self, kind: &str) -> Option<&TenantDefinition> {
        self.tenants.get(kind)
    }

    pub fn tenants(&self) -> impl Iterator<Item = &TenantDefinition> {
        self.tenants.values()
    }
}
