use std::sync::Arc;

use derive_builder::Builder;

use crate::definition::DefinitionRegistry;

#[derive(Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct TallyLedgerConfig {
    #[builder(setter(into))]
    pub(super) registry: Arc<DefinitionRegistry>,
    #[builder(setter(into, strip_option), default)]
    pub(super) pg_con: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub(super) max_connections: Option<u32>,
    #[builder(default)]
    pub(super) exec_migrations: bool,
    #[builder(setter(into, strip_option), default)]
    pub(super) pool: Option<sqlx::PgPool>,
}

impl TallyLedgerConfig {
    pub fn builder() -> TallyLedgerConfigBuilder {
        TallyLedgerConfigBuilder::default()
    }
}

impl TallyLedgerConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match (self.pg_con.as_ref(), self.pool.as_ref()) {
            (None, None) | (Some(None), None) | (None, Some(None)) => {
                return Err("One of pg_con or pool must be set".to_string())
            }
            (Some(_), Some(_)) => return Err("Only one of pg_con or pool must be set".to_string()),
            _ => (),
        }
        Ok(())
    }
}
