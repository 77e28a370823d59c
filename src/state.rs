use std::sync::Arc;

use tracing::warn;

use crate::{
    auth::repo::{MemoryUserRepository, PgUserRepository, UserRepository},
    config::AppConfig,
    db,
    entries::{
        memory::MemoryEntryRepository,
        repo::{EntryRepository, PgEntryRepository},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepository>,
    pub entries: Arc<dyn EntryRepository>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let Some(database_url) = config.database_url.clone() else {
            warn!("DATABASE_URL not set; entries and users live in memory only");
            return Ok(Self::in_memory(config));
        };

        let pool = db::connect(&database_url, config.max_connections).await?;
        db::migrate(&pool).await?;

        Ok(Self::from_parts(
            Arc::new(config),
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgEntryRepository::new(pool)),
        ))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserRepository>,
        entries: Arc<dyn EntryRepository>,
    ) -> Self {
        Self {
            config,
            users,
            entries,
        }
    }

    pub fn in_memory(config: AppConfig) -> Self {
        Self::from_parts(
            Arc::new(config),
            Arc::new(MemoryUserRepository::new()),
            Arc::new(MemoryEntryRepository::new()),
        )
    }
}
