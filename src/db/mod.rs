use crate::models::{NewSearchCounter, SearchCounter};
use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Local SQLite database holding search counters.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let path_str = db_url.trim_start_matches("sqlite:");
        let in_memory = path_str.starts_with(":memory:");

        if !in_memory {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every pooled connection to `:memory:` would open its own empty database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false);

        if !in_memory {
            opt.max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn counter_repo(&self) -> repositories::counter::CounterRepository {
        repositories::counter::CounterRepository::new(self.conn.clone())
    }

    pub async fn find_counter(&self, term: &str) -> Result<Option<SearchCounter>, DbErr> {
        self.counter_repo().find_by_term(term).await
    }

    pub async fn insert_counter(&self, counter: NewSearchCounter) -> Result<SearchCounter, DbErr> {
        self.counter_repo().insert(counter).await
    }

    pub async fn set_counter_count(&self, id: &str, count: i64) -> Result<u64, DbErr> {
        self.counter_repo().set_count(id, count).await
    }

    pub async fn top_counters(&self, limit: u64) -> Result<Vec<SearchCounter>, DbErr> {
        self.counter_repo().top_by_count(limit).await
    }
}
