//! Shared MySQL testcontainer for store integration tests.

use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::mysql::Mysql;
use traffic_cop_config::StoreConfig;
use traffic_cop_repository::DatabasePool;

/// MySQL container plus a migrated pool pointed at it.
pub struct TestDatabase {
    _container: ContainerAsync<Mysql>,
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    pub async fn new() -> Self {
        let container = Mysql::default()
            .with_env_var("MYSQL_ROOT_PASSWORD", "testpass")
            .with_env_var("MYSQL_DATABASE", "ks1")
            .with_env_var("MYSQL_USER", "traffic_cop")
            .with_env_var("MYSQL_PASSWORD", "traffic_cop")
            .start()
            .await
            .expect("Failed to start MySQL container");

        let port = container
            .get_host_port_ipv4(3306)
            .await
            .expect("Failed to get MySQL port");

        let config = StoreConfig {
            host: "127.0.0.1".to_string(),
            port,
            max_connections: 5,
            connect_timeout_secs: 5,
            ..StoreConfig::default()
        };

        let pool = DatabasePool::new(&config).expect("Failed to configure pool");
        Self::wait_until_ready(&pool, 30).await;

        pool.run_migrations()
            .await
            .expect("Failed to run migrations");

        Self {
            _container: container,
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }

    /// Inserts a routing row directly.
    pub async fn insert(&self, user_id: &str, platform: &str) {
        sqlx::query("INSERT INTO users (user_id, platform) VALUES (?, ?)")
            .bind(user_id)
            .bind(platform)
            .execute(self.pool.inner())
            .await
            .expect("Failed to insert row");
    }

    async fn wait_until_ready(pool: &DatabasePool, max_attempts: u32) {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match pool.health_check().await {
                Ok(()) => return,
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!(
                            "Database not ready after {} attempts: {}",
                            max_attempts, e
                        );
                    }
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        }
    }
}
