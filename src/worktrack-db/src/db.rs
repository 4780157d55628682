use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use worktrack_migration::{Migrator, MigratorTrait, SchemaManager};

#[derive(Clone)]
pub struct DatabaseHandler {
    pub(crate) db: DatabaseConnection,
}

impl DatabaseHandler {
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Connects and brings the schema up to date.
    pub async fn new<C>(options: C) -> anyhow::Result<Self>
    where
        C: Into<ConnectOptions>,
    {
        let handler = Self::connect(options).await?;
        Migrator::up(&handler.db, None).await?;
        Ok(handler)
    }

    /// Connects without touching the schema.
    pub async fn connect<C>(options: C) -> anyhow::Result<Self>
    where
        C: Into<ConnectOptions>,
    {
        let db = Database::connect(options).await?;
        Ok(Self { db })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        let pending = Migrator::get_pending_migrations(&self.db).await?;
        for migration in &pending {
            info!("Applying migration {}", migration.name());
        }
        Migrator::up(&self.db, None).await?;
        Ok(())
    }

    /// Rolls back the `steps` most recent migrations.
    pub async fn rollback(&self, steps: u32) -> anyhow::Result<()> {
        Migrator::down(&self.db, Some(steps)).await?;
        Ok(())
    }

    pub async fn pending_migrations(&self) -> anyhow::Result<Vec<String>> {
        Ok(Migrator::get_pending_migrations(&self.db)
            .await?
            .iter()
            .map(|m| m.name().to_owned())
            .collect())
    }

    /// Whether the table superseded by `employees_screenshots` is still present.
    pub async fn legacy_screenshot_table_exists(&self) -> anyhow::Result<bool> {
        Ok(SchemaManager::new(&self.db).has_table("screenshot").await?)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, Statement};

    use super::*;

    #[tokio::test]
    async fn new_applies_all_migrations() {
        let db = DatabaseHandler::new("sqlite::memory:").await.unwrap();
        assert!(db.pending_migrations().await.unwrap().is_empty());
        assert!(!db.legacy_screenshot_table_exists().await.unwrap());
    }

    #[tokio::test]
    async fn legacy_table_is_unusable_after_migration() {
        let db = DatabaseHandler::new("sqlite::memory:").await.unwrap();
        let backend = db.connection().get_database_backend();
        let result = db
            .connection()
            .execute(Statement::from_string(
                backend,
                "SELECT COUNT(*) FROM screenshot",
            ))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn rollback_and_migrate_round_trip() {
        let db = DatabaseHandler::new("sqlite::memory:").await.unwrap();

        db.rollback(1).await.unwrap();
        assert!(db.legacy_screenshot_table_exists().await.unwrap());
        assert_eq!(
            db.pending_migrations().await.unwrap(),
            vec!["m20200728_121700_activity_info".to_string()]
        );

        db.migrate().await.unwrap();
        assert!(!db.legacy_screenshot_table_exists().await.unwrap());
    }
}
