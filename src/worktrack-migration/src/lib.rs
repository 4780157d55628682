pub use sea_orm_migration::prelude::*;

pub mod m20200727_000000_create_employees;
pub mod m20200728_121700_activity_info;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20200727_000000_create_employees::Migration),
            Box::new(m20200728_121700_activity_info::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use sea_orm_migration::sea_orm::{Database, DatabaseConnection};

    use super::*;

    async fn connect() -> DatabaseConnection {
        Database::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn up_creates_activity_tables_and_drops_legacy_screenshot() {
        let db = connect().await;
        Migrator::up(&db, None).await.unwrap();

        let manager = SchemaManager::new(&db);
        assert!(manager.has_table("auth_user").await.unwrap());
        assert!(manager.has_table("employees_activity_info").await.unwrap());
        assert!(manager.has_table("employees_screenshots").await.unwrap());
        assert!(!manager.has_table("screenshot").await.unwrap());

        assert!(
            manager
                .has_column("employees_activity_info", "employee_id")
                .await
                .unwrap()
        );
        assert!(
            manager
                .has_column("employees_screenshots", "activity_info_id")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn rolling_back_restores_legacy_screenshot() {
        let db = connect().await;
        Migrator::up(&db, None).await.unwrap();
        Migrator::down(&db, Some(1)).await.unwrap();

        let manager = SchemaManager::new(&db);
        assert!(manager.has_table("screenshot").await.unwrap());
        assert!(manager.has_column("screenshot", "image").await.unwrap());
        assert!(!manager.has_table("employees_activity_info").await.unwrap());
        assert!(!manager.has_table("employees_screenshots").await.unwrap());

        let pending = Migrator::get_pending_migrations(&db).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name(), "m20200728_121700_activity_info");
    }

    #[tokio::test]
    async fn migrations_are_reapplicable_after_rollback() {
        let db = connect().await;
        Migrator::up(&db, None).await.unwrap();
        Migrator::down(&db, Some(1)).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let manager = SchemaManager::new(&db);
        assert!(!manager.has_table("screenshot").await.unwrap());
        assert!(manager.has_table("employees_screenshots").await.unwrap());
        assert!(
            Migrator::get_pending_migrations(&db)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
