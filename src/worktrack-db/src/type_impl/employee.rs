use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set,
};
use worktrack_entities::employees;
use worktrack_types::Employee;

use crate::DatabaseHandler;

impl DatabaseHandler {
    pub async fn create_employee(&self, username: &str) -> anyhow::Result<Employee> {
        let model = employees::ActiveModel {
            id: NotSet,
            username: Set(username.to_owned()),
            date_joined: Set(Utc::now().naive_utc()),
        };

        let model = model.insert(&self.db).await?;
        debug!("Created employee {} ({})", model.username, model.id);
        Ok(map_employee(model))
    }

    pub async fn get_employee(&self, id: i32) -> anyhow::Result<Option<Employee>> {
        Ok(employees::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(map_employee))
    }

    pub async fn find_employee(&self, username: &str) -> anyhow::Result<Option<Employee>> {
        Ok(employees::Entity::find()
            .filter(employees::Column::Username.eq(username))
            .one(&self.db)
            .await?
            .map(map_employee))
    }

    /// Deletes the employee together with their activity and screenshots.
    pub async fn delete_employee(&self, id: i32) -> anyhow::Result<bool> {
        let result = employees::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

fn map_employee(value: employees::Model) -> Employee {
    Employee {
        id: value.id,
        username: value.username,
        date_joined: value.date_joined,
    }
}

#[cfg(test)]
mod tests {
    use crate::DatabaseHandler;

    #[tokio::test]
    async fn create_and_find_employee() {
        let db = DatabaseHandler::new("sqlite::memory:").await.unwrap();

        let created = db.create_employee("alice").await.unwrap();
        let by_name = db.find_employee("alice").await.unwrap().unwrap();
        let by_id = db.get_employee(created.id).await.unwrap().unwrap();

        assert_eq!(created, by_name);
        assert_eq!(created, by_id);
        assert!(db.find_employee("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn usernames_are_unique() {
        let db = DatabaseHandler::new("sqlite::memory:").await.unwrap();
        db.create_employee("alice").await.unwrap();
        assert!(db.create_employee("alice").await.is_err());
    }

    #[tokio::test]
    async fn delete_missing_employee_reports_false() {
        let db = DatabaseHandler::new("sqlite::memory:").await.unwrap();
        assert!(!db.delete_employee(42).await.unwrap());
    }
}
