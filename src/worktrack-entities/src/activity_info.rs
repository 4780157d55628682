//! Heartbeat record of an employee's activity.
//!
//! `date` is stamped on insert and is immutable afterwards: [`ActiveModel`]
//! fills it in when left unset and drops any change to it on update.

use chrono::Utc;
use sea_orm::{QueryOrder, Set, entity::prelude::*};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees_activity_info")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: DateTime,
    pub employee_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::Id",
        on_delete = "Cascade"
    )]
    Employee,
    #[sea_orm(has_many = "super::screenshot_activity::Entity")]
    ScreenshotActivity,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::screenshot_activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScreenshotActivity.def()
    }
}

impl Entity {
    /// Default read order: oldest first, id breaks ties.
    pub fn find_in_date_order() -> Select<Entity> {
        Self::find()
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id)
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert {
            if self.date.is_not_set() {
                self.date = Set(Utc::now().naive_utc());
            }
        } else {
            self.not_set(Column::Date);
        }

        Ok(self)
    }
}
