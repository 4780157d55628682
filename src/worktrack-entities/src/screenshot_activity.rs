use sea_orm::entity::prelude::*;

/// One screenshot captured for an activity event. `image` is relative to the
/// media root and always lives under `employee_screenshots/`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees_screenshots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub image: String,
    pub activity_info_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::activity_info::Entity",
        from = "Column::ActivityInfoId",
        to = "super::activity_info::Column::Id",
        on_delete = "Cascade"
    )]
    ActivityInfo,
}

impl Related<super::activity_info::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityInfo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
