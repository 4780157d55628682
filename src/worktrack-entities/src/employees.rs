use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "auth_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub date_joined: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::activity_info::Entity")]
    ActivityInfo,
}

impl Related<super::activity_info::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityInfo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
