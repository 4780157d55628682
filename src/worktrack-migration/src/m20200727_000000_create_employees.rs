use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuthUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuthUser::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AuthUser::Username)
                            .string_len(150)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AuthUser::DateJoined).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager.create_table(legacy_screenshot_table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Screenshot::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AuthUser::Table).to_owned())
            .await
    }
}

/// The screenshot table as it existed before activity tracking replaced it.
pub(crate) fn legacy_screenshot_table() -> TableCreateStatement {
    Table::create()
        .table(Screenshot::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Screenshot::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Screenshot::Image).string_len(100).not_null())
        .col(ColumnDef::new(Screenshot::Date).date_time().not_null())
        .col(ColumnDef::new(Screenshot::EmployeeId).integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_screenshot_auth_user")
                .from(Screenshot::Table, Screenshot::EmployeeId)
                .to(AuthUser::Table, AuthUser::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[derive(Iden)]
pub enum AuthUser {
    Table,
    Id,
    Username,
    DateJoined,
}

#[derive(Iden)]
pub enum Screenshot {
    Table,
    Id,
    Image,
    Date,
    EmployeeId,
}
