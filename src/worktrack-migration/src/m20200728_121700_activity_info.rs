use sea_orm_migration::prelude::*;

use crate::m20200727_000000_create_employees::{AuthUser, Screenshot, legacy_screenshot_table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivityInfo::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityInfo::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActivityInfo::Date).date_time().not_null())
                    .col(ColumnDef::new(ActivityInfo::EmployeeId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_info_auth_user")
                            .from(ActivityInfo::Table, ActivityInfo::EmployeeId)
                            .to(AuthUser::Table, AuthUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Backs the default `date ASC` read order.
        manager
            .create_index(
                Index::create()
                    .name("idx_activity_info_date")
                    .table(ActivityInfo::Table)
                    .col(ActivityInfo::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activity_info_employee_id")
                    .table(ActivityInfo::Table)
                    .col(ActivityInfo::EmployeeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ScreenshotActivity::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScreenshotActivity::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScreenshotActivity::Image)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScreenshotActivity::ActivityInfoId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_screenshots_activity_info")
                            .from(ScreenshotActivity::Table, ScreenshotActivity::ActivityInfoId)
                            .to(ActivityInfo::Table, ActivityInfo::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_screenshots_activity_info_id")
                    .table(ScreenshotActivity::Table)
                    .col(ScreenshotActivity::ActivityInfoId)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Screenshot::Table).to_owned())
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(legacy_screenshot_table()).await?;

        manager
            .drop_table(Table::drop().table(ScreenshotActivity::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ActivityInfo::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ActivityInfo {
    #[iden = "employees_activity_info"]
    Table,
    Id,
    Date,
    EmployeeId,
}

#[derive(Iden)]
pub enum ScreenshotActivity {
    #[iden = "employees_screenshots"]
    Table,
    Id,
    Image,
    ActivityInfoId,
}
