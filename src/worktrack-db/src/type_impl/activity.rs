use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, LoaderTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use worktrack_entities::{activity_info, screenshot_activity};
use worktrack_types::{ActivityInfo, ImagePath, ScreenshotActivity, SearchActivityInfo};

use crate::DatabaseHandler;

impl DatabaseHandler {
    /// Records a check-in stamped with the current time.
    pub async fn record_activity(&self, employee_id: i32) -> anyhow::Result<ActivityInfo> {
        self.record_activity_with_screenshots(employee_id, Vec::new())
            .await
    }

    /// Records a check-in that happened at `date`, for importing past events.
    pub async fn record_activity_at(
        &self,
        employee_id: i32,
        date: NaiveDateTime,
    ) -> anyhow::Result<ActivityInfo> {
        let model = activity_info::ActiveModel {
            id: NotSet,
            date: Set(date),
            employee_id: Set(employee_id),
        };

        let model = model.insert(&self.db).await?;
        Ok(map_activity(model, Vec::new()))
    }

    /// Records a check-in and its screenshots atomically.
    pub async fn record_activity_with_screenshots(
        &self,
        employee_id: i32,
        images: Vec<ImagePath>,
    ) -> anyhow::Result<ActivityInfo> {
        let txn = self.db.begin().await?;

        let activity = activity_info::ActiveModel {
            id: NotSet,
            date: NotSet,
            employee_id: Set(employee_id),
        }
        .insert(&txn)
        .await?;

        let mut screenshots = Vec::with_capacity(images.len());
        for image in images {
            let screenshot = screenshot_activity::ActiveModel {
                id: NotSet,
                image: Set(image.into()),
                activity_info_id: Set(activity.id),
            }
            .insert(&txn)
            .await?;
            screenshots.push(screenshot);
        }

        txn.commit().await?;

        debug!(
            "Recorded activity {} for employee {} with {} screenshot(s)",
            activity.id,
            employee_id,
            screenshots.len()
        );

        Ok(map_activity(
            activity,
            screenshots
                .into_iter()
                .map(map_screenshot)
                .collect::<anyhow::Result<_>>()?,
        ))
    }

    pub async fn add_screenshot(
        &self,
        activity_info_id: i32,
        image: ImagePath,
    ) -> anyhow::Result<ScreenshotActivity> {
        let model = screenshot_activity::ActiveModel {
            id: NotSet,
            image: Set(image.into()),
            activity_info_id: Set(activity_info_id),
        };

        map_screenshot(model.insert(&self.db).await?)
    }

    pub async fn get_screenshots(
        &self,
        activity_info_id: i32,
    ) -> anyhow::Result<Vec<ScreenshotActivity>> {
        screenshot_activity::Entity::find()
            .filter(screenshot_activity::Column::ActivityInfoId.eq(activity_info_id))
            .order_by_asc(screenshot_activity::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(map_screenshot)
            .collect()
    }

    pub async fn get_activity(&self, id: i32) -> anyhow::Result<Option<ActivityInfo>> {
        let Some(model) = activity_info::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let screenshots = self.get_screenshots(model.id).await?;
        Ok(Some(map_activity(model, screenshots)))
    }

    /// Activity matching `options`, oldest first.
    pub async fn search_activity(
        &self,
        options: SearchActivityInfo,
    ) -> anyhow::Result<Vec<ActivityInfo>> {
        let activities = activity_info::Entity::find_in_date_order()
            .filter(search_activity_query(options))
            .limit(options.limit)
            .all(&self.db)
            .await?;

        let screenshots = activities
            .load_many(
                screenshot_activity::Entity::find()
                    .order_by_asc(screenshot_activity::Column::Id),
                &self.db,
            )
            .await?;

        activities
            .into_iter()
            .zip(screenshots)
            .map(|(activity, screenshots)| {
                let screenshots = screenshots
                    .into_iter()
                    .map(map_screenshot)
                    .collect::<anyhow::Result<_>>()?;
                Ok(map_activity(activity, screenshots))
            })
            .collect()
    }

    pub async fn get_latest_activity(
        &self,
        employee_id: i32,
    ) -> anyhow::Result<Option<ActivityInfo>> {
        let Some(model) = activity_info::Entity::find()
            .filter(activity_info::Column::EmployeeId.eq(employee_id))
            .order_by_desc(activity_info::Column::Date)
            .order_by_desc(activity_info::Column::Id)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let screenshots = self.get_screenshots(model.id).await?;
        Ok(Some(map_activity(model, screenshots)))
    }

    /// Deletes the activity record and its screenshots. Stored image files
    /// are left to the caller.
    pub async fn delete_activity(&self, id: i32) -> anyhow::Result<bool> {
        let result = activity_info::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

fn search_activity_query(query: SearchActivityInfo) -> Condition {
    Condition::all()
        .add_option(
            query
                .employee_id
                .map(|id| activity_info::Column::EmployeeId.eq(id)),
        )
        .add_option(query.from.map(|from| activity_info::Column::Date.gte(from)))
        .add_option(query.to.map(|to| activity_info::Column::Date.lt(to)))
}

fn map_activity(
    value: activity_info::Model,
    screenshots: Vec<ScreenshotActivity>,
) -> ActivityInfo {
    ActivityInfo {
        id: value.id,
        date: value.date,
        employee_id: value.employee_id,
        screenshots,
    }
}

fn map_screenshot(value: screenshot_activity::Model) -> anyhow::Result<ScreenshotActivity> {
    Ok(ScreenshotActivity {
        id: value.id,
        image: ImagePath::parse(&value.image)?,
        activity_info_id: value.activity_info_id,
    })
}
