use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ImagePath;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i32,
    pub username: String,
    pub date_joined: NaiveDateTime,
}

/// A single check-in of an employee, with the screenshots taken for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityInfo {
    pub id: i32,
    pub date: NaiveDateTime,
    pub employee_id: i32,
    pub screenshots: Vec<ScreenshotActivity>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotActivity {
    pub id: i32,
    pub image: ImagePath,
    pub activity_info_id: i32,
}

#[derive(Clone, Copy, Default, Debug)]
pub struct SearchActivityInfo {
    pub employee_id: Option<i32>,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
    pub limit: Option<u64>,
}

impl SearchActivityInfo {
    pub fn with_employee(self, employee_id: i32) -> Self {
        Self {
            employee_id: Some(employee_id),
            ..self
        }
    }

    pub fn with_from(self, from: NaiveDateTime) -> Self {
        Self {
            from: Some(from),
            ..self
        }
    }

    pub fn with_to(self, to: NaiveDateTime) -> Self {
        Self { to: Some(to), ..self }
    }

    pub fn with_limit(self, limit: u64) -> Self {
        Self {
            limit: Some(limit),
            ..self
        }
    }
}
