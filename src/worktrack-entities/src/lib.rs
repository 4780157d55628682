//! sea-orm entities for the employee activity schema.

pub mod activity_info;
pub mod employees;
pub mod screenshot_activity;
