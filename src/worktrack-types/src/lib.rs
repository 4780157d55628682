pub mod activity;
pub mod image_path;

pub use activity::{ActivityInfo, Employee, ScreenshotActivity, SearchActivityInfo};
pub use image_path::{IMAGE_PATH_MAX_LEN, IMAGE_UPLOAD_DIR, ImagePath, ImagePathError};
