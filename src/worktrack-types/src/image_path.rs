use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

/// Directory, relative to the media root, that every screenshot is stored in.
pub const IMAGE_UPLOAD_DIR: &str = "employee_screenshots";

/// Longest value the `image` column accepts.
pub const IMAGE_PATH_MAX_LEN: usize = 100;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ImagePathError {
    #[error("image file name is empty")]
    Empty,
    #[error("image path `{0}` is not under `employee_screenshots/`")]
    OutsideUploadDir(String),
    #[error("image path `{0}` must be a plain relative path")]
    NotRelative(String),
    #[error("image path `{0}` is longer than 100 characters")]
    TooLong(String),
}

/// Relative path of a stored screenshot, e.g. `employee_screenshots/shot.png`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImagePath(String);

impl ImagePath {
    /// Places a bare file name under the upload directory. Any directory part
    /// of `file_name` is discarded.
    pub fn from_file_name(file_name: &str) -> Result<Self, ImagePathError> {
        let name = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(ImagePathError::Empty)?;

        Self::parse(&format!("{IMAGE_UPLOAD_DIR}/{name}"))
    }

    pub fn parse(value: &str) -> Result<Self, ImagePathError> {
        if value.starts_with('/') || value.contains('\\') {
            return Err(ImagePathError::NotRelative(value.to_owned()));
        }

        let name = value
            .strip_prefix(IMAGE_UPLOAD_DIR)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| ImagePathError::OutsideUploadDir(value.to_owned()))?;

        if name.is_empty() {
            return Err(ImagePathError::Empty);
        }
        if name.split('/').any(|part| part.is_empty() || part == "." || part == "..") {
            return Err(ImagePathError::NotRelative(value.to_owned()));
        }
        if value.chars().count() > IMAGE_PATH_MAX_LEN {
            return Err(ImagePathError::TooLong(value.to_owned()));
        }

        Ok(Self(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name without the upload directory.
    pub fn file_name(&self) -> &str {
        &self.0[IMAGE_UPLOAD_DIR.len() + 1..]
    }
}

impl FromStr for ImagePath {
    type Err = ImagePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ImagePath {
    type Error = ImagePathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ImagePath> for String {
    fn from(value: ImagePath) -> Self {
        value.0
    }
}

impl AsRef<str> for ImagePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_lands_in_upload_dir() {
        let path = ImagePath::from_file_name("shot.png").unwrap();
        assert_eq!(path.as_str(), "employee_screenshots/shot.png");
        assert_eq!(path.file_name(), "shot.png");
    }

    #[test]
    fn directories_in_file_name_are_dropped() {
        let path = ImagePath::from_file_name("/tmp/captures/shot.png").unwrap();
        assert_eq!(path.as_str(), "employee_screenshots/shot.png");
    }

    #[test]
    fn empty_file_name_is_rejected() {
        assert_eq!(ImagePath::from_file_name(""), Err(ImagePathError::Empty));
        assert_eq!(
            ImagePath::parse("employee_screenshots/"),
            Err(ImagePathError::Empty)
        );
    }

    #[test]
    fn parse_requires_upload_dir() {
        assert!(matches!(
            ImagePath::parse("screenshots/shot.png"),
            Err(ImagePathError::OutsideUploadDir(_))
        ));
        assert!(matches!(
            ImagePath::parse("employee_screenshotsX/shot.png"),
            Err(ImagePathError::OutsideUploadDir(_))
        ));
    }

    #[test]
    fn parse_rejects_escapes() {
        for bad in [
            "/employee_screenshots/shot.png",
            "employee_screenshots/../secret",
            "employee_screenshots/a//b.png",
            "employee_screenshots\\shot.png",
        ] {
            assert!(
                matches!(ImagePath::parse(bad), Err(ImagePathError::NotRelative(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn parse_enforces_column_length() {
        let long = format!("{IMAGE_UPLOAD_DIR}/{}.png", "a".repeat(100));
        assert!(matches!(
            ImagePath::parse(&long),
            Err(ImagePathError::TooLong(_))
        ));
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let path: ImagePath = serde_json::from_str("\"employee_screenshots/a.png\"").unwrap();
        assert_eq!(path.file_name(), "a.png");
        assert!(serde_json::from_str::<ImagePath>("\"elsewhere/a.png\"").is_err());
        assert_eq!(
            serde_json::to_string(&path).unwrap(),
            "\"employee_screenshots/a.png\""
        );
    }
}
