use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, anyhow};
use uuid::Uuid;
use worktrack_types::{IMAGE_PATH_MAX_LEN, IMAGE_UPLOAD_DIR, ImagePath};

/// Screenshot files on disk, laid out as `<root>/employee_screenshots/<name>`.
#[derive(Clone, Debug)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, image: &ImagePath) -> PathBuf {
        self.root.join(image.as_str())
    }

    /// Writes `bytes` under the upload directory. When `file_name` is taken a
    /// random suffix is added before the extension, so existing files are
    /// never overwritten.
    pub fn save(&self, file_name: &str, bytes: &[u8]) -> anyhow::Result<ImagePath> {
        let dir = self.root.join(IMAGE_UPLOAD_DIR);
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating media directory {}", dir.display()))?;

        let name = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("invalid screenshot file name `{file_name}`"))?;
        let mut candidate = fit_to_column(name, None);

        loop {
            let image = ImagePath::from_file_name(&candidate)?;
            let path = self.resolve(&image);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(bytes)
                        .with_context(|| format!("writing {}", path.display()))?;
                    debug!("Stored screenshot at {}", path.display());
                    return Ok(image);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    let suffix = Uuid::new_v4().simple().to_string()[..8].to_owned();
                    candidate = fit_to_column(name, Some(&suffix));
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("creating {}", path.display()));
                }
            }
        }
    }

    pub fn read(&self, image: &ImagePath) -> anyhow::Result<Vec<u8>> {
        let path = self.resolve(image);
        fs::read(&path).with_context(|| format!("reading {}", path.display()))
    }

    /// Removes a stored file. A file that is already gone is not an error.
    pub fn delete(&self, image: &ImagePath) -> anyhow::Result<()> {
        let path = self.resolve(image);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Screenshot {} was already removed", path.display());
                Ok(())
            }
            Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
        }
    }
}

/// Builds `<stem>[_<suffix>]<.ext>`, shortening the stem so the full relative
/// path fits in the `image` column.
fn fit_to_column(file_name: &str, suffix: Option<&str>) -> String {
    let (stem, ext) = match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name.split_at(idx),
        _ => (file_name, ""),
    };
    let suffix = suffix.map(|s| format!("_{s}")).unwrap_or_default();

    let budget = IMAGE_PATH_MAX_LEN - IMAGE_UPLOAD_DIR.len() - 1;
    let fixed = suffix.chars().count() + ext.chars().count();
    let stem: String = stem.chars().take(budget.saturating_sub(fixed).max(1)).collect();

    format!("{stem}{suffix}{ext}")
}
