//! Zip packaging of the output tree.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{ArchiveError, Result};

/// What was written by [`archive_directory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Full path of the archive.
    pub path: PathBuf,
    /// Archive file name, `<root basename>.zip`.
    pub filename: String,
    pub directories: usize,
    pub files: usize,
}

/// Returns the directory the archive is written into and its file name.
///
/// The archive sits in the root's parent (`.` for a bare relative name) and
/// is named after the root's final component.
pub fn archive_location(root: &Path) -> Result<(PathBuf, String)> {
    let name = match root.components().next_back() {
        Some(Component::Normal(name)) => name.to_string_lossy().into_owned(),
        _ => {
            return Err(ArchiveError::InvalidRoot {
                path: root.to_path_buf(),
            });
        }
    };
    let parent = root
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    Ok((parent, format!("{name}.zip")))
}

/// Packages every directory and file under `root` into `<parent>/<name>.zip`.
///
/// Entry names start with the root's own directory name and use `/`
/// separators; directories carry a trailing `/` and no content; files are
/// deflate-compressed. The archive is assembled in a temporary file beside
/// the target and only moved into place once complete, so a failure leaves
/// any earlier archive untouched and no partial one behind.
pub fn archive_directory(root: &Path) -> Result<ArchiveSummary> {
    archive_with(root, |p: &Path| File::open(p))
}

/// [`archive_directory`] with the source of each file's bytes supplied by
/// `open_entry`.
fn archive_with<R, F>(root: &Path, mut open_entry: F) -> Result<ArchiveSummary>
where
    R: Read,
    F: FnMut(&Path) -> io::Result<R>,
{
    let (parent, filename) = archive_location(root)?;
    if !root.is_dir() {
        return Err(ArchiveError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    let root_name = filename
        .strip_suffix(".zip")
        .unwrap_or(&filename)
        .to_string();
    let path = parent.join(&filename);
    let start = Instant::now();

    let mut temp = tempfile::Builder::new()
        .prefix(&format!(".{root_name}"))
        .suffix(".zip.tmp")
        .tempfile_in(&parent)
        .map_err(|source| ArchiveError::Io {
            path: parent.clone(),
            source,
        })?;

    let mut zip = ZipWriter::new(temp.as_file_mut());
    let dir_options = SimpleFileOptions::default();
    let file_options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut directories = 0usize;
    let mut files = 0usize;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let name = entry_name(&root_name, root, entry.path());
        let file_type = entry.file_type();
        if file_type.is_dir() {
            zip.add_directory(format!("{name}/"), dir_options)?;
            directories += 1;
        } else if file_type.is_file() {
            zip.start_file(name, file_options)?;
            let mut source = open_entry(entry.path()).map_err(|source| ArchiveError::Io {
                path: entry.path().to_path_buf(),
                source,
            })?;
            io::copy(&mut source, &mut zip).map_err(|source| ArchiveError::Io {
                path: entry.path().to_path_buf(),
                source,
            })?;
            files += 1;
        } else {
            debug!(path = %entry.path().display(), "skipping non-regular entry");
        }
    }
    zip.finish()?;

    temp.persist(&path).map_err(|error| ArchiveError::Io {
        path: path.clone(),
        source: error.error,
    })?;

    info!(
        archive = %path.display(),
        directories,
        files,
        duration_ms = start.elapsed().as_millis(),
        "archive written"
    );

    Ok(ArchiveSummary {
        path,
        filename,
        directories,
        files,
    })
}

/// `root_name` followed by the entry's path below `root`, `/`-separated.
fn entry_name(root_name: &str, root: &Path, path: &Path) -> String {
    let mut name = root_name.to_string();
    if let Ok(relative) = path.strip_prefix(root) {
        for component in relative.components() {
            name.push('/');
            name.push_str(&component.as_os_str().to_string_lossy());
        }
    }
    name
}
