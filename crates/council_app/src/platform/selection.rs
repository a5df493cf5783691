//! Turns paths typed at the prompt into `SelectedFile`s, playing the part of
//! a file picker restricted to the accepted categories.

use std::fs;
use std::path::{Path, PathBuf};

use council_core::{is_accepted_mime, SelectedFile};
use council_logging::council_warn;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub files: Vec<SelectedFile>,
    /// Human-readable reasons for paths that never reached the picker result.
    pub skipped: Vec<String>,
}

pub fn select_files(paths: &[PathBuf]) -> Selection {
    let mut selection = Selection::default();
    for path in paths {
        match describe(path) {
            Ok(file) => selection.files.push(file),
            Err(reason) => {
                council_warn!("Skipping {:?}: {}", path, reason);
                selection.skipped.push(reason);
            }
        }
    }
    selection
}

fn describe(path: &Path) -> Result<SelectedFile, String> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let meta = fs::metadata(path).map_err(|err| format!("{name}: {err}"))?;
    if !meta.is_file() {
        return Err(format!("{name} is not a file"));
    }

    let mime_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or_default()
        .to_string();
    if !is_accepted_mime(&mime_type) {
        return Err(format!("{name} is not an image, PDF or text file"));
    }

    Ok(SelectedFile {
        path: path.to_path_buf(),
        name,
        size: meta.len(),
        mime_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn keeps_order_and_guesses_mime() {
        let temp = TempDir::new().unwrap();
        let paths = vec![
            write(&temp, "notes.txt", b"abc"),
            write(&temp, "photo.png", b"\x89PNG"),
            write(&temp, "paper.pdf", b"%PDF"),
        ];

        let selection = select_files(&paths);
        assert!(selection.skipped.is_empty());
        let described: Vec<_> = selection
            .files
            .iter()
            .map(|f| (f.name.as_str(), f.mime_type.as_str(), f.size))
            .collect();
        assert_eq!(
            described,
            vec![
                ("notes.txt", "text/plain", 3),
                ("photo.png", "image/png", 4),
                ("paper.pdf", "application/pdf", 4),
            ]
        );
    }

    #[test]
    fn filters_unaccepted_and_missing_paths() {
        let temp = TempDir::new().unwrap();
        let paths = vec![
            write(&temp, "archive.zip", b"PK"),
            temp.path().join("missing.txt"),
            temp.path().to_path_buf(),
            write(&temp, "ok.txt", b"fine"),
        ];

        let selection = select_files(&paths);
        let names: Vec<_> = selection.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["ok.txt"]);
        assert_eq!(selection.skipped.len(), 3);
    }
}
