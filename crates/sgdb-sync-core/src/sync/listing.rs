//! Existing artwork lookup in a user's grid folder

use std::fs;
use std::path::Path;

/// File names in `grid_dir` that belong to `app_id`, sorted
///
/// A file belongs to the shortcut when its name starts with the decimal app
/// ID and the next character is not another digit, so `305620p.png` matches
/// 305620 but `3056201.png` does not. A missing folder yields an empty list.
pub fn existing_artwork(grid_dir: &Path, app_id: u32) -> Vec<String> {
    let Ok(entries) = fs::read_dir(grid_dir) else {
        return Vec::new();
    };

    let prefix = app_id.to_string();
    let mut files: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().to_str().map(str::to_owned))
        .filter(|name| belongs_to(name, &prefix))
        .collect();

    files.sort();
    files
}

fn belongs_to(file_name: &str, prefix: &str) -> bool {
    file_name
        .strip_prefix(prefix)
        .is_some_and(|rest| !rest.starts_with(|c: char| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_existing_artwork() {
        let temp = TempDir::new().unwrap();
        for name in [
            "305620p.png",
            "305620_logo.png",
            "305620.png",
            "3056201.png",
            "504230_hero.png",
        ] {
            fs::write(temp.path().join(name), b"png").unwrap();
        }
        fs::create_dir_all(temp.path().join("305620_dir")).unwrap();

        assert_eq!(
            existing_artwork(temp.path(), 305620),
            vec!["305620.png", "305620_logo.png", "305620p.png"]
        );
        assert_eq!(existing_artwork(temp.path(), 504230), vec!["504230_hero.png"]);
        assert!(existing_artwork(temp.path(), 1).is_empty());
    }

    #[test]
    fn test_missing_grid_dir() {
        let temp = TempDir::new().unwrap();
        assert!(existing_artwork(&temp.path().join("grid"), 305620).is_empty());
    }
}
