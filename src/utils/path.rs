//! Path utilities: expand ~, build dataset file names.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Dataset names end up in a file name; keep them to one path component.
pub fn sanitize_dataset(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            other => other,
        })
        .collect();
    if cleaned.is_empty() {
        "default".to_string()
    } else {
        cleaned
    }
}

/// `<dir>/Ant events <dataset>.csv`
pub fn dataset_file(dir: &Path, dataset: &str) -> PathBuf {
    dir.join(format!("Ant events {}.csv", sanitize_dataset(dataset)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_name_becomes_one_file() {
        let p = dataset_file(Path::new("/data"), "nest 3/east");
        assert_eq!(p, PathBuf::from("/data/Ant events nest 3_east.csv"));
        let p = dataset_file(Path::new("/data"), "  ");
        assert_eq!(p, PathBuf::from("/data/Ant events default.csv"));
    }
}
