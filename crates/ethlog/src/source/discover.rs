use std::fs;
use std::path::{Path, PathBuf};

use super::SourceError;

/// One input log file and the identifier its records are tagged with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub source_id: String,
}

/// List the regular files directly inside `dir` with the given extension,
/// ordered by file name.
pub fn discover(dir: &Path, extension: &str, suffix: &str) -> Result<Vec<SourceFile>, SourceError> {
    let scan_err = |source| SourceError::Scan {
        path: dir.to_path_buf(),
        source,
    };

    let mut sources = Vec::new();
    for entry in fs::read_dir(dir).map_err(scan_err)? {
        let entry = entry.map_err(scan_err)?;
        let path = entry.path();

        if !entry.file_type().map_err(scan_err)?.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            tracing::warn!("Skipping non UTF-8 file name: {}", path.display());
            continue;
        };

        let source_id = source_id(name, suffix);
        sources.push(SourceFile { path, source_id });
    }

    sources.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(sources)
}

/// `miner1_log.txt` → `miner1`; without the suffix, the file stem.
pub fn source_id(file_name: &str, suffix: &str) -> String {
    match file_name.strip_suffix(suffix) {
        Some(id) if !suffix.is_empty() && !id.is_empty() => id.to_string(),
        _ => Path::new(file_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(file_name)
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_id() {
        let cases = vec![
            ("miner1_log.txt", "miner1"),
            ("bootnode_log.txt", "bootnode"),
            ("miner2.txt", "miner2"),
            ("_log.txt", "_log"),
            ("a.b_log.txt", "a.b"),
        ];
        for (name, expected) in cases {
            assert_eq!(source_id(name, "_log.txt"), expected, "file: {}", name);
        }
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["miner2_log.txt", "miner1_log.txt", "notes.md", "miner3.txt"] {
            fs::write(tmp.path().join(name), "").unwrap();
        }
        fs::create_dir(tmp.path().join("nested.txt")).unwrap();

        let sources = discover(tmp.path(), "txt", "_log.txt").unwrap();
        let ids: Vec<&str> = sources.iter().map(|s| s.source_id.as_str()).collect();

        assert_eq!(ids, vec!["miner1", "miner2", "miner3"]);
        assert_eq!(sources[0].path, tmp.path().join("miner1_log.txt"));
    }

    #[test]
    fn test_discover_missing_dir() {
        let err = discover(Path::new("/nonexistent/logs"), "txt", "_log.txt").unwrap_err();
        assert!(matches!(err, SourceError::Scan { .. }));
    }
}
