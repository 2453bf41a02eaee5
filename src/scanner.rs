use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// One date expression and the page it was scraped from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    pub page_year: u32,
    #[serde(default)]
    pub page_is_bc: Option<bool>,
}

/// A fragment file discovered under the input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentFile {
    /// File name without extension; names the output artifact.
    pub stem: String,
    pub path: PathBuf,
}

/// Find every `*.jsonl` fragment file under `root`, sorted by path.
///
/// Expected layout is free-form; one file per scraped page, e.g.
///   {root}/years/1066.jsonl
///   {root}/time_periods/bronze_age.jsonl
///
/// Hidden files and directories are skipped.
pub fn scan_fragment_files(root: &Path) -> Result<Vec<FragmentFile>> {
    let mut results = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name().to_str().unwrap_or("")));

    for entry in walker {
        let entry = entry.map_err(|source| Error::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("jsonl")
        {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        results.push(FragmentFile {
            stem: stem.to_string(),
            path: path.to_path_buf(),
        });
    }

    Ok(results)
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Read one fragment per non-blank line. A malformed line is an error
/// naming the file and its 1-based line number.
pub fn read_fragments(path: &Path) -> Result<Vec<Fragment>> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_fragments(&contents, path)
}

fn parse_fragments(contents: &str, path: &Path) -> Result<Vec<Fragment>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|source| Error::InvalidFragment {
                file: path.to_path_buf(),
                line: i + 1,
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragments_skips_blank_lines() {
        let body = r#"{"text": "490 BC", "page_year": 490, "page_is_bc": true}

{"text": "1990s", "page_year": 1990}
"#;
        let frags = parse_fragments(body, Path::new("x.jsonl")).unwrap();
        assert_eq!(frags.len(), 2);
        assert_eq!(frags[0].page_is_bc, Some(true));
        assert_eq!(frags[1].text, "1990s");
        assert_eq!(frags[1].page_is_bc, None);
    }

    #[test]
    fn test_parse_fragments_reports_line() {
        let body = "{\"text\": \"1066\", \"page_year\": 1066}\n\n{\"text\": 5}\n";
        match parse_fragments(body, Path::new("pages/x.jsonl")) {
            Err(Error::InvalidFragment { file, line, .. }) => {
                assert_eq!(file, PathBuf::from("pages/x.jsonl"));
                assert_eq!(line, 3);
            }
            other => panic!("expected InvalidFragment, got {other:?}"),
        }
    }

    #[test]
    fn test_scan_finds_sorted_jsonl_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("years")).unwrap();
        std::fs::create_dir_all(root.join(".cache")).unwrap();
        std::fs::write(root.join("years/1066.jsonl"), "").unwrap();
        std::fs::write(root.join("bronze_age.jsonl"), "").unwrap();
        std::fs::write(root.join("notes.txt"), "").unwrap();
        std::fs::write(root.join(".cache/skip.jsonl"), "").unwrap();

        let files = scan_fragment_files(root).unwrap();
        let stems: Vec<&str> = files.iter().map(|f| f.stem.as_str()).collect();
        assert_eq!(stems, ["bronze_age", "1066"]);
    }

    #[test]
    fn test_read_fragments_missing_file() {
        let err = read_fragments(Path::new("/nonexistent/x.jsonl")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
