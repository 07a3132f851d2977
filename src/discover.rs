//! Input discovery: which files to check and in what order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::engine::SourceDocument;

#[derive(Debug, thiserror::Error)]
pub enum DiscoverError {
    #[error("failed to list {path}: {source}")]
    ListDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("scan path {0} does not exist")]
    MissingScanPath(String),
}

/// `*.json` files directly under `dir`, sorted. A missing directory is empty.
pub fn workflow_files(dir: &Path) -> Result<Vec<PathBuf>, DiscoverError> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "workflow directory not found");
        return Ok(Vec::new());
    }
    let mut files: Vec<PathBuf> = list_dir(dir)?
        .into_iter()
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "json"))
        .collect();
    files.sort();
    Ok(files)
}

/// Files under each scan path. Directories are walked recursively, `.git`
/// skipped. Paths appear once, in sorted order per scan path.
pub fn auxiliary_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, DiscoverError> {
    let mut out = Vec::new();
    for path in paths {
        if path.is_file() {
            out.push(path.clone());
        } else if path.is_dir() {
            let mut found = Vec::new();
            walk(path, &mut found)?;
            found.sort();
            out.extend(found);
        } else {
            return Err(DiscoverError::MissingScanPath(path.display().to_string()));
        }
    }
    let mut seen = HashSet::new();
    out.retain(|p| seen.insert(identity(p)));
    Ok(out)
}

/// Read a file as text. Invalid UTF-8 is replaced, not rejected, since the
/// token scan is textual.
pub fn read_document(path: &Path) -> Result<String, DiscoverError> {
    std::fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|source| DiscoverError::Read {
            path: path.display().to_string(),
            source,
        })
}

/// Discover and load everything: workflows first, then auxiliary files not
/// already loaded as workflows.
pub fn load_documents(
    workflows_dir: &Path,
    scan_paths: &[PathBuf],
) -> Result<Vec<SourceDocument>, DiscoverError> {
    let workflows = workflow_files(workflows_dir)?;
    let auxiliary = auxiliary_files(scan_paths)?;

    let mut docs = Vec::with_capacity(workflows.len() + auxiliary.len());
    for path in &workflows {
        docs.push(SourceDocument::workflow(
            path.display().to_string(),
            read_document(path)?,
        ));
    }
    let workflow_ids: HashSet<PathBuf> = workflows.iter().map(|p| identity(p)).collect();
    for path in auxiliary.iter().filter(|p| !workflow_ids.contains(&identity(p))) {
        docs.push(SourceDocument::auxiliary(
            path.display().to_string(),
            read_document(path)?,
        ));
    }
    debug!(
        workflows = workflows.len(),
        auxiliary = docs.len() - workflows.len(),
        "discovered documents"
    );
    Ok(docs)
}

fn list_dir(dir: &Path) -> Result<Vec<PathBuf>, DiscoverError> {
    let entries = std::fs::read_dir(dir).map_err(|source| DiscoverError::ListDir {
        path: dir.display().to_string(),
        source,
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DiscoverError::ListDir {
            path: dir.display().to_string(),
            source,
        })?;
        paths.push(entry.path());
    }
    Ok(paths)
}

/// Same file under any spelling (`./x`, absolute, via `..`). Falls back to the
/// path itself when it cannot be resolved.
fn identity(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), DiscoverError> {
    for path in list_dir(dir)? {
        if path.is_dir() {
            if path.file_name().is_some_and(|n| n == ".git") {
                continue;
            }
            walk(&path, out)?;
        } else if path.is_file() {
            out.push(path);
        }
    }
    Ok(())
}
