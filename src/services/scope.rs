use anyhow::{Context, Result};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::env;

/// Filter candidate config paths by scope and order them shallow→deep.
///
/// Every candidate is first coerced to an absolute path. With no scope
/// directory, the candidates are returned in the order given. With a scope
/// directory (resolved against the process working directory), a candidate
/// survives only if its parent directory equals the scope directory or is an
/// ancestor of it; survivors are sorted by the component count of their
/// parent directory, so configs near the repository root apply before deeper
/// ones. Equal-depth candidates keep their input order.
pub fn select_configs(
    paths: &[Utf8PathBuf],
    scope_dir: Option<&Utf8Path>,
) -> Result<Vec<Utf8PathBuf>> {
    let cwd = env::current_dir().context("Failed to read the process working directory")?;
    let cwd = Utf8PathBuf::try_from(cwd).context("Working directory is not valid UTF-8")?;

    let absolute: Vec<Utf8PathBuf> = paths.iter().map(|path| absolutize(path, &cwd)).collect();

    let Some(scope_dir) = scope_dir else {
        return Ok(absolute);
    };
    let scope = absolutize(scope_dir, &cwd);

    let mut retained: Vec<Utf8PathBuf> = Vec::new();
    for path in absolute {
        match path.parent() {
            Some(parent) if scope.starts_with(parent) => retained.push(path),
            _ => {
                tracing::debug!("Skipping {} (outside scope {})", path, scope);
            }
        }
    }

    // Stable sort: ties between equal-depth configs keep input order
    retained.sort_by_key(|path| path.parent().map_or(0, |parent| parent.components().count()));

    Ok(retained)
}

/// Coerce a path to absolute form.
///
/// Canonicalization resolves symlinks and `..` against the real filesystem;
/// when the path does not exist we fall back to lexical absolutization so
/// selection still works and the subsequent load reports the missing file.
fn absolutize(path: &Utf8Path, cwd: &Utf8Path) -> Utf8PathBuf {
    match path.canonicalize_utf8() {
        Ok(resolved) => resolved,
        Err(_) => {
            let joined = if path.is_absolute() {
                path.to_path_buf()
            } else {
                cwd.join(path)
            };
            lexical_normalize(&joined)
        }
    }
}

/// Eliminate `.` and `..` components without touching the filesystem.
fn lexical_normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut normalized = Utf8PathBuf::new();

    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                if !matches!(
                    normalized.components().next_back(),
                    None | Some(Utf8Component::RootDir) | Some(Utf8Component::Prefix(_))
                ) {
                    normalized.pop();
                }
            }
            other => normalized.push(other.as_str()),
        }
    }

    normalized
}
