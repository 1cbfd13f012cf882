use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};

/// Database file looked up under the invocation directory when no
/// `--database` override is given.
pub const DEFAULT_DATABASE_FILE: &str = "news.db";

/// Resolves the SQLite database path the analytics engine reads from.
///
/// The connection target is an explicit input rather than a fixed global:
/// an override may be absolute, relative to `cwd`, or `~`-prefixed against
/// the home directory. The result is lexically normalized.
pub fn resolve_database_path(
    home_dir: Option<&Path>,
    cwd: &Path,
    database_override: Option<&Path>,
) -> Result<PathBuf> {
    if !cwd.is_absolute() {
        bail!("cwd must be absolute: {}", cwd.display());
    }

    let target = database_override.unwrap_or(Path::new(DEFAULT_DATABASE_FILE));
    let expanded = expand_tilde(target, home_dir)?;
    let resolved = if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    };

    Ok(normalize_lexical(&resolved))
}

fn expand_tilde(path: &Path, home_dir: Option<&Path>) -> Result<PathBuf> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let Some(home_dir) = home_dir else {
                bail!(
                    "HOME is not set; pass an absolute --database path instead of {}",
                    path.display()
                );
            };
            let mut expanded = home_dir.to_path_buf();
            for component in components {
                expanded.push(component.as_os_str());
            }
            Ok(expanded)
        }
        Some(Component::Normal(first))
            if first
                .to_str()
                .is_some_and(|segment| segment.starts_with('~')) =>
        {
            bail!(
                "unsupported home expansion syntax (only `~` and `~/...` are supported): {}",
                path.display()
            )
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn normalize_lexical(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component.as_os_str());
                }
            }
            _ => normalized.push(component.as_os_str()),
        }
    }

    normalized
}
