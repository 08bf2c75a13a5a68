/// Path normalization for namespace and output locations.
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("{} did not exist", .0.display())]
    ResourceNotFound(PathBuf),
    #[error("cannot resolve {}: {source}", path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Build a list of paths from path-like inputs, keeping input order.
///
/// With `resolve_paths` every path is made absolute and canonicalized by
/// [`resolve_path`]. With `required` every path must exist; the first one
/// that does not is reported as given by the caller.
pub fn build_paths<I>(
    paths: I,
    resolve_paths: bool,
    required: bool,
) -> Result<Vec<PathBuf>, PathError>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let mut result = Vec::new();
    for raw in paths {
        let raw = raw.as_ref();
        let path = if resolve_paths {
            resolve_path(raw)?
        } else {
            raw.to_path_buf()
        };

        if required && !path.exists() {
            return Err(PathError::ResourceNotFound(raw.to_path_buf()));
        }

        tracing::debug!(input = %raw.display(), path = %path.display(), "built path");
        result.push(path);
    }
    Ok(result)
}

/// Make `path` absolute and follow symlinks as far as the filesystem allows.
///
/// Components are walked left to right. Every prefix that exists is replaced
/// by its canonical form, so `link/..` lands next to the link target. Once a
/// prefix no longer exists the rest is appended with `.` and `..` folded
/// lexically. Unlike [`fs::canonicalize`] this never fails on a missing path.
pub fn resolve_path(path: &Path) -> Result<PathBuf, PathError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|source| PathError::Resolve {
            path: path.to_path_buf(),
            source,
        })?;
        cwd.join(path)
    };

    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                resolved.push(name);
                if let Ok(canonical) = fs::canonicalize(&resolved) {
                    resolved = canonical;
                }
            }
        }
    }
    Ok(resolved)
}
