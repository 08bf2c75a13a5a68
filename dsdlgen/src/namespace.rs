/// Orchestration around an external namespace parser.
use crate::descriptor::CompoundType;
use crate::paths::{build_paths, PathError};
use std::path::{Path, PathBuf};

/// A schema library entry point that turns one root namespace directory into
/// its compound types. `includes` are namespaces the root may reference.
pub trait NamespaceParser {
    type Type: CompoundType;
    type Error: std::error::Error + 'static;

    fn parse_namespace(
        &self,
        root: &Path,
        includes: &[PathBuf],
    ) -> Result<Vec<Self::Type>, Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error<E: std::error::Error + 'static> {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("root namespace {} yielded no types", .0.display())]
    EmptyNamespace(PathBuf),
    #[error(transparent)]
    Parser(E),
}

/// Parse every root namespace and collect all types into one list.
///
/// Roots must exist; includes need not. Roots are parsed in order, each with
/// the full include set. After each root the accumulated list must be
/// non-empty, so an empty root only fails while nothing has been collected
/// yet. Parser errors are returned untouched in [`Error::Parser`].
pub fn parse_all<P, R, I>(
    parser: &P,
    root_namespaces: R,
    extra_includes: I,
) -> Result<Vec<P::Type>, Error<P::Error>>
where
    P: NamespaceParser + ?Sized,
    R: IntoIterator,
    R::Item: AsRef<Path>,
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let root_namespace_paths = build_paths(root_namespaces, true, true)?;
    let extra_include_paths = build_paths(extra_includes, true, false)?;

    let mut types = Vec::new();
    for root in &root_namespace_paths {
        let parsed = parser
            .parse_namespace(root, &extra_include_paths)
            .map_err(Error::Parser)?;
        tracing::debug!(root = %root.display(), count = parsed.len(), "parsed root namespace");
        types.extend(parsed);

        if types.is_empty() {
            return Err(Error::EmptyNamespace(root.clone()));
        }
    }

    tracing::info!(
        roots = root_namespace_paths.len(),
        includes = extra_include_paths.len(),
        types = types.len(),
        "parsed all root namespaces"
    );
    Ok(types)
}
