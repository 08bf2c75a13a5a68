/// File-name based namespace discovery.
///
/// DSDL definitions follow a naming convention that already carries
/// everything path planning needs:
///
///   <root>/<sub>/.../[<fixed port id>.]<ShortName>.<major>.<minor>.{uavcan,dsdl}
///
/// The scanner reads only directory entries, never file content, so it can
/// stand in for a full schema parser wherever just the type list is needed.
use crate::descriptor::{TypeDescriptor, Version};
use crate::namespace::NamespaceParser;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recognized definition file extensions.
pub const DEFINITION_EXTENSIONS: &[&str] = &["uavcan", "dsdl"];

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("root namespace {} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
    #[error("malformed definition file name: {}", .0.display())]
    InvalidFileName(PathBuf),
    #[error("invalid {what} '{value}' in {}", file.display())]
    InvalidNumber {
        file: PathBuf,
        what: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct FileNameScanner;

impl FileNameScanner {
    pub fn new() -> Self {
        Self
    }

    /// All definitions below `root`, sorted by path. Symlinked files and
    /// directories are followed; a link cycle is a [`ScanError::Walk`].
    pub fn scan(&self, root: &Path) -> Result<Vec<TypeDescriptor>, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }
        let root_name = root
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ScanError::NotADirectory(root.to_path_buf()))?;

        let mut types = Vec::new();
        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_definition(entry.path()) {
                continue;
            }

            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let mut namespace = vec![root_name.to_string()];
            if let Some(parent) = relative.parent() {
                for component in parent.components() {
                    let name = component
                        .as_os_str()
                        .to_str()
                        .ok_or_else(|| ScanError::InvalidFileName(entry.path().to_path_buf()))?;
                    namespace.push(name.to_string());
                }
            }

            let descriptor = parse_file_name(entry.path(), namespace.join("."))?;
            tracing::trace!(file = %entry.path().display(), ty = %descriptor, "found definition");
            types.push(descriptor);
        }
        Ok(types)
    }
}

impl NamespaceParser for FileNameScanner {
    type Type = TypeDescriptor;
    type Error = ScanError;

    /// Include paths carry no types of their own; they only matter when
    /// references are resolved, which file names alone cannot do.
    fn parse_namespace(
        &self,
        root: &Path,
        includes: &[PathBuf],
    ) -> Result<Vec<TypeDescriptor>, ScanError> {
        tracing::debug!(root = %root.display(), includes = includes.len(), "scanning namespace");
        self.scan(root)
    }
}

fn is_definition(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| DEFINITION_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Split `[port.]Name.major.minor.ext` into a descriptor.
fn parse_file_name(path: &Path, full_namespace: String) -> Result<TypeDescriptor, ScanError> {
    let invalid = || ScanError::InvalidFileName(path.to_path_buf());
    let file_name = path.file_name().and_then(|n| n.to_str()).ok_or_else(invalid)?;
    let parts: Vec<&str> = file_name.split('.').collect();

    let (port, name, major, minor) = match parts.as_slice() {
        [name, major, minor, _ext] => (None, *name, *major, *minor),
        [port, name, major, minor, _ext] => (Some(*port), *name, *major, *minor),
        _ => return Err(invalid()),
    };

    let starts_with_letter = name.chars().next().map(|c| c.is_ascii_alphabetic()).unwrap_or(false);
    if !starts_with_letter || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid());
    }

    let number = |what: &'static str, value: &str| {
        value.parse::<u32>().map_err(|_| ScanError::InvalidNumber {
            file: path.to_path_buf(),
            what,
            value: value.to_string(),
        })
    };

    let mut descriptor = TypeDescriptor::new(
        full_namespace,
        name,
        Version::new(number("major version", major)?, number("minor version", minor)?),
    );
    descriptor.fixed_port_id = port.map(|p| number("fixed port id", p)).transpose()?;
    Ok(descriptor)
}
