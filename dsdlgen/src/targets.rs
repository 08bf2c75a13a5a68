/// Output path planning: where the generator will write each type.
///
/// Paths are computed up front so a build system can declare its outputs
/// before generation runs. Nothing is written here.
use crate::descriptor::CompoundType;
use crate::paths::{resolve_path, PathError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One descriptor and the file its generated artifact occupies.
#[derive(Debug)]
pub struct Target<'a, T> {
    pub ty: &'a T,
    pub path: PathBuf,
}

/// Ordered map from descriptor to output path.
///
/// Entries are keyed by descriptor identity, not value: two equal
/// descriptors at different addresses are two entries even when they land on
/// the same path. Use [`TargetPaths::conflicts`] to find such collisions.
#[derive(Debug)]
pub struct TargetPaths<'a, T> {
    entries: Vec<Target<'a, T>>,
}

impl<'a, T> TargetPaths<'a, T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Output path of this exact descriptor instance.
    pub fn get(&self, ty: &T) -> Option<&Path> {
        self.entries
            .iter()
            .find(|e| std::ptr::eq(e.ty, ty))
            .map(|e| e.path.as_path())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target<'a, T>> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|e| e.path.as_path())
    }

    /// Output paths claimed by more than one descriptor, with the claimants
    /// in input order.
    pub fn conflicts(&self) -> BTreeMap<&Path, Vec<&'a T>> {
        let mut by_path: BTreeMap<&Path, Vec<&'a T>> = BTreeMap::new();
        for e in &self.entries {
            by_path.entry(e.path.as_path()).or_default().push(e.ty);
        }
        by_path.retain(|_, claimants| claimants.len() > 1);
        by_path
    }
}

impl<'s, 'a, T> IntoIterator for &'s TargetPaths<'a, T> {
    type Item = &'s Target<'a, T>;
    type IntoIter = std::slice::Iter<'s, Target<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for TargetPaths<'a, T> {
    type Item = Target<'a, T>;
    type IntoIter = std::vec::IntoIter<Target<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// `{short_name}_{major}_{minor}`
pub fn file_stem<T: CompoundType + ?Sized>(ty: &T) -> String {
    let version = ty.version();
    format!("{}_{}_{}", ty.short_name(), version.major, version.minor)
}

/// Path of `ty` under `output_dir`, without resolution.
///
/// Each namespace component becomes a directory. `extension` may be given
/// with or without its leading dot; an empty one adds no suffix.
pub fn target_path<T: CompoundType + ?Sized>(
    ty: &T,
    output_dir: &Path,
    extension: &str,
) -> PathBuf {
    let mut path = output_dir.to_path_buf();
    for component in ty.full_namespace().split('.') {
        path.push(component);
    }

    let stem = file_stem(ty);
    let extension = extension.strip_prefix('.').unwrap_or(extension);
    if extension.is_empty() {
        path.push(stem);
    } else {
        path.push(format!("{stem}.{extension}"));
    }
    path
}

/// Map every type to the file a generator will write for it.
///
/// One entry per input type, in input order. With `resolve_paths` each path
/// is made absolute and canonicalized the same way as
/// [`crate::paths::build_paths`].
pub fn generate_target_paths<'a, T: CompoundType>(
    types: &'a [T],
    output_dir: impl AsRef<Path>,
    extension: &str,
    resolve_paths: bool,
) -> Result<TargetPaths<'a, T>, PathError> {
    let base = output_dir.as_ref();
    let mut entries = Vec::with_capacity(types.len());

    for ty in types {
        let mut path = target_path(ty, base, extension);
        if resolve_paths {
            path = resolve_path(&path)?;
        }
        tracing::trace!(ty = %ty.full_name(), path = %path.display(), "planned target");
        entries.push(Target { ty, path });
    }

    Ok(TargetPaths { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{TypeDescriptor, Version};
    use pretty_assertions::assert_eq;

    fn temperature() -> TypeDescriptor {
        TypeDescriptor::new("acme.sensors", "Temperature", Version::new(1, 2))
    }

    #[test]
    fn test_file_stem() {
        let t = TypeDescriptor::new("ns", "Heartbeat", Version::new(10, 0));
        assert_eq!(file_stem(&t), "Heartbeat_10_0");
    }

    #[test]
    fn test_nested_namespace_path() {
        let types = vec![temperature()];
        let map = generate_target_paths(&types, "/out", ".json", false).unwrap();
        assert_eq!(
            map.get(&types[0]).unwrap(),
            Path::new("/out").join("acme").join("sensors").join("Temperature_1_2.json")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolved_path_matches_literal() {
        let types = vec![temperature()];
        let map = generate_target_paths(&types, "/out", ".json", true).unwrap();
        assert_eq!(
            map.get(&types[0]).unwrap(),
            Path::new("/out/acme/sensors/Temperature_1_2.json")
        );
    }

    #[test]
    fn test_extension_forms() {
        let t = temperature();
        let out = Path::new("out");
        assert_eq!(target_path(&t, out, ".h"), target_path(&t, out, "h"));
        assert_eq!(
            target_path(&t, out, ""),
            Path::new("out").join("acme").join("sensors").join("Temperature_1_2")
        );
    }

    #[test]
    fn test_resolve_makes_relative_output_absolute() {
        let types = vec![temperature()];
        let map = generate_target_paths(&types, "build/gen", ".c", true).unwrap();
        let path = map.get(&types[0]).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("build/gen/acme/sensors/Temperature_1_2.c"));
    }

    #[test]
    fn test_one_entry_per_type_in_order() {
        let types = vec![
            TypeDescriptor::new("b", "Second", Version::new(1, 0)),
            TypeDescriptor::new("a", "First", Version::new(0, 1)),
            temperature(),
        ];
        let map = generate_target_paths(&types, "/out", ".json", false).unwrap();
        assert_eq!(map.len(), 3);
        let order: Vec<&str> = map.iter().map(|e| e.ty.short_name.as_str()).collect();
        assert_eq!(order, vec!["Second", "First", "Temperature"]);
    }

    #[test]
    fn test_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let types = vec![
            temperature(),
            TypeDescriptor::new("acme", "Power", Version::new(2, 0)),
        ];
        let first = generate_target_paths(&types, dir.path(), ".json", true).unwrap();
        let second = generate_target_paths(&types, dir.path(), ".json", true).unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert!(std::ptr::eq(a.ty, b.ty));
            assert_eq!(a.path, b.path);
        }
    }

    // Equal descriptors stay distinct entries; the shared path is not deduplicated.
    #[test]
    fn test_equal_descriptors_share_a_path() {
        let types = vec![temperature(), temperature()];
        let map = generate_target_paths(&types, "/out", ".json", false).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&types[0]), map.get(&types[1]));

        let conflicts = map.conflicts();
        assert_eq!(conflicts.len(), 1);
        let claimants = conflicts.values().next().unwrap();
        assert!(std::ptr::eq(claimants[0], &types[0]));
        assert!(std::ptr::eq(claimants[1], &types[1]));
    }

    #[test]
    fn test_get_is_by_identity() {
        let types = vec![temperature()];
        let map = generate_target_paths(&types, "/out", ".json", false).unwrap();
        let lookalike = temperature();
        assert!(map.get(&lookalike).is_none());
    }

    #[test]
    fn test_no_conflicts_for_distinct_versions() {
        let types = vec![
            temperature(),
            TypeDescriptor::new("acme.sensors", "Temperature", Version::new(1, 3)),
        ];
        let map = generate_target_paths(&types, "/out", ".json", false).unwrap();
        assert!(map.conflicts().is_empty());
        assert_eq!(map.paths().count(), 2);
    }

    #[test]
    fn test_nothing_written() {
        let dir = tempfile::tempdir().unwrap();
        let types = vec![temperature()];
        generate_target_paths(&types, dir.path(), ".json", true).unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
