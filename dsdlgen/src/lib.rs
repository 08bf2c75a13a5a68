//! Build-time plumbing for DSDL code generators.
//!
//! The pipeline has three stages, each taking the previous one's output:
//! [`paths::build_paths`] resolves namespace directories,
//! [`namespace::parse_all`] runs a [`NamespaceParser`] over every root
//! namespace, and [`targets::generate_target_paths`] decides which file each
//! type will be generated into.

pub mod descriptor;
pub mod namespace;
pub mod paths;
pub mod scanner;
pub mod targets;

pub use descriptor::{CompoundType, TypeDescriptor, Version};
pub use namespace::{parse_all, Error, NamespaceParser};
pub use paths::{build_paths, resolve_path, PathError};
pub use scanner::{FileNameScanner, ScanError};
pub use targets::{generate_target_paths, Target, TargetPaths};
