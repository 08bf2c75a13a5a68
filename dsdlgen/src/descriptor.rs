/// Compound type descriptors as seen by this crate.
/// Parsers own the real type model; only the namespace, short name and
/// version are read here.
use serde::Serialize;
use std::fmt;

/// Major/minor version pair of a DSDL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// The three descriptor fields needed to plan an output path.
pub trait CompoundType {
    /// Dot-delimited namespace, e.g. `uavcan.node`.
    fn full_namespace(&self) -> &str;
    fn short_name(&self) -> &str;
    fn version(&self) -> Version;

    /// `{namespace}.{short_name}`
    fn full_name(&self) -> String {
        format!("{}.{}", self.full_namespace(), self.short_name())
    }
}

/// Plain owned descriptor, produced by [`crate::scanner::FileNameScanner`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    pub full_namespace: String,
    pub short_name: String,
    pub version: Version,
    /// Fixed port identifier, when the file name carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_port_id: Option<u32>,
}

impl TypeDescriptor {
    pub fn new(
        full_namespace: impl Into<String>,
        short_name: impl Into<String>,
        version: Version,
    ) -> Self {
        Self {
            full_namespace: full_namespace.into(),
            short_name: short_name.into(),
            version,
            fixed_port_id: None,
        }
    }
}

impl CompoundType for TypeDescriptor {
    fn full_namespace(&self) -> &str {
        &self.full_namespace
    }

    fn short_name(&self) -> &str {
        &self.short_name
    }

    fn version(&self) -> Version {
        self.version
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.full_name(), self.version)
    }
}
