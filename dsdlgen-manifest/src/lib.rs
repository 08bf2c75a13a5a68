/// Output plan for the bundled DSDL namespace -- computed at build time.
mod generated {
    include!(concat!(env!("OUT_DIR"), "/targets.rs"));
}

/// Every bundled type with the file its generated artifact will occupy,
/// as `(type, path)` in scan order.
pub fn targets() -> &'static [(&'static str, &'static str)] {
    generated::TARGETS
}

/// Planned output path for a type written as `namespace.Name.major.minor`.
pub fn target_for(type_name: &str) -> Option<&'static str> {
    generated::TARGETS
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, path)| *path)
}
