/// Build script: scans the bundled DSDL namespace, plans where each type's
/// generated file goes under OUT_DIR, and writes that plan to targets.rs for
/// inclusion in lib.rs.
use dsdlgen::{generate_target_paths, parse_all, FileNameScanner};
use std::fmt::Write;
use std::path::Path;

fn main() {
    let root_namespace = "dsdl/acme";
    println!("cargo:rerun-if-changed=dsdl");

    let types = parse_all(&FileNameScanner::new(), [root_namespace], Vec::<&str>::new())
        .expect("Cannot scan dsdl/acme");

    let out_dir = std::env::var("OUT_DIR").unwrap();
    let generated = Path::new(&out_dir).join("generated");
    let targets =
        generate_target_paths(&types, &generated, ".json", true).expect("Cannot plan target paths");

    let mut src = String::from("pub static TARGETS: &[(&str, &str)] = &[\n");
    for target in &targets {
        writeln!(
            src,
            "    ({:?}, {:?}),",
            target.ty.to_string(),
            target.path.display().to_string()
        )
        .unwrap();
    }
    src.push_str("];\n");

    let dest = Path::new(&out_dir).join("targets.rs");
    std::fs::write(&dest, src).expect("Cannot write generated targets.rs");
}
