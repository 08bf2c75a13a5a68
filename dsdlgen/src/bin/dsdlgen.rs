/// CLI: scans DSDL root namespaces and prints the file each type will be
/// generated into, so build systems can declare outputs ahead of time.
///
/// Usage:
///   dsdlgen -O build/gen -e .h uavcan
///   dsdlgen -O build/gen -e .json -I public_regulated_data_types/uavcan acme --format json
use clap::{Parser, ValueEnum};
use dsdlgen::{generate_target_paths, parse_all, CompoundType, FileNameScanner, Version};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// One output path per line
    Text,
    /// JSON array of type/path records
    Json,
}

#[derive(Parser)]
#[command(name = "dsdlgen")]
#[command(about = "Plan generated file paths for DSDL namespaces", long_about = None)]
#[command(version)]
struct Cli {
    /// Root namespace directories to generate from
    #[arg(required = true)]
    root_namespaces: Vec<PathBuf>,

    /// Namespace directories that roots may reference
    #[arg(short = 'I', long = "include")]
    includes: Vec<PathBuf>,

    /// Base directory for generated files
    #[arg(short = 'O', long, default_value = "dsdlgen_out")]
    outdir: PathBuf,

    /// Suffix of generated files, with or without the leading dot
    #[arg(short, long, default_value = ".json")]
    extension: String,

    /// Keep output paths relative instead of resolving them
    #[arg(long)]
    no_resolve: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Raise log verbosity (-v debug, -vv trace); DSDLGEN_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[derive(Serialize)]
struct TargetRecord<'a> {
    full_namespace: &'a str,
    short_name: &'a str,
    version: Version,
    path: &'a Path,
}

fn init_logging(verbose: u8, json: bool) {
    let default = match verbose {
        0 => "dsdlgen=warn",
        1 => "dsdlgen=debug",
        _ => "dsdlgen=trace",
    };
    let env_filter = EnvFilter::try_from_env("DSDLGEN_LOG").unwrap_or_else(|_| default.into());

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    let scanner = FileNameScanner::new();
    let types = parse_all(&scanner, &cli.root_namespaces, &cli.includes).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });

    let targets = generate_target_paths(&types, &cli.outdir, &cli.extension, !cli.no_resolve)
        .unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        });

    for (path, claimants) in targets.conflicts() {
        let names: Vec<String> = claimants.iter().map(|t| t.to_string()).collect();
        tracing::warn!(
            path = %path.display(),
            types = ?names,
            "output path claimed by several types"
        );
    }

    match cli.format {
        Format::Text => {
            for target in &targets {
                println!("{}", target.path.display());
            }
        }
        Format::Json => {
            let records: Vec<TargetRecord> = targets
                .iter()
                .map(|t| TargetRecord {
                    full_namespace: t.ty.full_namespace(),
                    short_name: t.ty.short_name(),
                    version: t.ty.version(),
                    path: &t.path,
                })
                .collect();
            let json = serde_json::to_string_pretty(&records).unwrap_or_else(|e| {
                eprintln!("Cannot encode output: {e}");
                std::process::exit(1);
            });
            println!("{json}");
        }
    }
}
