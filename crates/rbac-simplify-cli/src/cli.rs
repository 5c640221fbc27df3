use std::path::PathBuf;

use clap::Parser;
use rbac_simplify::OutputFormat;

/// Canonicalize an RBAC rule list.
///
/// Merges every rule naming the same (apiGroup, resource) pair, unions
/// their verbs and prints the result sorted by apiGroup, resource and verb.
#[derive(Parser, Debug)]
#[command(name = "rbac-simplify", version, about = "Canonicalize an RBAC rule list")]
pub struct CliArgs {
    /// Input rule document (YAML or JSON)
    #[arg(short, long, value_name = "FILE", env = "RBAC_SIMPLIFY_INPUT_FILE")]
    pub input_file: Option<PathBuf>,

    /// Output format: yaml or json
    #[arg(short, long, value_name = "FORMAT", default_value = "yaml")]
    pub output: OutputFormat,
}
