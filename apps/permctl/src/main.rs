//! Command-line conversion of portal permission documents.

#![forbid(unsafe_code)]

mod permctl_config;

use std::env;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gazette_application::PermissionCodec;
use gazette_core::{AppError, AppResult};
use gazette_domain::{DetailedPermissions, PermissionCatalog, to_detailed, to_flat_list};
use serde_json::Value;
use tracing::{info, warn};

use crate::permctl_config::{init_tracing, load_codec_config};

#[derive(Parser)]
#[command(
    name = "permctl",
    about = "Convert portal permissions between the checkbox grid and flat lists"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read a nested permission object on stdin and print the flat list.
    Encode {
        /// Sort the output and drop duplicates.
        #[arg(long)]
        canonical: bool,
    },

    /// Read a flat permission list on stdin and print the nested object.
    Decode {
        /// Fail on the first malformed entry instead of dropping it.
        #[arg(long)]
        strict: bool,
    },

    /// Read a flat permission list on stdin and print the full catalog grid.
    Grid,

    /// Print every permission the portal catalog knows.
    Catalog,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let result = run(
        cli.command,
        &|name: &str| env::var(name).ok(),
        io::stdin().lock(),
        io::stdout().lock(),
    );
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("permctl: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    command: Command,
    env_lookup: &dyn Fn(&str) -> Option<String>,
    input: impl Read,
    output: impl Write,
) -> AppResult<()> {
    match command {
        Command::Encode { canonical } => {
            let codec = PermissionCodec::default();
            let detailed: DetailedPermissions = read_json(input)?;
            let flat = if canonical {
                codec.encode_canonical(&detailed)
            } else {
                codec.encode(&detailed)
            };
            info!(granted_count = flat.len(), "encoded permissions");
            write_json(output, &flat)
        }
        Command::Decode { strict } => {
            let codec = PermissionCodec::new(load_codec_config(strict, env_lookup)?);
            let flat = read_flat_list(input)?;
            let detailed = codec.decode(&flat)?;
            info!(
                decode_mode = %codec.decode_mode(),
                granted_count = detailed.granted_count(),
                "decoded permissions"
            );
            write_json(output, &detailed)
        }
        Command::Grid => {
            let (grid, unknown) = catalog_grid(read_flat_list(input)?);
            for permission in &unknown {
                warn!(permission = %permission, "granted permission is not in the catalog");
            }
            write_json(output, &grid)
        }
        Command::Catalog => {
            let catalog = PermissionCatalog::portal();
            let mut all = DetailedPermissions::new();
            for (category, action) in catalog.pairs() {
                all.grant(category, action);
            }
            write_json(output, &to_flat_list(&all))
        }
    }
}

/// Lays flat grants out on the portal grid, returning grants outside it too.
fn catalog_grid(flat: Vec<String>) -> (DetailedPermissions, Vec<String>) {
    let catalog = PermissionCatalog::portal();
    let granted = to_detailed(flat);
    (catalog.grid(&granted), catalog.unknown(&granted))
}

fn read_json<T: serde::de::DeserializeOwned>(mut input: impl Read) -> AppResult<T> {
    let mut buffer = String::new();
    input
        .read_to_string(&mut buffer)
        .map_err(|error| AppError::Internal(format!("failed to read input: {error}")))?;

    serde_json::from_str(buffer.as_str())
        .map_err(|error| AppError::Validation(format!("invalid JSON input: {error}")))
}

/// Reads a JSON array of strings. Non-string items become empty entries so
/// the codec treats them like any other malformed entry.
fn read_flat_list(input: impl Read) -> AppResult<Vec<String>> {
    let values: Vec<Value> = read_json(input)?;
    Ok(values
        .into_iter()
        .map(|value| match value {
            Value::String(value) => value,
            _ => String::new(),
        })
        .collect())
}

fn write_json<T: serde::Serialize>(mut output: impl Write, value: &T) -> AppResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|error| AppError::Internal(format!("failed to render JSON: {error}")))?;

    writeln!(output, "{rendered}")
        .map_err(|error| AppError::Internal(format!("failed to write output: {error}")))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use gazette_core::{AppError, AppResult};
    use serde_json::{Value, json};

    use super::{Cli, Command, catalog_grid, run};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn run_json(command: Command, input: &str) -> AppResult<Value> {
        let mut output = Vec::new();
        run(command, &no_env, input.as_bytes(), &mut output)?;
        serde_json::from_slice(&output)
            .map_err(|error| AppError::Internal(format!("output is not JSON: {error}")))
    }

    #[test]
    fn decode_accepts_strict_flag() {
        let cli = Cli::try_parse_from(["permctl", "decode", "--strict"]);
        assert!(matches!(
            cli.map(|cli| cli.command),
            Ok(Command::Decode { strict: true })
        ));
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["permctl", "grant"]).is_err());
    }

    #[test]
    fn encode_prints_granted_pairs_in_document_order() {
        let output = run_json(
            Command::Encode { canonical: false },
            r#"{"users":{"read":true,"write":false},"groups":{"manage":true}}"#,
        );
        assert_eq!(output.ok(), Some(json!(["users.read", "groups.manage"])));
    }

    #[test]
    fn encode_canonical_sorts_output() {
        let output = run_json(
            Command::Encode { canonical: true },
            r#"{"users":{"write":true,"read":true},"audit":{"read":true}}"#,
        );
        assert_eq!(
            output.ok(),
            Some(json!(["audit.read", "users.read", "users.write"]))
        );
    }

    #[test]
    fn encode_ignores_decode_mode_setting() {
        let invalid_mode = |_: &str| Some("sometimes".to_owned());
        let mut output = Vec::new();
        let result = run(
            Command::Encode { canonical: false },
            &invalid_mode,
            r#"{"laws":{"read":true}}"#.as_bytes(),
            &mut output,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn decode_drops_non_string_and_malformed_items() {
        let output = run_json(
            Command::Decode { strict: false },
            r#"["billing.view", 42, null, "billing", "billing.export"]"#,
        );
        assert_eq!(
            output.ok(),
            Some(json!({"billing": {"view": true, "export": true}}))
        );
    }

    #[test]
    fn strict_decode_fails_on_non_string_items() {
        let output = run_json(Command::Decode { strict: true }, r#"["laws.read", 7]"#);
        assert!(matches!(output, Err(AppError::Validation(_))));
    }

    #[test]
    fn grid_outputs_explicit_false_flags() {
        let output = run_json(Command::Grid, r#"["laws.publish", "billing.view"]"#);
        let grid = output.unwrap_or_default();

        assert_eq!(grid["laws"]["publish"], json!(true));
        assert_eq!(grid["laws"]["read"], json!(false));
        assert_eq!(grid["settings"]["update"], json!(false));
        assert!(grid.get("billing").is_none());
    }

    #[test]
    fn grid_reports_grants_outside_the_catalog() {
        let (grid, unknown) = catalog_grid(vec![
            "users.read".to_owned(),
            "billing.view".to_owned(),
        ]);
        assert!(grid.is_granted("users", "read"));
        assert_eq!(unknown, vec!["billing.view"]);
    }

    #[test]
    fn catalog_lists_every_portal_permission() {
        let output = run_json(Command::Catalog, "");
        let entries = output
            .ok()
            .and_then(|value| value.as_array().map(Vec::len));
        assert_eq!(entries, Some(34));
    }

    #[test]
    fn invalid_json_is_a_validation_error() {
        let output = run_json(Command::Decode { strict: false }, "{not json");
        assert!(matches!(output, Err(AppError::Validation(_))));

        let output = run_json(Command::Encode { canonical: false }, r#"["users.read"]"#);
        assert!(matches!(output, Err(AppError::Validation(_))));
    }
}
