//! Purpose: `endpoint-probe` CLI entry point for inspecting plugin endpoint JSON.
//! Role: Binary crate root; parses args, runs one typed accessor, emits JSON on stdout.
//! Invariants: Successful reads print exactly one JSON object on stdout.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: Logs go to stderr and never mix with stdout payloads.
#![allow(clippy::result_large_err)]
use std::io::{self, IsTerminal};

use clap::{Parser, Subcommand, ValueEnum, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

use plugin_endpoint::api::{Endpoint, Error, ErrorKind, ValueKind, to_exit_code};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Internal)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Try `endpoint-probe --help`."));
            }
        },
    };

    let endpoint = Endpoint::parse(cli.endpoint.as_deref().unwrap_or(""))?;

    match cli.command {
        Command::Get { key, kind, default } => {
            tracing::debug!(%key, kind = kind.as_str(), has_default = default.is_some(), "reading endpoint key");
            let value = read_value(&endpoint, &key, kind, default.as_deref())?;
            emit_json(json!({
                "key": key,
                "type": kind.as_str(),
                "value": value,
            }))?;
        }
        Command::Keys => {
            let mut keys: Vec<&str> = endpoint.keys().collect();
            keys.sort_unstable();
            emit_json(json!({ "keys": keys }))?;
        }
    }

    Ok(RunOutcome::ok())
}

#[derive(Parser)]
#[command(
    name = "endpoint-probe",
    version,
    about = "Read typed values out of a plugin endpoint JSON object",
    long_about = None,
    after_help = r#"EXAMPLES
  $ endpoint-probe --endpoint '{"bucket":"nightly","port":9000}' get bucket
  $ endpoint-probe --endpoint '{"port":9000}' get port --type number
  $ endpoint-probe --endpoint '{}' get tls --type boolean --default false
  $ endpoint-probe --endpoint '{"a":1,"b":2}' keys

EXIT CODES
  0 ok, 2 usage, 3 missing endpoint, 4 malformed endpoint,
  5 missing key, 6 type mismatch"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(long, global = true, help = "Endpoint configuration as a JSON object")]
    endpoint: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Read one key with a type check")]
    Get {
        #[arg(help = "Endpoint key to read")]
        key: String,
        #[arg(
            long = "type",
            value_enum,
            default_value = "string",
            help = "Expected value type"
        )]
        kind: AccessorType,
        #[arg(
            long,
            help = "Value to use when the key is absent (parsed according to --type)"
        )]
        default: Option<String>,
    },
    #[command(about = "List the endpoint's top-level keys")]
    Keys,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum AccessorType {
    String,
    Number,
    Boolean,
    Array,
    StringArray,
    Map,
}

impl AccessorType {
    fn as_str(self) -> &'static str {
        match self {
            AccessorType::String => "string",
            AccessorType::Number => "number",
            AccessorType::Boolean => "boolean",
            AccessorType::Array => "array",
            AccessorType::StringArray => "string-array",
            AccessorType::Map => "map",
        }
    }
}

fn read_value(
    endpoint: &Endpoint,
    key: &str,
    kind: AccessorType,
    default: Option<&str>,
) -> Result<Value, Error> {
    match (kind, default) {
        (AccessorType::String, None) => endpoint.string_value(key).map(Value::from),
        (AccessorType::String, Some(def)) => {
            endpoint.string_value_default(key, def).map(Value::from)
        }
        (AccessorType::Number, None) => endpoint.float_value(key).map(Value::from),
        (AccessorType::Number, Some(def)) => endpoint
            .float_value_default(key, parse_number_default(def)?)
            .map(Value::from),
        (AccessorType::Boolean, None) => endpoint.boolean_value(key).map(Value::from),
        (AccessorType::Boolean, Some(def)) => endpoint
            .boolean_value_default(key, parse_boolean_default(def)?)
            .map(Value::from),
        (AccessorType::Array, None) => endpoint.array_value(key).map(Value::Array),
        (AccessorType::StringArray, None) => endpoint.string_array_value(key).map(Value::from),
        (AccessorType::StringArray, Some(def)) => endpoint
            .string_array_value_default(key, parse_string_array_default(def)?)
            .map(Value::from),
        (AccessorType::Map, None) => endpoint.map_value(key).map(Value::Object),
        (AccessorType::Array | AccessorType::Map, Some(_)) => Err(Error::new(ErrorKind::Usage)
            .with_message(format!(
                "--default is not supported for --type {}",
                kind.as_str()
            ))
            .with_hint("Defaults exist for string, number, boolean, and string-array.")),
    }
}

fn parse_number_default(raw: &str) -> Result<f64, Error> {
    let value = raw.trim().parse::<f64>().map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message(format!("--default {raw:?} is not a number"))
            .with_source(err)
    })?;
    if !value.is_finite() {
        return Err(Error::new(ErrorKind::Usage)
            .with_message(format!("--default {raw:?} is not a finite number"))
            .with_hint("JSON numbers are finite; nan and inf are not accepted."));
    }
    Ok(value)
}

fn parse_boolean_default(raw: &str) -> Result<bool, Error> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::new(ErrorKind::Usage)
            .with_message(format!("--default {raw:?} is not a boolean"))
            .with_hint("Use `true` or `false`.")),
    }
}

fn parse_string_array_default(raw: &str) -> Result<Vec<String>, Error> {
    let value: Value = serde_json::from_str(raw).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message(format!("--default is not valid JSON: {err}"))
            .with_hint("Pass a JSON array of strings, e.g. --default '[\"a\",\"b\"]'.")
            .with_source(err)
    })?;
    let not_strings = |detail: String| {
        Error::new(ErrorKind::Usage)
            .with_message(format!("--default must be a JSON array of strings ({detail})"))
            .with_hint("Pass a JSON array of strings, e.g. --default '[\"a\",\"b\"]'.")
    };
    let items = match value {
        Value::Array(items) => items,
        other => return Err(not_strings(format!("found {}", ValueKind::of(&other)))),
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(text) => Ok(text),
            other => Err(not_strings(format!(
                "element {index} is {}",
                ValueKind::of(&other)
            ))),
        })
        .collect()
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn emit_json(value: Value) -> Result<(), Error> {
    let json = serde_json::to_string(&value).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("json encode failed")
            .with_source(err)
    })?;
    println!("{json}");
    Ok(())
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::MissingInput => "missing endpoint".to_string(),
        ErrorKind::MalformedInput => "malformed endpoint".to_string(),
        ErrorKind::MissingKey => "missing key".to_string(),
        ErrorKind::TypeMismatch => "type mismatch".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(key) = err.key() {
        inner.insert("key".to_string(), json!(key));
    }
    if let Some(index) = err.index() {
        inner.insert("index".to_string(), json!(index));
    }
    if let Some(expected) = err.expected() {
        inner.insert("expected".to_string(), json!(expected.as_str()));
    }
    if let Some(found) = err.found() {
        inner.insert("found".to_string(), json!(found.as_str()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
