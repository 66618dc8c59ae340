//! Logic behind the `json-splice` binary.
//!
//! Usage:
//!   json-splice [--strict] <path> <value>
//!   json-splice [--strict] --remove <path>
//!
//! Arguments after `--` are never read as flags, so `-- /a --strict` sets
//! `/a` to the string `"--strict"`.
//!
//! `<path>` is either a JSON Pointer (`/customer/0/name`, `""` for the root)
//! or a JSON array of segments (`["customer", 0, "name"]`).

use json_splice_path::Path;

use crate::edit::{apply_edit_with, remove_at};
use crate::error::EditError;
use crate::options::{EditOptions, FailureMode};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CliError {
    Json(serde_json::Error),
    Path(String),
    Edit(EditError),
    Usage(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Json(e)  => write!(f, "{e}"),
            CliError::Path(e)  => write!(f, "Invalid path: {e}"),
            CliError::Edit(e)  => write!(f, "{e}"),
            CliError::Usage(e) => write!(f, "{e}"),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self { CliError::Json(e) }
}

impl From<EditError> for CliError {
    fn from(e: EditError) -> Self { CliError::Edit(e) }
}

// ── Arguments ─────────────────────────────────────────────────────────────

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub path: Path,
    pub value: Option<String>,
    pub remove: bool,
    pub strict: bool,
}

/// Parse a path argument: a JSON array of segments or a JSON Pointer.
pub fn parse_path_arg(arg: &str) -> Result<Path, CliError> {
    let trimmed = arg.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }
    if arg.is_empty() || arg.starts_with('/') {
        return Path::from_pointer(arg).map_err(|e| CliError::Path(e.to_string()));
    }
    Err(CliError::Path(format!(
        "{arg:?} is neither a JSON Pointer nor a JSON array"
    )))
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I, S>(args: I) -> Result<Args, CliError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut remove = false;
    let mut strict = false;
    let mut positional = Vec::new();
    let mut flags_done = false;
    for arg in args {
        match arg.as_ref() {
            other if flags_done => positional.push(other.to_string()),
            "--" => flags_done = true,
            "--remove" => remove = true,
            "--strict" => strict = true,
            other => positional.push(other.to_string()),
        }
    }

    let mut positional = positional.into_iter();
    let path = match positional.next() {
        Some(p) => parse_path_arg(&p)?,
        None => return Err(CliError::Usage("First argument must be a path.".into())),
    };
    let value = positional.next();
    if let Some(extra) = positional.next() {
        return Err(CliError::Usage(format!("Unexpected argument: {extra}")));
    }
    match (remove, &value) {
        (true, Some(_)) => Err(CliError::Usage("--remove takes no value.".into())),
        (false, None) => Err(CliError::Usage("Second argument must be the new value.".into())),
        _ => Ok(Args { path, value, remove, strict }),
    }
}

/// Apply the edit described by `args` to `document`.
pub fn run(args: &Args, document: &str) -> Result<String, CliError> {
    let mode = if args.strict {
        FailureMode::Strict
    } else {
        FailureMode::Fallback
    };
    let options = EditOptions { mode, ..EditOptions::default() };
    let output = match &args.value {
        Some(raw) if !args.remove => apply_edit_with(document, &args.path, raw, &options)?,
        _ => remove_at(document, &args.path, &options)?,
    };
    Ok(output)
}
