use std::fs;
use std::io::{IsTerminal, Read};

use crate::records::invalid_input_error;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum SourceKind {
    File,
    Stdin,
}

impl SourceKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stdin => "stdin",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSource {
    pub(crate) source_kind: SourceKind,
    pub(crate) source_ref: Option<String>,
    pub(crate) content: String,
}

/// Picks the record source: a file path, `-` for stdin, or piped stdin when
/// no path is given. Stdin is only read when no file path was supplied.
pub(crate) fn resolve_source(
    path: Option<String>,
    stdin_override: Option<String>,
) -> ClientResult<ResolvedSource> {
    match path {
        Some(path_value) if path_value != "-" => {
            let file_body = fs::read_to_string(&path_value).map_err(|error| {
                ClientError::invalid_argument_with_recovery(
                    &format!("Could not read record file `{path_value}`: {error}"),
                    vec![
                        "Verify the path exists and is readable.".to_string(),
                        "Or pipe records on stdin and pass `-` as the path.".to_string(),
                    ],
                )
            })?;
            Ok(ResolvedSource {
                source_kind: SourceKind::File,
                source_ref: Some(path_value),
                content: file_body,
            })
        }
        Some(_) => match non_empty_stdin(stdin_override)? {
            Some(content) => Ok(stdin_source(content)),
            None => Err(invalid_input_error(
                "Path `-` means stdin input, but stdin was empty. Pipe JSON/CSV records or pass a file path.",
            )),
        },
        None => match non_empty_stdin(stdin_override)? {
            Some(content) => Ok(stdin_source(content)),
            None => Err(invalid_input_error(
                "No record source provided. Pass a file path or pipe records via stdin.",
            )),
        },
    }
}

fn stdin_source(content: String) -> ResolvedSource {
    ResolvedSource {
        source_kind: SourceKind::Stdin,
        source_ref: None,
        content,
    }
}

fn non_empty_stdin(stdin_override: Option<String>) -> ClientResult<Option<String>> {
    let body = read_stdin(stdin_override)?;
    Ok(body.filter(|value| !value.trim().is_empty()))
}

fn read_stdin(stdin_override: Option<String>) -> ClientResult<Option<String>> {
    if let Some(value) = stdin_override {
        return Ok(Some(value));
    }

    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|error| {
            ClientError::invalid_argument_with_recovery(
                &format!("Could not read stdin: {error}"),
                vec![
                    "Retry with an explicit file path argument.".to_string(),
                    "Or rerun with valid stdin content.".to_string(),
                ],
            )
        })?;

    Ok(Some(buffer))
}
