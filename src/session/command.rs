//! Parsing of what the user types at the language prompt.

use crate::error::InputError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Help,
    Quit,
    /// `list` / `ls`, with an optional name prefix.
    List(String),
    Run(String),
    ShowJargon(String),
    CreateJargon(String),
    DeleteJargon(String),
    ShowAlias(String),
    CreateAlias { alias: String, language: String },
    DeleteAlias(String),
}

pub fn parse(line: &str) -> Result<Command, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }
    if ["help", "?"].iter().any(|k| line.eq_ignore_ascii_case(k)) {
        return Ok(Command::Help);
    }
    if ["exit", "quit", "q"].iter().any(|k| line.eq_ignore_ascii_case(k)) {
        return Ok(Command::Quit);
    }
    if let Some(prefix) = after_keyword(line, "list").or_else(|| after_keyword(line, "ls")) {
        return Ok(Command::List(prefix.to_string()));
    }
    if let Some(name) = after_keyword(line, "run") {
        return Ok(Command::Run(required(name)?));
    }
    if let Some(name) = after_keyword(line, "create jargon") {
        return Ok(Command::CreateJargon(required(name)?));
    }
    if let Some(name) = after_keyword(line, "delete jargon") {
        return Ok(Command::DeleteJargon(required(name)?));
    }
    if let Some(name) = after_keyword(line, "jargon") {
        return Ok(Command::ShowJargon(required(name)?));
    }
    if let Some(args) = after_keyword(line, "create alias") {
        let words: Vec<&str> = args.split_whitespace().collect();
        return match words.as_slice() {
            [alias, language] => Ok(Command::CreateAlias {
                alias: alias.to_lowercase(),
                language: language.to_string(),
            }),
            _ => Err(InputError::Usage(
                "expected two words after `create alias`: the new alias and the language being aliased",
            )),
        };
    }
    if let Some(name) = after_keyword(line, "delete alias") {
        return Ok(Command::DeleteAlias(required(name)?.to_lowercase()));
    }
    if let Some(name) = after_keyword(line, "alias") {
        return Ok(Command::ShowAlias(required(name)?.to_lowercase()));
    }
    if let Some(name) = before_suffix(line, " jargon") {
        return Ok(Command::ShowJargon(required(name)?));
    }
    Ok(Command::Run(line.to_string()))
}

/// Text after `kw` when the line starts with it as a whole word (ASCII case-insensitive).
fn after_keyword<'a>(line: &'a str, kw: &str) -> Option<&'a str> {
    let head = line.get(..kw.len())?;
    if !head.eq_ignore_ascii_case(kw) {
        return None;
    }
    let rest = &line[kw.len()..];
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn before_suffix<'a>(line: &'a str, suffix: &str) -> Option<&'a str> {
    let cut = line.len().checked_sub(suffix.len())?;
    let tail = line.get(cut..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| line[..cut].trim())
}

fn required(name: &str) -> Result<String, InputError> {
    if name.is_empty() {
        Err(InputError::Usage("a language name is required"))
    } else {
        Ok(name.to_string())
    }
}
