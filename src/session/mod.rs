//! Interactive session: a state machine fed one line at a time.
//!
//! Every prompt is written to the output sink before the next line is read,
//! so a scripted [`LineSource`] replays a whole session without a terminal.

pub mod command;
pub mod input;

use std::{collections::BTreeMap, io::Write, sync::Arc, time::Duration};

use anyhow::Result;

use crate::{
    catalog::{Catalog, LanguageEntry},
    composer::{compose, needs_wrapping},
    error::{ExecError, InputError, TemplateError},
    exec::{ExecutionRequest, ExecutionResult, Executor, Stage},
    interrupt::Interrupt,
    jargon::{JargonStore, JargonTemplate, PLACEHOLDER},
    printer::{TextPrinter, Tone},
    store::{OverrideFile, Overrides},
};

use command::Command;
pub use input::{BlockReader, CodeBlock, LineSource, ScriptedLines, StdinLines};

#[derive(Debug)]
pub enum State {
    AwaitLanguage,
    AwaitJargonChoice {
        language: &'static LanguageEntry,
    },
    AwaitCode {
        language: &'static LanguageEntry,
        jargon: Option<JargonTemplate>,
    },
    AwaitInput {
        language: &'static LanguageEntry,
        source: String,
        /// Text that followed the closing fence on the same line.
        trailing: Option<String>,
    },
    Submitting {
        request: ExecutionRequest,
    },
    Displaying {
        language: String,
        outcome: Outcome,
    },
    Idle,
    Done,
}

#[derive(Debug)]
pub enum Outcome {
    Finished(ExecutionResult),
    Failed(ExecError),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub timeout: Duration,
    /// Ask before wrapping code in a language's jargon.
    pub confirm_jargon: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            confirm_jargon: true,
        }
    }
}

pub struct Session<E, L, W> {
    catalog: &'static Catalog,
    jargon: JargonStore,
    aliases: BTreeMap<String, String>,
    overrides: Option<OverrideFile>,
    executor: E,
    lines: L,
    out: W,
    printer: TextPrinter,
    settings: Settings,
    interrupt: Arc<Interrupt>,
    state: State,
}

impl<E, L, W> Session<E, L, W>
where
    E: Executor,
    L: LineSource,
    W: Write,
{
    pub fn new(catalog: &'static Catalog, executor: E, lines: L, out: W) -> Self {
        Self {
            catalog,
            jargon: JargonStore::new(),
            aliases: BTreeMap::new(),
            overrides: None,
            executor,
            lines,
            out,
            printer: TextPrinter::default(),
            settings: Settings::default(),
            interrupt: Interrupt::new(),
            state: State::AwaitLanguage,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_printer(mut self, printer: TextPrinter) -> Self {
        self.printer = printer;
        self
    }

    pub fn with_interrupt(mut self, interrupt: Arc<Interrupt>) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Applies saved overrides and writes later changes back to `file`.
    pub fn with_overrides(mut self, file: OverrideFile, saved: Overrides) -> Self {
        let catalog = self.catalog;
        self.jargon = JargonStore::with_overrides(saved.jargon, saved.disabled_jargon);
        self.aliases = saved
            .aliases
            .into_iter()
            .filter(|(alias, id)| {
                let known = catalog.by_id(id).is_some();
                if !known {
                    tracing::warn!(%alias, %id, "ignoring saved alias to an unknown language");
                }
                known
            })
            .collect();
        self.overrides = Some(file);
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Runs until the user quits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        while !matches!(self.state, State::Done) {
            self.step().await?;
        }
        Ok(())
    }

    /// Advances the state machine by one state.
    pub async fn step(&mut self) -> Result<()> {
        let state = std::mem::replace(&mut self.state, State::Idle);
        self.state = match state {
            State::AwaitLanguage => self.await_language()?,
            State::AwaitJargonChoice { language } => self.await_jargon_choice(language)?,
            State::AwaitCode { language, jargon } => self.await_code(language, jargon)?,
            State::AwaitInput { language, source, trailing } => {
                self.await_input(language, source, trailing)?
            }
            State::Submitting { request } => self.submit(request).await?,
            State::Displaying { language, outcome } => {
                self.display(&language, outcome)?;
                State::Idle
            }
            State::Idle => State::AwaitLanguage,
            State::Done => State::Done,
        };
        tracing::trace!(state = ?self.state, "session step");
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{}", self.printer.paint(text, Tone::Header))?;
        self.out.flush()?;
        Ok(self.lines.next_line()?)
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    fn note(&mut self, text: &str) -> Result<()> {
        let line = self.printer.paint(text, Tone::Note);
        self.say(&line)
    }

    fn error(&mut self, err: &dyn std::fmt::Display) -> Result<()> {
        let line = self.printer.paint(&err.to_string(), Tone::Error);
        self.say(&line)
    }

    fn resolve(&self, name: &str) -> Result<&'static LanguageEntry, InputError> {
        let key = name.trim().to_lowercase();
        if let Some(entry) = self.aliases.get(&key).and_then(|id| self.catalog.by_id(id)) {
            return Ok(entry);
        }
        self.catalog.resolve(name)
    }

    fn persist(&mut self) -> Result<()> {
        let Some(file) = &self.overrides else {
            return Ok(());
        };
        let doc = Overrides {
            jargon: self.jargon.user_templates().clone(),
            disabled_jargon: self.jargon.disabled().clone(),
            aliases: self.aliases.clone(),
        };
        if let Err(e) = file.save(&doc) {
            tracing::warn!(error = %e, "could not save overrides");
            let msg = format!("changes were not saved: {e}");
            self.error(&msg)?;
        }
        Ok(())
    }

    fn await_language(&mut self) -> Result<State> {
        let Some(line) = self.prompt("tias> ")? else {
            self.say("")?;
            return Ok(State::Done);
        };
        let cmd = match command::parse(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                self.error(&e)?;
                return Ok(State::AwaitLanguage);
            }
        };
        if let Err(e) = self.command(cmd.clone()) {
            // keep I/O failures fatal, everything else is shown and we go on
            match e.downcast::<InputError>() {
                Ok(input) => self.error(&input)?,
                Err(other) => match other.downcast::<TemplateError>() {
                    Ok(template) => self.error(&template)?,
                    Err(fatal) => return Err(fatal),
                },
            }
            return Ok(State::AwaitLanguage);
        }
        Ok(match cmd {
            Command::Quit => State::Done,
            Command::Run(name) => match self.resolve(&name) {
                Ok(language) => State::AwaitJargonChoice { language },
                Err(e) => {
                    self.error(&e)?;
                    let similar = self.catalog.filter(&name);
                    if !similar.is_empty() {
                        let names: Vec<String> = similar.iter().map(|e| e.to_string()).collect();
                        self.note(&format!("did you mean: {}", names.join(", ")))?;
                    }
                    State::AwaitLanguage
                }
            },
            _ => State::AwaitLanguage,
        })
    }

    /// Handles the commands that stay at the language prompt.
    fn command(&mut self, cmd: Command) -> Result<()> {
        match cmd {
            Command::Empty | Command::Quit | Command::Run(_) => {}
            Command::Help => self.say(HELP)?,
            Command::List(prefix) => self.list(&prefix)?,
            Command::ShowJargon(name) => {
                let language = self.resolve(&name)?;
                match self.jargon.get(language.id) {
                    Some(t) => {
                        let header = self.printer.paint("jargon:", Tone::Header);
                        self.say(&format!("{header}\n{}", t.text))?;
                        if let Some(key) = &t.key {
                            let header = self.printer.paint("jargon key:", Tone::Header);
                            self.say(&format!("{header} {key}"))?;
                        }
                    }
                    None => self.note(&format!("no jargon available for `{}`", language.name))?,
                }
            }
            Command::CreateJargon(name) => self.create_jargon(&name)?,
            Command::DeleteJargon(name) => {
                let language = self.resolve(&name)?;
                if !self.jargon.remove(language.id) {
                    return Err(InputError::NoJargon(language.name.to_string()).into());
                }
                self.persist()?;
                self.say(&format!("Jargon for the `{}` language deleted.", language.name))?;
            }
            Command::ShowAlias(alias) => {
                if let Some(id) = self.aliases.get(&alias) {
                    let msg = format!("`{alias}` is an alias of `{id}`");
                    self.say(&msg)?;
                } else if let Some(id) = self.catalog.alias_target(&alias) {
                    self.say(&format!("`{alias}` is a built-in alias of `{id}`"))?;
                } else {
                    return Err(InputError::NotAnAlias(alias).into());
                }
            }
            Command::CreateAlias { alias, language } => self.create_alias(alias, &language)?,
            Command::DeleteAlias(alias) => {
                if self.aliases.remove(&alias).is_none() {
                    if self.catalog.alias_target(&alias).is_some() {
                        return Err(InputError::Usage("built-in aliases cannot be deleted").into());
                    }
                    return Err(InputError::NotAnAlias(alias).into());
                }
                self.persist()?;
                self.say(&format!("Deleted alias `{alias}`"))?;
            }
        }
        Ok(())
    }

    fn list(&mut self, prefix: &str) -> Result<()> {
        let entries = self.catalog.filter(prefix);
        let mut aliases: Vec<(String, String)> = self
            .catalog
            .aliases_with_prefix(prefix)
            .into_iter()
            .map(|(a, id)| (a.to_string(), id.to_string()))
            .collect();
        let lower = prefix.trim().to_lowercase();
        aliases.extend(
            self.aliases
                .iter()
                .filter(|(a, _)| a.starts_with(&lower))
                .map(|(a, id)| (a.clone(), id.clone())),
        );
        aliases.sort();

        let header = if prefix.trim().is_empty() {
            format!("languages ({}):", entries.len())
        } else {
            format!("languages that start with `{}` ({}):", prefix.trim(), entries.len())
        };
        let header = self.printer.paint(&header, Tone::Header);
        self.say(&header)?;
        for e in &entries {
            let line = format!("  {:<28} {}", e.to_string(), e.id);
            self.say(&line)?;
        }
        if !aliases.is_empty() {
            let shown: Vec<String> = aliases
                .iter()
                .map(|(a, id)| format!("{} -> {id}", self.printer.paint(a, Tone::Alias)))
                .collect();
            let line = format!("aliases: {}", shown.join(", "));
            self.say(&line)?;
        }
        Ok(())
    }

    fn create_jargon(&mut self, name: &str) -> Result<()> {
        let language = self.resolve(name)?;
        if self.jargon.has(language.id) {
            let question = format!("`{}` already has jargon. Overwrite? (y/n) ", language.name);
            let answer = self.prompt(&question)?.unwrap_or_default();
            if !is_yes(&answer) {
                self.note("Cancelled creating jargon.")?;
                return Ok(());
            }
        }
        let Some(text) = self.read_template()? else {
            return Ok(());
        };
        let key = self.prompt("jargon key (optional): ")?.unwrap_or_default();
        let template = JargonTemplate::new(language.id, text, Some(key.trim().to_string()))?;
        self.jargon.set(template);
        self.persist()?;
        self.say(&format!("Created jargon for the `{}` language", language.name))?;
        Ok(())
    }

    fn create_alias(&mut self, alias: String, language: &str) -> Result<()> {
        if !self.aliases.contains_key(&alias) && self.catalog.resolve(&alias).is_ok() {
            return Err(InputError::AlreadyALanguage(alias).into());
        }
        let target = self.resolve(language)?;
        if let Some(existing) = self.aliases.get(&alias) {
            if existing == target.id {
                self.note(&format!("`{alias}` is already an alias of `{}`", target.id))?;
                return Ok(());
            }
            let question = format!("`{alias}` is already an alias. Overwrite? (y/n) ");
            let answer = self.prompt(&question)?.unwrap_or_default();
            if !is_yes(&answer) {
                self.note("Cancelled creating an alias.")?;
                return Ok(());
            }
        }
        self.aliases.insert(alias.clone(), target.id.to_string());
        self.persist()?;
        self.say(&format!("Created `{alias}` as an alias to `{}`", target.id))?;
        Ok(())
    }

    /// Reads a fenced template; `None` at end of input.
    fn read_template(&mut self) -> Result<Option<String>> {
        let header = self.printer.paint(
            &format!("jargon (write {PLACEHOLDER} where code goes, end with ```):"),
            Tone::Header,
        );
        self.say(&header)?;
        Ok(self.read_block()?.map(|b| b.code))
    }

    /// Collects a fenced block; `None` when input ends first.
    fn read_block(&mut self) -> Result<Option<CodeBlock>> {
        let mut reader = BlockReader::new();
        loop {
            match self.lines.next_line()? {
                Some(line) => {
                    if let Some(block) = reader.push(&line) {
                        return Ok(Some(block));
                    }
                }
                None => {
                    if let Err(e) = reader.eof() {
                        self.error(&e)?;
                    }
                    return Ok(None);
                }
            }
        }
    }

    fn await_jargon_choice(&mut self, language: &'static LanguageEntry) -> Result<State> {
        let Some(template) = self.jargon.get(language.id) else {
            self.note(&format!("no jargon available for `{}`; running code as is", language.name))?;
            return Ok(State::AwaitCode { language, jargon: None });
        };
        if !self.settings.confirm_jargon {
            return Ok(State::AwaitCode { language, jargon: Some(template) });
        }

        let header = self.printer.paint("jargon:", Tone::Header);
        self.say(&format!("{header}\n{}", template.text))?;
        let Some(answer) = self.prompt("use this jargon? [Y]es, [e]dit, [s]kip: ")? else {
            return Ok(State::Done);
        };
        Ok(match answer.trim().to_lowercase().as_str() {
            "" | "y" | "yes" => State::AwaitCode { language, jargon: Some(template) },
            "s" | "skip" | "n" | "no" => State::AwaitCode { language, jargon: None },
            "e" | "edit" => {
                let Some(text) = self.read_template()? else {
                    return Ok(State::Done);
                };
                match JargonTemplate::new(language.id, text, template.key.clone()) {
                    Ok(edited) => State::AwaitCode { language, jargon: Some(edited) },
                    Err(e) => {
                        self.error(&e)?;
                        State::AwaitJargonChoice { language }
                    }
                }
            }
            _ => {
                self.note("please answer y, e or s")?;
                State::AwaitJargonChoice { language }
            }
        })
    }

    fn await_code(
        &mut self,
        language: &'static LanguageEntry,
        jargon: Option<JargonTemplate>,
    ) -> Result<State> {
        let header = self.printer.paint("code:", Tone::Header);
        let hint = self.printer.paint("(end with ``` on its own line)", Tone::Note);
        self.say(&format!("{header} {hint}"))?;
        let Some(block) = self.read_block()? else {
            return Ok(State::Done);
        };
        if block.code.trim().is_empty() {
            self.error(&InputError::EmptyCode)?;
            return Ok(State::AwaitCode { language, jargon });
        }

        let mut wrap = jargon.as_ref();
        if let Some(t) = wrap {
            if !needs_wrapping(&block.code, t) {
                let key = t.key.as_deref().unwrap_or_default();
                self.note(&format!("code already contains `{key}`; sending it without jargon"))?;
                wrap = None;
            }
        }
        match compose(&block.code, wrap) {
            Ok(source) => Ok(State::AwaitInput {
                language,
                source,
                trailing: block.trailing,
            }),
            Err(e) => {
                self.error(&e)?;
                Ok(State::AwaitCode { language, jargon })
            }
        }
    }

    fn await_input(
        &mut self,
        language: &'static LanguageEntry,
        source: String,
        trailing: Option<String>,
    ) -> Result<State> {
        let mut stdin: Vec<String> = Vec::new();
        match trailing {
            Some(text) => stdin.extend(input::stdin_tokens(&text)),
            None => {
                let mut prompt = "input (blank line to run): ";
                while let Some(line) = self.prompt(prompt)? {
                    if line.trim().is_empty() {
                        break;
                    }
                    stdin.extend(input::stdin_tokens(&line));
                    prompt = "";
                }
            }
        }
        Ok(State::Submitting {
            request: ExecutionRequest {
                source,
                language: language.id.to_string(),
                stdin,
            },
        })
    }

    async fn submit(&mut self, request: ExecutionRequest) -> Result<State> {
        self.note("Running...")?;
        self.out.flush()?;

        let interrupt = Arc::clone(&self.interrupt);
        let cancelled = interrupt.cancelled();
        let guard = interrupt.in_flight();
        let outcome = tokio::select! {
            res = self.executor.execute(&request, self.settings.timeout) => match res {
                Ok(result) => Outcome::Finished(result),
                Err(e) => {
                    tracing::debug!(error = %e, "submission failed");
                    Outcome::Failed(e)
                }
            },
            _ = cancelled => Outcome::Cancelled,
        };
        drop(guard);

        Ok(State::Displaying {
            language: request.language,
            outcome,
        })
    }

    fn display(&mut self, language: &str, outcome: Outcome) -> Result<()> {
        match outcome {
            Outcome::Finished(result) => self.show_result(language, &result),
            Outcome::Failed(e) => {
                self.error(&e)?;
                if matches!(e, ExecError::Timeout(_)) {
                    self.note("the service may be busy; you can run the code again")?;
                }
                Ok(())
            }
            Outcome::Cancelled => self.note("cancelled"),
        }
    }

    fn show_result(&mut self, language: &str, result: &ExecutionResult) -> Result<()> {
        let title = match result.stage {
            Stage::Run => format!("`{language}` output:"),
            Stage::Compile => format!("`{language}` compilation failed:"),
        };
        let title = self.printer.paint(&title, Tone::Header);
        self.say(&title)?;
        write!(self.out, "{}", result.stdout)?;
        if !result.stdout.is_empty() && !result.stdout.ends_with('\n') {
            writeln!(self.out)?;
        }
        if !result.stderr.is_empty() {
            let header = self.printer.paint("stderr:", Tone::Error);
            self.say(&header)?;
            write!(self.out, "{}", result.stderr)?;
            if !result.stderr.ends_with('\n') {
                writeln!(self.out)?;
            }
        }
        let header = self.printer.paint("exit status:", Tone::Header);
        self.say(&format!("{header} {}", result.status))?;
        if let Some(t) = result.wall_time {
            let header = self.printer.paint("wall time:", Tone::Header);
            self.say(&format!("{header} {} ms", t.as_millis()))?;
        }
        Ok(())
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

const HELP: &str = "\
help
    Displays this message.
exit
    Closes this app.
(language) or run (language)
    Selects a language and then asks you for code to run.
list / ls
    Shows all supported languages.
list (prefix)
    Shows all supported languages whose name starts with a prefix.
(language) jargon / jargon (language)
    Shows the code that can wrap around your code in a chosen language.
create jargon (language)
    Sets the jargon for a language.
delete jargon (language)
    Deletes the jargon for a language.
alias (alias)
    Shows the language an alias stands for.
create alias (new alias) (language)
    Creates a new alias for a chosen language.
delete alias (alias)
    Deletes an alias you created.

Code is entered over several lines and ends with a line of three backticks.
Lines typed after that are the program's input; a blank line runs the code.";
