//! Line input for the manor REPL.
//!
//! Interactive terminals get rustyline with persistent history and tab completion of
//! command phrases and the names of things in the world. Pipes and dumb terminals
//! read plain stdin.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::{debug, info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::World;
use crate::command::VOCABULARY;
use crate::component::Kind;
use crate::entity::Entity;

/// What the player produced at the prompt.
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

lazy_static! {
    static ref PHRASES: Vec<&'static str> = {
        let mut phrases = VOCABULARY.to_vec();
        phrases.sort_unstable();
        phrases.dedup();
        phrases
    };
}

/// Completes command phrases first, then object names after a recognised verb.
#[derive(Default)]
struct ManorHelper {
    names: Vec<String>,
}

impl ManorHelper {
    /// Returns the byte offset into `typed` where the replacement starts, and the candidates.
    fn candidates(&self, typed: &str) -> (usize, Vec<String>) {
        let lower = typed.to_ascii_lowercase();
        let phrases: Vec<String> = PHRASES
            .iter()
            .filter(|phrase| phrase.starts_with(&lower))
            .map(ToString::to_string)
            .collect();
        if !phrases.is_empty() {
            return (0, phrases);
        }

        let Some(verb) = PHRASES
            .iter()
            .filter(|phrase| lower.starts_with(&format!("{phrase} ")))
            .max_by_key(|phrase| phrase.len())
        else {
            return (0, Vec::new());
        };
        let mut offset = verb.len() + 1;
        if let Some(split) = lower.rfind(" from ")
            && split >= verb.len()
        {
            offset = split + " from ".len();
        }
        let object = &lower[offset..];
        let names = self.names.iter().filter(|name| name.starts_with(object)).cloned().collect();
        (offset, names)
    }
}

impl Helper for ManorHelper {}
impl Highlighter for ManorHelper {}
impl Validator for ManorHelper {}

impl Hinter for ManorHelper {
    type Hint = String;
}

impl Completer for ManorHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, typed) = current_prefix(line, pos);
        if typed.is_empty() {
            return Ok((start, Vec::new()));
        }
        let (offset, found) = self.candidates(typed);
        let pairs = found
            .into_iter()
            .map(|term| Pair {
                display: term.clone(),
                replacement: term,
            })
            .collect();
        Ok((start + offset, pairs))
    }
}

/// Text typed before the cursor, without leading whitespace, and where it starts.
fn current_prefix(line: &str, pos: usize) -> (usize, &str) {
    let typed = line[..pos].trim_start();
    (pos - typed.len(), typed)
}

/// Lowercased display names of every component and barrier, for completion.
pub fn world_names(world: &World) -> Vec<String> {
    let mut names: Vec<String> = Kind::COMPONENTS
        .iter()
        .flat_map(|kind| world.components_of_kind(*kind))
        .map(|entity| entity.name().to_lowercase())
        .chain(world.all_barriers().iter().map(|barrier| barrier.name().to_lowercase()))
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// Reads player input, preferring rustyline on a terminal.
pub struct InputManager {
    editor: Option<LineEditor>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        if !io::stdin().is_terminal() {
            info!("stdin is not a terminal, reading plain lines");
            return Self { editor: None };
        }
        match LineEditor::new() {
            Ok(editor) => Self { editor: Some(editor) },
            Err(err) => {
                warn!("line editor unavailable ({err}), reading plain lines");
                Self { editor: None }
            },
        }
    }

    /// Offer these names when completing the object of a command.
    pub fn learn_names(&mut self, names: Vec<String>) {
        if let Some(editor) = self.editor.as_mut()
            && let Some(helper) = editor.editor.helper_mut()
        {
            debug!("completion knows {} names", names.len());
            helper.names = names;
        }
    }

    /// Read one line. A failing line editor is dropped and stdin is used from then on.
    ///
    /// # Errors
    /// Returns the I/O error of the plain stdin reader.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        if let Some(editor) = self.editor.as_mut() {
            match editor.read_line(prompt) {
                Ok(event) => return Ok(event),
                Err(err) => {
                    warn!("line editor failed ({err}), switching to plain lines");
                    self.editor = None;
                },
            }
        }
        read_plain_line(prompt)
    }
}

struct LineEditor {
    editor: Editor<ManorHelper, DefaultHistory>,
    history: Option<PathBuf>,
}

impl LineEditor {
    fn new() -> io::Result<Self> {
        let mut editor = Editor::new().map_err(into_io_error)?;
        editor.set_helper(Some(ManorHelper::default()));

        let history = history_file_path();
        if let Some(path) = history.as_deref() {
            if let Some(dir) = path.parent()
                && let Err(err) = fs::create_dir_all(dir)
            {
                warn!("cannot create history directory {}: {err}", dir.display());
            }
            match editor.load_history(path) {
                Ok(()) => debug!("history loaded from {}", path.display()),
                Err(ReadlineError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {},
                Err(err) => warn!("cannot load history from {}: {err}", path.display()),
            }
        }
        Ok(Self { editor, history })
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        let line = match self.editor.readline(prompt) {
            Ok(line) => line,
            Err(err) => return interpret_readline_error(err),
        };
        if !line.trim().is_empty() {
            if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                warn!("cannot record history entry: {err}");
            }
            if let Some(path) = self.history.as_deref()
                && let Err(err) = self.editor.save_history(path)
            {
                warn!("cannot save history to {}: {err}", path.display());
            }
        }
        Ok(InputEvent::Line(line))
    }
}

fn read_plain_line(prompt: &str) -> io::Result<InputEvent> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(InputEvent::Eof);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(InputEvent::Line(line))
}

fn interpret_readline_error(err: ReadlineError) -> io::Result<InputEvent> {
    match err {
        ReadlineError::Interrupted => Ok(InputEvent::Interrupted),
        ReadlineError::Eof => Ok(InputEvent::Eof),
        other => Err(into_io_error(other)),
    }
}

fn into_io_error(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(err) => err,
        other => io::Error::other(other),
    }
}

fn history_file_path() -> Option<PathBuf> {
    dirs::data_dir()
        .or_else(dirs::data_local_dir)
        .map(|base| history_under(&base))
}

fn history_under(base: &Path) -> PathBuf {
    base.join("manor").join("history.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> ManorHelper {
        ManorHelper {
            names: vec!["brass key".into(), "chest".into(), "cook".into(), "oak door".into()],
        }
    }

    #[test]
    fn ctrl_c_and_ctrl_d_become_events() {
        assert!(matches!(
            interpret_readline_error(ReadlineError::Interrupted).unwrap(),
            InputEvent::Interrupted
        ));
        assert!(matches!(interpret_readline_error(ReadlineError::Eof).unwrap(), InputEvent::Eof));
    }

    #[test]
    fn history_lives_in_manor_dir() {
        let path = history_under(Path::new("/tmp/manor-test"));
        assert_eq!(path, PathBuf::from("/tmp/manor-test/manor/history.txt"));
    }

    #[test]
    fn completes_multi_word_phrases() {
        assert_eq!(
            helper().candidates("Look a"),
            (0, vec!["look around".to_string(), "look at".to_string()])
        );
    }

    #[test]
    fn completes_object_after_verb() {
        assert_eq!(helper().candidates("unlock c"), (7, vec!["chest".to_string(), "cook".to_string()]));
        assert_eq!(helper().candidates("talk to co"), (8, vec!["cook".to_string()]));
    }

    #[test]
    fn completes_container_after_from() {
        assert_eq!(helper().candidates("take apple from ch"), (16, vec!["chest".to_string()]));
    }

    #[test]
    fn unknown_verb_has_no_candidates() {
        assert_eq!(helper().candidates("dance wi"), (0, Vec::new()));
    }

    #[test]
    fn prefix_skips_leading_whitespace() {
        assert_eq!(current_prefix("   go no", 8), (3, "go no"));
    }
}
