//! Command module
//!
//! Turns a raw input line into a [`Command`]. Input is normalized by [`tokenize`] and then
//! matched against the fixed verb table; everything after the verb is rejoined into the
//! object name that the handlers resolve against the world.
use variantly::Variantly;

use crate::location::Side;

/// Single words that end the game.
pub const EXIT_WORDS: [&str; 2] = ["exit", "stop"];

/// Phrases offered by tab completion.
pub const VOCABULARY: &[&str] = &[
    "show inventory",
    "look around",
    "look at",
    "look in",
    "look north",
    "look south",
    "look west",
    "look east",
    "open",
    "go north",
    "go south",
    "go west",
    "go east",
    "unlock",
    "take",
    "from",
    "talk to",
    "buy",
    "exit",
    "stop",
];

/// Commands that can be executed by the player.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum Command {
    Buy(String),
    Go(String),
    LookAround,
    LookAt(String),
    LookDirection(Side),
    /// Fewer than two words.
    Malformed,
    /// Both `open x` and `look in x`.
    Open(String),
    Quit,
    ShowInventory,
    Take(String),
    TakeFrom {
        item: String,
        container: String,
    },
    TalkTo(String),
    Unknown,
    Unlock(String),
}

/// Lowercase the line, drop everything but `[a-z0-9 ]` and split on spaces.
///
/// Tabs and other whitespace are dropped like punctuation, so they glue words together.
pub fn tokenize(raw: &str) -> Vec<String> {
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();
    cleaned.split(' ').filter(|word| !word.is_empty()).map(str::to_string).collect()
}

/// Parses an input string and returns the corresponding `Command`.
pub fn parse_command(input: &str) -> Command {
    let tokens = tokenize(input);
    let words: Vec<&str> = tokens.iter().map(String::as_str).collect();
    match words.as_slice() {
        [only] if EXIT_WORDS.contains(only) => Command::Quit,
        [] | [_] => Command::Malformed,
        ["show", "inventory", ..] => Command::ShowInventory,
        ["look", "around", ..] => Command::LookAround,
        ["look", "at", rest @ ..] => Command::LookAt(rest.join(" ")),
        ["look", "in", rest @ ..] | ["open", rest @ ..] => Command::Open(rest.join(" ")),
        ["look", direction, ..] => Side::from_token(direction).map_or(Command::Unknown, Command::LookDirection),
        ["go", direction, ..] => Command::Go((*direction).to_string()),
        ["unlock", rest @ ..] => Command::Unlock(rest.join(" ")),
        ["take", rest @ ..] => match rest.iter().position(|w| *w == "from") {
            Some(split) => Command::TakeFrom {
                item: rest[..split].join(" "),
                container: rest[split + 1..].join(" "),
            },
            None => Command::Take(rest.join(" ")),
        },
        ["talk", "to", rest @ ..] => Command::TalkTo(rest.join(" ")),
        ["buy", rest @ ..] => Command::Buy(rest.join(" ")),
        [first, ..] if EXIT_WORDS.contains(first) => Command::Quit,
        _ => Command::Unknown,
    }
}
