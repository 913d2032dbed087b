//! View module.
//! This contains the view to the game world / messages.
//! Rather than printing to the console from each handler, we aggregate needed information and messages
//! to be organized and displayed at the end of the turn.
use colored::Colorize;
use textwrap::{fill, termwidth};
use variantly::Variantly;

use crate::style::{GameStyle, indented_block, normal_block};

const ICON_SUCCESS: &str = "\u{2611}"; // ✔
const ICON_FAILURE: &str = "\u{274C}"; // ✖
const ICON_ERROR: &str = "⚠︎"; // U+26A0 U+FE0E
const ICON_ENGINE: &str = "⚙";

/// View aggregates information to be displayed on each pass through the REPL and then organizes
/// and displays the result.
#[derive(Debug, Clone)]
pub struct View {
    pub width: usize,
    pub items: Vec<ViewItem>,
}

impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

impl View {
    pub fn new() -> Self {
        Self {
            width: termwidth(),
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: ViewItem) {
        self.items.push(item);
    }

    /// Compose and display all message contents in the current frame / turn.
    pub fn flush(&mut self) {
        // re-check terminal width in case it's been resized
        self.width = termwidth();

        for section in [Section::Transition, Section::Environment, Section::DirectResult, Section::System] {
            let entries: Vec<&ViewItem> = self.items.iter().filter(|i| i.section() == section).collect();
            if entries.is_empty() {
                continue;
            }
            if let Some(label) = section.label() {
                println!("{:.>width$}\n", label.section_style(), width = self.width);
            }
            for entry in entries {
                println!("{}", Self::styled(entry));
            }
        }

        // clear the buffer for the next turn
        self.items.clear();
        println!();
    }

    /// The current frame as plain text, one entry per line, in push order.
    pub fn transcript(&self) -> String {
        self.items.iter().map(ViewItem::text).collect::<Vec<_>>().join("\n")
    }

    fn styled(item: &ViewItem) -> String {
        match item {
            ViewItem::LocationDescription { name, description } => format!(
                "{}\n{}",
                name.location_style(),
                fill(description, normal_block()).description_style()
            ),
            ViewItem::BarrierDescription { name, description } => {
                format!("{}\n{}", name.barrier_style(), fill(description, indented_block()))
            },
            ViewItem::EntityDescription { name, description } => {
                format!("{}\n{}", name.subheading_style(), fill(description, indented_block()))
            },
            ViewItem::Inventory { money, listing } => format!("{}\n{}", money.item_style(), listing),
            ViewItem::ContainerContents(listing) | ViewItem::MerchantStock(listing) => listing.clone(),
            ViewItem::NpcSpeech { speaker, quote } => fill(
                &format!("{}: {}", speaker.npc_style(), format!("\"{quote}\"").speech_style()),
                normal_block(),
            ),
            ViewItem::ActionSuccess(msg) => fill(&format!("{} {msg}", ICON_SUCCESS.bright_green()), normal_block()),
            ViewItem::ActionFailure(msg) => fill(
                &format!("{} {}", ICON_FAILURE.bright_red(), msg.denied_style()),
                normal_block(),
            ),
            ViewItem::Error(msg) => fill(&format!("{:<4}{}", ICON_ERROR.bright_red(), msg.error_style()), normal_block()),
            ViewItem::TransitionMessage(msg) => fill(msg, normal_block()).transition_style().to_string(),
            ViewItem::EngineMessage(msg) => fill(&format!("{:<4}{msg}", ICON_ENGINE.dimmed()), normal_block()),
        }
    }
}

/// Subsections of the output.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Section {
    /// Movement text between locations.
    Transition,
    /// Location description.
    Environment,
    /// Direct results of the player's command.
    DirectResult,
    /// Meta/game-system feedback.
    System,
}

impl Section {
    fn label(self) -> Option<&'static str> {
        match self {
            Section::Transition => None,
            Section::Environment => Some("scene"),
            Section::DirectResult => Some("results"),
            Section::System => Some("game"),
        }
    }
}

/// Everything a command handler can report.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum ViewItem {
    ActionFailure(String),
    ActionSuccess(String),
    BarrierDescription { name: String, description: String },
    ContainerContents(String),
    EngineMessage(String),
    EntityDescription { name: String, description: String },
    Error(String),
    Inventory { money: String, listing: String },
    LocationDescription { name: String, description: String },
    MerchantStock(String),
    NpcSpeech { speaker: String, quote: String },
    TransitionMessage(String),
}

impl ViewItem {
    /// Classify a view item into a top-level output section.
    pub fn section(&self) -> Section {
        match self {
            ViewItem::TransitionMessage(_) => Section::Transition,
            ViewItem::LocationDescription { .. } => Section::Environment,
            ViewItem::ActionFailure(_)
            | ViewItem::ActionSuccess(_)
            | ViewItem::BarrierDescription { .. }
            | ViewItem::ContainerContents(_)
            | ViewItem::EntityDescription { .. }
            | ViewItem::Error(_)
            | ViewItem::Inventory { .. }
            | ViewItem::MerchantStock(_)
            | ViewItem::NpcSpeech { .. } => Section::DirectResult,
            ViewItem::EngineMessage(_) => Section::System,
        }
    }

    /// Unstyled text of the item.
    pub fn text(&self) -> String {
        match self {
            ViewItem::LocationDescription { name, description } => format!("You are in the {name}. {description}"),
            ViewItem::BarrierDescription { description, .. } => description.clone(),
            ViewItem::EntityDescription { name, description } => format!("{name}: {description}"),
            ViewItem::Inventory { money, listing } => format!("{money}\n{listing}"),
            ViewItem::NpcSpeech { speaker, quote } => format!("{speaker}: \"{quote}\""),
            ViewItem::ActionFailure(msg)
            | ViewItem::ActionSuccess(msg)
            | ViewItem::ContainerContents(msg)
            | ViewItem::EngineMessage(msg)
            | ViewItem::Error(msg)
            | ViewItem::MerchantStock(msg)
            | ViewItem::TransitionMessage(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_keeps_push_order() {
        let mut view = View::new();
        view.push(ViewItem::ActionFailure("first".into()));
        view.push(ViewItem::TransitionMessage("second".into()));
        assert_eq!(view.transcript(), "first\nsecond");
    }

    #[test]
    fn location_text_names_the_place() {
        let item = ViewItem::LocationDescription {
            name: "Foyer".into(),
            description: "Dusty.".into(),
        };
        assert_eq!(item.text(), "You are in the Foyer. Dusty.");
        assert_eq!(item.section(), Section::Environment);
    }

    #[test]
    fn styled_barrier_keeps_name_and_description() {
        colored::control::set_override(false);
        let item = ViewItem::BarrierDescription {
            name: "Oak Door".into(),
            description: "Heavy.".into(),
        };
        let styled = View::styled(&item);
        assert!(styled.starts_with("Oak Door\n"));
        assert!(styled.ends_with("Heavy."));
        assert_eq!(item.text(), "Heavy.");
    }
}
