//! Terminal styling.
//!
//! [`GameStyle`] gives every string-like value a named style per kind of game
//! text, so handlers and the view never pick colors themselves.

use colored::{ColoredString, Colorize};
use textwrap::{Options, termwidth};

const CANDLE: (u8, u8, u8) = (226, 178, 52);
const IVY: (u8, u8, u8) = (60, 150, 80);
const BRICK: (u8, u8, u8) = (200, 90, 40);
const OAK: (u8, u8, u8) = (170, 120, 70);
const MOONLIGHT: (u8, u8, u8) = (140, 190, 235);
const ASH: (u8, u8, u8) = (150, 150, 150);
const BLOOD: (u8, u8, u8) = (220, 40, 40);

fn paint(text: &str, (r, g, b): (u8, u8, u8)) -> ColoredString {
    text.truecolor(r, g, b)
}

/// Styles for the kinds of text the game prints.
pub trait GameStyle {
    fn raw_text(&self) -> &str;

    fn item_style(&self) -> ColoredString {
        paint(self.raw_text(), CANDLE)
    }
    fn npc_style(&self) -> ColoredString {
        paint(self.raw_text(), IVY).underline()
    }
    fn location_style(&self) -> ColoredString {
        paint(self.raw_text(), BRICK).bold()
    }
    fn barrier_style(&self) -> ColoredString {
        paint(self.raw_text(), OAK)
    }
    fn description_style(&self) -> ColoredString {
        paint(self.raw_text(), MOONLIGHT).italic()
    }
    fn speech_style(&self) -> ColoredString {
        paint(self.raw_text(), IVY).italic()
    }
    fn transition_style(&self) -> ColoredString {
        paint(self.raw_text(), ASH).italic()
    }
    fn error_style(&self) -> ColoredString {
        paint(self.raw_text(), BLOOD)
    }
    fn denied_style(&self) -> ColoredString {
        paint(self.raw_text(), BLOOD).italic()
    }
    fn subheading_style(&self) -> ColoredString {
        self.raw_text().underline()
    }
    /// Section labels are bracketed and dimmed.
    fn section_style(&self) -> ColoredString {
        paint(&format!("[{}]", self.raw_text()), ASH).dimmed()
    }
    fn prompt_style(&self) -> ColoredString {
        paint(self.raw_text(), BRICK).bold()
    }
}

impl<T: AsRef<str> + ?Sized> GameStyle for T {
    fn raw_text(&self) -> &str {
        self.as_ref()
    }
}

/// Wrapping options for ordinary paragraphs at the current terminal width.
pub fn normal_block() -> Options<'static> {
    Options::new(termwidth())
}

/// Wrapping options for text set in from the left margin.
pub fn indented_block() -> Options<'static> {
    Options::new(termwidth())
        .initial_indent("    ")
        .subsequent_indent("    ")
}
