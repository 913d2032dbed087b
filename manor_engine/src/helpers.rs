//! Helpers Module
//!
//! This module contains helper / simplifier functions that don't clearly belong in another module.

/// Returns "an" for names starting with a vowel, "a" otherwise.
pub fn indefinite_article(name: &str) -> &'static str {
    match name.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// Joins phrases into an English list: "a", "a and b", "a, b, and c".
pub fn join_with_and(parts: &[String]) -> String {
    match parts {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn articles() {
        assert_eq!(indefinite_article("Apple"), "an");
        assert_eq!(indefinite_article("lantern"), "a");
        assert_eq!(indefinite_article(""), "a");
    }

    #[test]
    fn joins_lists() {
        let words = |w: &[&str]| w.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(join_with_and(&words(&[])), "");
        assert_eq!(join_with_and(&words(&["x"])), "x");
        assert_eq!(join_with_and(&words(&["x", "y"])), "x and y");
        assert_eq!(join_with_and(&words(&["x", "y", "z"])), "x, y, and z");
    }

    #[test]
    fn capitalizes_first_letter() {
        assert_eq!(capitalize("brass key"), "Brass key");
        assert_eq!(capitalize(""), "");
    }
}
