use mcq_core::model::OptionKey;

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Answer(OptionKey),
    Next,
    Previous,
    Bookmark,
    ReadAloud,
    AutoPlay,
    Theme,
    Back,
    Help,
    Quit,
    /// `/text` filters the subject list.
    Search(String),
    /// A number or a name from the current menu.
    Pick(String),
    /// Blank line: redraw.
    Redraw,
}

impl Command {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if let Some(query) = trimmed.strip_prefix('/') {
            return Self::Search(query.trim().to_string());
        }

        let mut chars = trimmed.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if let Some(key) = OptionKey::from_char(ch) {
                return Self::Answer(key);
            }
        }

        match trimmed.to_lowercase().as_str() {
            "" => Self::Redraw,
            "n" | "next" => Self::Next,
            "p" | "prev" | "previous" => Self::Previous,
            "*" | "m" | "mark" | "bookmark" => Self::Bookmark,
            "r" | "read" => Self::ReadAloud,
            "auto" => Self::AutoPlay,
            "t" | "theme" => Self::Theme,
            "back" | "home" => Self::Back,
            "h" | "?" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => Self::Pick(trimmed.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letters_answer_in_either_case() {
        assert_eq!(Command::parse("c"), Command::Answer(OptionKey::C));
        assert_eq!(Command::parse(" D \n"), Command::Answer(OptionKey::D));
        assert_eq!(Command::parse("e"), Command::Pick("e".into()));
    }

    #[test]
    fn words_map_to_actions() {
        assert_eq!(Command::parse("next"), Command::Next);
        assert_eq!(Command::parse("P"), Command::Previous);
        assert_eq!(Command::parse("*"), Command::Bookmark);
        assert_eq!(Command::parse("Auto"), Command::AutoPlay);
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse(""), Command::Redraw);
    }

    #[test]
    fn slash_starts_a_search() {
        assert_eq!(Command::parse("/eng"), Command::Search("eng".into()));
        assert_eq!(Command::parse("/"), Command::Search(String::new()));
    }

    #[test]
    fn anything_else_is_a_pick() {
        assert_eq!(Command::parse("2"), Command::Pick("2".into()));
        assert_eq!(Command::parse("CS101"), Command::Pick("CS101".into()));
    }
}
