//! Top-level menu: rendering and input dispatch.

/// One of the five menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Language,
    Translate,
    Play,
    Pronounce,
    Exit,
}

impl MenuChoice {
    /// Parse user input into a menu choice. Each action is accepted by
    /// keyword or by its numeric position; anything else is rejected.
    pub fn parse(input: &str) -> Option<MenuChoice> {
        match input.trim().to_lowercase().as_str() {
            "language" | "1" => Some(MenuChoice::Language),
            "translate" | "2" => Some(MenuChoice::Translate),
            "play" | "3" => Some(MenuChoice::Play),
            "pronounce" | "4" => Some(MenuChoice::Pronounce),
            "exit" | "5" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// The menu text, refreshed with the session's current language and phrase.
pub fn render(language_name: &str, current_phrase: &str) -> String {
    format!(
        "\nWhat would you like to do now?\n\
         \t\"Language\" (1): Select new language (Current language: {})\n\
         \t\"Translate\" (2): Translate new phrase (Current phrase: \"{}\")\n\
         \t\"Play\" (3): Play current phrase\n\
         \t\"Pronounce\" (4): Try current phrase\n\
         \t\"Exit\" (5): Close LinguaFranca\n\
         Enter the keyword or number of your desired action: ",
        language_name, current_phrase
    )
}
