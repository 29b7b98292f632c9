//! Language selection.
//!
//! Resolves free-text input into a registry-validated [`Language`], with a
//! help listing and an explicit confirmation step. The flow is a small state
//! machine; there is no retry limit, only the user's choice to exit.

use crate::console::Console;
use crate::languages::{Language, LanguageRegistry, DISPLAY_ALIASES};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::info;

const HELP_KEYWORD: &str = "list languages";

/// Selection progress. `Prompting` and `Confirming` loop until the user
/// lands in one of the two terminal states.
enum SelectState {
    Prompting,
    Confirming { language: Language, display: String },
    Resolved(Language),
    Exited,
}

/// Run the language-selection dialog.
///
/// Returns `Some(language)` once the user confirms a supported language, or
/// `None` if they choose to exit instead.
pub fn select_language<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<Option<Language>> {
    let mut state = SelectState::Prompting;

    loop {
        state = match state {
            SelectState::Prompting => {
                let input = console.prompt(
                    "Enter the name of the language you want to learn.\n\
                     (to get a list of all accepted languages, type \"list languages\")\n",
                )?;

                if input.eq_ignore_ascii_case(HELP_KEYWORD) {
                    print_languages(console)?;
                    SelectState::Prompting
                } else {
                    match Language::resolve_name(&input) {
                        Some((language, display)) => {
                            SelectState::Confirming { language, display }
                        }
                        None => {
                            if retry_or_exit(
                                console,
                                &format!("\"{}\" not recognized. ", input),
                            )? {
                                SelectState::Prompting
                            } else {
                                SelectState::Exited
                            }
                        }
                    }
                }
            }

            SelectState::Confirming { language, display } => {
                let confirmed = console.confirm(&format!(
                    "You have chosen: {}. Is this correct? \"Yes\" or \"No\": ",
                    display
                ))?;

                if confirmed {
                    SelectState::Resolved(language)
                } else if retry_or_exit(console, "")? {
                    SelectState::Prompting
                } else {
                    SelectState::Exited
                }
            }

            SelectState::Resolved(language) => {
                info!(code = language.code(), name = language.name(), "language selected");
                return Ok(Some(language));
            }

            SelectState::Exited => {
                info!("user exited from language selection");
                return Ok(None);
            }
        };
    }
}

/// Ask whether to try another language. Only an explicit "exit" ends the
/// dialog; any other answer re-prompts.
fn retry_or_exit<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prefix: &str,
) -> Result<bool> {
    let answer = console.prompt(&format!(
        "{}Try another language (\"retry\") or \"exit\"? ",
        prefix
    ))?;
    Ok(!answer.eq_ignore_ascii_case("exit"))
}

/// Print every accepted language name, plus the alias spellings that are
/// accepted on top of the canonical names.
fn print_languages<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    console.say("Printing all accepted languages...")?;

    for config in LanguageRegistry::get().list_all() {
        console.say(&format!("> {}", config.name))?;
    }
    for (alias, _) in DISPLAY_ALIASES {
        console.say(&format!("> {}", alias))?;
    }

    console.say("End of languages.\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scripted(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_select_and_confirm() {
        let mut console = scripted("Spanish\nYes\n");
        let language = select_language(&mut console).unwrap();
        assert_eq!(language.unwrap().code(), "es");
    }

    #[test]
    fn test_select_case_insensitive() {
        let mut console = scripted("sPaNiSh\nyes\n");
        let language = select_language(&mut console).unwrap();
        assert_eq!(language.unwrap().code(), "es");
    }

    #[test]
    fn test_alias_resolves_and_echoes_alias_name() {
        let mut console = scripted("mandarin chinese\nYes\n");
        let language = select_language(&mut console).unwrap();
        assert_eq!(language.unwrap().code(), "zh-cn");

        let mut console = scripted("mandarin chinese\nYes\n");
        select_language(&mut console).unwrap();
        let output = String::from_utf8(console.into_writer()).unwrap();
        assert!(output.contains("You have chosen: Mandarin Chinese."));
    }

    #[test]
    fn test_list_languages_then_select() {
        let mut console = scripted("list languages\nFrench\nYes\n");
        let language = select_language(&mut console).unwrap();
        assert_eq!(language.unwrap().code(), "fr");

        let mut console = scripted("list languages\nFrench\nYes\n");
        select_language(&mut console).unwrap();
        let output = String::from_utf8(console.into_writer()).unwrap();
        assert!(output.contains("Printing all accepted languages..."));
        assert!(output.contains("> Spanish"));
        assert!(output.contains("> Mandarin Chinese"));
        assert!(output.contains("> Traditional Taiwan"));
        assert!(output.contains("End of languages."));
    }

    #[test]
    fn test_unrecognized_then_retry() {
        let mut console = scripted("Klingon\nretry\nGerman\nYes\n");
        let language = select_language(&mut console).unwrap();
        assert_eq!(language.unwrap().code(), "de");

        let mut console = scripted("Klingon\nretry\nGerman\nYes\n");
        select_language(&mut console).unwrap();
        let output = String::from_utf8(console.into_writer()).unwrap();
        assert!(output.contains("\"Klingon\" not recognized."));
    }

    #[test]
    fn test_unrecognized_then_exit_needs_no_further_input() {
        // Input ends right after "exit": the dialog must terminate without
        // asking anything else.
        let mut console = scripted("Klingon\nexit\n");
        let language = select_language(&mut console).unwrap();
        assert!(language.is_none());
    }

    #[test]
    fn test_reject_confirmation_then_exit() {
        let mut console = scripted("Spanish\nNo\nexit\n");
        let language = select_language(&mut console).unwrap();
        assert!(language.is_none());
    }

    #[test]
    fn test_reject_confirmation_then_retry_other_language() {
        let mut console = scripted("Spanish\nNo\nretry\nItalian\nYes\n");
        let language = select_language(&mut console).unwrap();
        assert_eq!(language.unwrap().code(), "it");
    }

    #[test]
    fn test_nonempty_non_no_confirmation_counts_as_yes() {
        let mut console = scripted("Spanish\n\n");
        let language = select_language(&mut console).unwrap();
        assert_eq!(language.unwrap().code(), "es");
    }
}
