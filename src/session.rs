//! Interactive session: owns the selected language and the current phrase,
//! and drives the menu loop over the translation, playback and
//! pronunciation flows.

use crate::audio::capture::record_utterance;
use crate::audio::playback::play_wav_file;
use crate::config::Config;
use crate::console::Console;
use crate::languages::Language;
use crate::menu::{self, MenuChoice};
use crate::pronounce;
use crate::selector::select_language;
use crate::stt::recognize_speech;
use crate::translate::translate_phrase;
use crate::tts::synthesize_speech;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// The current phrase: English source, translated text, and the audio file
/// synthesized for the translation. Replaced wholesale on each translation.
#[derive(Debug, Clone)]
pub struct Phrase {
    pub english: String,
    pub translated: String,
    pub audio_path: PathBuf,
}

/// Translate an English phrase and synthesize its audio, enforcing the
/// single-file overwrite semantics: any previous audio file at the
/// configured path is deleted before the new one is written, so at most one
/// exists and it always corresponds to the most recent translation.
pub async fn refresh_phrase(
    client: &reqwest::Client,
    config: &Config,
    english: &str,
    language: Language,
) -> Result<Phrase> {
    let audio_path = Path::new(&config.audio_file);
    if audio_path.exists() {
        std::fs::remove_file(audio_path).with_context(|| {
            format!("Failed to remove previous audio file {}", audio_path.display())
        })?;
    }

    let translated = translate_phrase(client, config, english, language).await?;

    let audio = synthesize_speech(client, config, &translated, language).await?;
    std::fs::write(audio_path, &audio)
        .with_context(|| format!("Failed to write audio file {}", audio_path.display()))?;

    info!(
        language = language.code(),
        audio = %audio_path.display(),
        "phrase translated and synthesized"
    );

    Ok(Phrase {
        english: english.to_string(),
        translated,
        audio_path: audio_path.to_path_buf(),
    })
}

pub struct Session<R, W> {
    config: Config,
    client: reqwest::Client,
    console: Console<R, W>,
    language: Language,
    phrase: Option<Phrase>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: Config, console: Console<R, W>) -> Self {
        Session {
            config,
            client: reqwest::Client::new(),
            console,
            language: Language::ENGLISH,
            phrase: None,
        }
    }

    /// Run the whole interactive session: welcome, first language and
    /// phrase, then the menu loop until exit.
    pub async fn run(&mut self) -> Result<()> {
        self.console.say("Hello! Welcome to LinguaFranca.")?;

        match select_language(&mut self.console)? {
            Some(language) => self.language = language,
            None => return self.goodbye(),
        }

        self.translate_new_phrase().await?;

        if self.console.confirm("Play translation? \"Yes\" or \"No\": ")? {
            self.play_current()?;
        }

        if self
            .console
            .confirm("Would you like to attempt this phrase? \"Yes\" or \"No\": ")?
        {
            self.pronounce_current().await?;
        }

        loop {
            let current_phrase = self
                .phrase
                .as_ref()
                .map(|p| p.translated.clone())
                .unwrap_or_default();
            let input = self
                .console
                .prompt(&menu::render(self.language.name(), &current_phrase))?;

            match MenuChoice::parse(&input) {
                Some(MenuChoice::Language) => match select_language(&mut self.console)? {
                    Some(language) => self.language = language,
                    None => break,
                },
                Some(MenuChoice::Translate) => self.translate_new_phrase().await?,
                Some(MenuChoice::Play) => self.play_current()?,
                Some(MenuChoice::Pronounce) => self.pronounce_current().await?,
                Some(MenuChoice::Exit) => break,
                None => {
                    self.console.say("Option not recognized, try again.")?;
                }
            }
        }

        self.goodbye()
    }

    fn goodbye(&mut self) -> Result<()> {
        self.console.say("Closing LinguaFranca... Goodbye!")?;
        Ok(())
    }

    /// Prompt for a phrase, translate it and synthesize its audio.
    async fn translate_new_phrase(&mut self) -> Result<()> {
        let english = self
            .console
            .prompt("Enter the phrase you would like to translate: ")?;

        let phrase =
            refresh_phrase(&self.client, &self.config, &english, self.language).await?;

        self.console.say(&format!(
            "\"{}\" becomes... \"{}\"",
            phrase.english, phrase.translated
        ))?;

        self.phrase = Some(phrase);
        Ok(())
    }

    /// Play the current audio file until the user declines a replay.
    fn play_current(&mut self) -> Result<()> {
        let Some(audio_path) = self.phrase.as_ref().map(|p| p.audio_path.clone()) else {
            return self.console.say("Translate a phrase first.");
        };

        loop {
            self.console.say("Playing translation...")?;
            play_wav_file(&audio_path).context("Failed to play translation audio")?;

            if !self.console.confirm("Replay? \"Yes\" or \"No\": ")? {
                return Ok(());
            }
        }
    }

    /// Pronunciation attempts: play the reference, capture the microphone,
    /// judge the transcript. Repeats until the user declines.
    async fn pronounce_current(&mut self) -> Result<()> {
        let Some(phrase) = self.phrase.clone() else {
            return self.console.say("Translate a phrase first.");
        };

        loop {
            self.console.say("Playing phrase...")?;
            play_wav_file(&phrase.audio_path).context("Failed to play reference audio")?;
            self.console.say(&format!("\"{}\"", phrase.translated))?;

            self.console.say("Try to repeat!")?;
            let utterance =
                record_utterance(Duration::from_secs(self.config.capture_timeout_secs))
                    .context("Failed to capture microphone audio")?;

            let outcome = recognize_speech(
                &self.client,
                &self.config,
                &utterance.samples,
                utterance.sample_rate_hz,
                self.language,
            )
            .await;

            let verdict = pronounce::judge(&phrase.translated, outcome);
            self.console.say(&verdict.message())?;

            if !self
                .console
                .confirm("Would you like to try again? \"Yes\" or \"No\": ")?
            {
                return Ok(());
            }
        }
    }
}
