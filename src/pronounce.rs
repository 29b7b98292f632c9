//! Pronunciation judging: transcript normalization and the verdict for one
//! spoken attempt.

use crate::stt::RecognitionError;

/// Outcome of a single pronunciation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptVerdict {
    /// Transcript matched the expected phrase.
    Correct,
    /// Something was recognized, but not the expected phrase.
    Mismatch { heard: String },
    /// The service heard no intelligible speech.
    NothingHeard,
    /// The recognition request itself failed.
    ServiceFailure(String),
}

impl AttemptVerdict {
    /// The user-facing message for this verdict. Each of the four outcomes
    /// has a distinct message.
    pub fn message(&self) -> String {
        match self {
            AttemptVerdict::Correct => "Great job!".to_string(),
            AttemptVerdict::Mismatch { heard } => {
                format!("I heard: {}\nNot quite there yet!", heard)
            }
            AttemptVerdict::NothingHeard => {
                "Utterly unintelligible! I heard nothing :(".to_string()
            }
            AttemptVerdict::ServiceFailure(_) => {
                "Either speech recognition failed, the key was not recognized, or there is no internet connection.\n\
                 Try to check these areas before attempting any new phrases."
                    .to_string()
            }
        }
    }
}

/// Judge a recognition outcome against the expected phrase.
pub fn judge(expected: &str, outcome: Result<String, RecognitionError>) -> AttemptVerdict {
    match outcome {
        Ok(transcript) => {
            if is_match(expected, &transcript) {
                AttemptVerdict::Correct
            } else {
                AttemptVerdict::Mismatch { heard: transcript }
            }
        }
        Err(RecognitionError::NoSpeech) => AttemptVerdict::NothingHeard,
        Err(RecognitionError::Service(message)) => AttemptVerdict::ServiceFailure(message),
    }
}

/// Case-insensitive comparison ignoring leading and trailing punctuation
/// and whitespace on both sides. Interior punctuation still counts.
pub fn is_match(expected: &str, transcript: &str) -> bool {
    normalize(expected) == normalize(transcript)
}

/// Strip edge punctuation/whitespace and lowercase.
fn normalize(text: &str) -> String {
    text.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_match_exact() {
        assert!(is_match("Hola", "Hola"));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert!(is_match("Hola", "hola"));
        assert!(is_match("hola", "HOLA"));
    }

    #[test]
    fn test_match_ignores_edge_punctuation() {
        assert!(is_match("Hello!", "hello"));
        assert!(is_match("¡Hola!", "hola"));
        assert!(is_match("Bonjour.", "bonjour"));
        assert!(is_match("hello", "  hello  "));
    }

    #[test]
    fn test_match_non_ascii_case_folding() {
        assert!(is_match("Ça va", "ça va"));
        assert!(is_match("GRÜSS GOTT", "grüss gott"));
    }

    #[test]
    fn test_interior_punctuation_still_counts() {
        assert!(!is_match("a,b", "ab"));
        assert!(is_match("how's it going", "How's it going?"));
    }

    #[test]
    fn test_mismatch() {
        assert!(!is_match("Hola", "Adios"));
        assert!(!is_match("Hola", ""));
    }

    #[test]
    fn test_judge_correct() {
        let verdict = judge("Hola", Ok("hola".to_string()));
        assert_eq!(verdict, AttemptVerdict::Correct);
        assert_eq!(verdict.message(), "Great job!");
    }

    #[test]
    fn test_judge_mismatch_echoes_transcript() {
        let verdict = judge("Hola", Ok("ola que tal".to_string()));
        assert_eq!(
            verdict,
            AttemptVerdict::Mismatch {
                heard: "ola que tal".to_string()
            }
        );
        assert!(verdict.message().contains("I heard: ola que tal"));
        assert!(verdict.message().contains("Not quite there yet!"));
    }

    #[test]
    fn test_judge_no_speech() {
        let verdict = judge("Hola", Err(RecognitionError::NoSpeech));
        assert_eq!(verdict, AttemptVerdict::NothingHeard);
        assert!(verdict.message().contains("heard nothing"));
    }

    #[test]
    fn test_judge_service_failure() {
        let verdict = judge(
            "Hola",
            Err(RecognitionError::Service("connection refused".to_string())),
        );
        assert!(matches!(verdict, AttemptVerdict::ServiceFailure(_)));
        assert!(verdict.message().contains("internet connection"));
    }

    #[test]
    fn test_all_four_messages_are_distinct() {
        let messages = [
            judge("x", Ok("x".to_string())).message(),
            judge("x", Ok("y".to_string())).message(),
            judge("x", Err(RecognitionError::NoSpeech)).message(),
            judge("x", Err(RecognitionError::Service("s".to_string()))).message(),
        ];

        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    proptest! {
        /// Edge punctuation and ASCII case never affect the comparison.
        #[test]
        fn prop_punctuation_wrapping_preserves_match(
            phrase in "[a-z]{1,10}( [a-z]{1,10}){0,3}",
            prefix in "[!?.,;:¡¿\\s]{0,5}",
            suffix in "[!?.,;:¡¿\\s]{0,5}",
        ) {
            let decorated = format!("{}{}{}", prefix, phrase.to_uppercase(), suffix);
            prop_assert!(is_match(&decorated, &phrase));
            prop_assert!(is_match(&phrase, &decorated));
        }

        /// Normalization is idempotent with respect to matching.
        #[test]
        fn prop_match_is_symmetric(
            a in "[a-zA-Z!?. ]{0,20}",
            b in "[a-zA-Z!?. ]{0,20}",
        ) {
            prop_assert_eq!(is_match(&a, &b), is_match(&b, &a));
        }
    }
}
