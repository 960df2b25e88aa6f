#![forbid(unsafe_code)]

//! Typewriter text cycler.
//!
//! A two-phase state machine over a fixed, non-empty word list:
//!
//! - **Typing**: each tick reveals one more character of the current word.
//!   Once the word is complete the machine switches to deleting and asks for
//!   the long hold pause.
//! - **Deleting**: each tick removes one character. Once the text is empty
//!   the word index advances modulo the list length and the machine switches
//!   back to typing after a short pause.
//!
//! [`Typewriter::tick`] returns the text to display together with the delay
//! before the next tick, so the host re-arms a one-shot timer each time
//! instead of running a fixed interval.
//!
//! # Invariants
//!
//! 1. `word_index < words.len()` at all times.
//! 2. `char_index <= current word length` (in characters) at all times.
//! 3. The displayed text is always a character prefix of the current word.

use std::fmt;
use std::time::Duration;

/// Delays between ticks for each transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTimings {
    pub type_delay: Duration,
    pub delete_delay: Duration,
    /// Pause after a word is fully typed.
    pub hold_delay: Duration,
    /// Pause after a word is fully deleted.
    pub next_word_delay: Duration,
}

impl Default for TypewriterTimings {
    fn default() -> Self {
        Self {
            type_delay: Duration::from_millis(100),
            delete_delay: Duration::from_millis(50),
            hold_delay: Duration::from_millis(2000),
            next_word_delay: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Deleting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypewriterError {
    NoWords,
    EmptyWord { index: usize },
}

impl fmt::Display for TypewriterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWords => write!(f, "typewriter needs at least one word"),
            Self::EmptyWord { index } => write!(f, "typewriter word {index} is empty"),
        }
    }
}

impl std::error::Error for TypewriterError {}

/// Output of one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeStep<'a> {
    /// Text to display after this tick.
    pub text: &'a str,
    /// Delay before the next tick.
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    words: Vec<String>,
    timings: TypewriterTimings,
    word_index: usize,
    /// Visible length of the current word, in characters.
    char_index: usize,
    phase: Phase,
}

impl Typewriter {
    /// Create a typewriter at word 0, empty text, typing.
    pub fn new(words: Vec<String>, timings: TypewriterTimings) -> Result<Self, TypewriterError> {
        if words.is_empty() {
            return Err(TypewriterError::NoWords);
        }
        if let Some(index) = words.iter().position(String::is_empty) {
            return Err(TypewriterError::EmptyWord { index });
        }
        Ok(Self {
            words,
            timings,
            word_index: 0,
            char_index: 0,
            phase: Phase::Typing,
        })
    }

    /// Advance one character and report what to show and when to tick next.
    pub fn tick(&mut self) -> TypeStep<'_> {
        let len = self.word_char_len();
        let mut delay = match self.phase {
            Phase::Deleting => {
                self.char_index = self.char_index.saturating_sub(1);
                self.timings.delete_delay
            }
            Phase::Typing => {
                self.char_index = (self.char_index + 1).min(len);
                self.timings.type_delay
            }
        };

        match self.phase {
            Phase::Typing if self.char_index == len => {
                self.phase = Phase::Deleting;
                delay = self.timings.hold_delay;
            }
            Phase::Deleting if self.char_index == 0 => {
                self.phase = Phase::Typing;
                self.word_index = (self.word_index + 1) % self.words.len();
                delay = self.timings.next_word_delay;
            }
            _ => {}
        }

        // After a word change char_index is 0, so the new word's prefix is "".
        let text = prefix(&self.words[self.word_index], self.char_index);
        TypeStep { text, delay }
    }

    /// Currently displayed text.
    #[must_use]
    pub fn text(&self) -> &str {
        prefix(&self.words[self.word_index], self.char_index)
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn word_index(&self) -> usize {
        self.word_index
    }

    #[must_use]
    pub const fn char_index(&self) -> usize {
        self.char_index
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    fn word_char_len(&self) -> usize {
        self.words[self.word_index].chars().count()
    }
}

/// First `chars` characters of `word`, sliced on a char boundary.
fn prefix(word: &str, chars: usize) -> &str {
    match word.char_indices().nth(chars) {
        Some((byte, _)) => &word[..byte],
        None => word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| (*w).to_string()).collect()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn rejects_empty_list() {
        let err = Typewriter::new(Vec::new(), TypewriterTimings::default()).unwrap_err();
        assert_eq!(err, TypewriterError::NoWords);
    }

    #[test]
    fn rejects_empty_word() {
        let err =
            Typewriter::new(words(&["ok", ""]), TypewriterTimings::default()).unwrap_err();
        assert_eq!(err, TypewriterError::EmptyWord { index: 1 });
        assert_eq!(err.to_string(), "typewriter word 1 is empty");
    }

    #[test]
    fn types_then_holds_then_deletes() {
        let mut tw = Typewriter::new(words(&["abc", "de"]), TypewriterTimings::default()).unwrap();

        let steps: Vec<(String, Duration)> = (0..7)
            .map(|_| {
                let s = tw.tick();
                (s.text.to_string(), s.delay)
            })
            .collect();

        assert_eq!(
            steps,
            vec![
                ("a".to_string(), ms(100)),
                ("ab".to_string(), ms(100)),
                ("abc".to_string(), ms(2000)),
                ("ab".to_string(), ms(50)),
                ("a".to_string(), ms(50)),
                (String::new(), ms(500)),
                ("d".to_string(), ms(100)),
            ]
        );
        assert_eq!(tw.word_index(), 1);
        assert_eq!(tw.phase(), Phase::Typing);
    }

    #[test]
    fn phase_flips_when_word_complete() {
        let mut tw = Typewriter::new(words(&["hi"]), TypewriterTimings::default()).unwrap();
        tw.tick();
        assert_eq!(tw.phase(), Phase::Typing);
        tw.tick();
        assert_eq!(tw.phase(), Phase::Deleting);
        assert_eq!(tw.text(), "hi");
    }

    #[test]
    fn word_index_wraps() {
        let mut tw = Typewriter::new(words(&["a", "b"]), TypewriterTimings::default()).unwrap();
        // "a" typed (hold), deleted (next word), "b" typed, deleted, back to "a".
        for _ in 0..4 {
            tw.tick();
        }
        assert_eq!(tw.word_index(), 0);
        assert_eq!(tw.tick().text, "a");
    }

    #[test]
    fn multibyte_words_slice_on_char_boundaries() {
        let mut tw = Typewriter::new(words(&["héé"]), TypewriterTimings::default()).unwrap();
        assert_eq!(tw.tick().text, "h");
        assert_eq!(tw.tick().text, "hé");
        assert_eq!(tw.tick().text, "héé");
        assert_eq!(tw.tick().text, "hé");
    }

    #[test]
    fn custom_timings_are_used() {
        let timings = TypewriterTimings {
            type_delay: ms(7),
            delete_delay: ms(3),
            hold_delay: ms(11),
            next_word_delay: ms(13),
        };
        let mut tw = Typewriter::new(words(&["xy"]), timings).unwrap();
        assert_eq!(tw.tick().delay, ms(7));
        assert_eq!(tw.tick().delay, ms(11));
        assert_eq!(tw.tick().delay, ms(3));
        assert_eq!(tw.tick().delay, ms(13));
    }
}
