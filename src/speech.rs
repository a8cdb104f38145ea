//! Speech synthesis collaborator.
//!
//! Pronunciations play through a platform synthesizer process (`say` on
//! macOS, `espeak-ng`/`espeak` elsewhere, or a configured override). The
//! engine is opaque to the rest of the app: hand it a string and a locale
//! tag. Failures surface to the UI as status messages and never mutate
//! application state.

use std::env;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::models::WordEntry;

/// Why a pronunciation could not be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// No synthesizer binary exists on this platform.
    Unavailable,
    /// The requested locale has no voice and no fallback text exists.
    VoiceMissing(String),
    /// The synthesizer process could not be started.
    Failed(String),
}

impl std::fmt::Display for SpeechError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpeechError::Unavailable => write!(f, "Speech synthesis is not available"),
            SpeechError::VoiceMissing(locale) => {
                write!(f, "No voice installed for {}", locale)
            }
            SpeechError::Failed(msg) => write!(f, "Speech synthesis failed: {}", msg),
        }
    }
}

impl std::error::Error for SpeechError {}

/// What the app needs from a synthesizer. Behind a trait so the
/// pronunciation policy is testable without spawning processes.
pub trait SpeechPort {
    fn speak(&self, text: &str, locale: &str) -> Result<(), SpeechError>;
    /// Whether a voice matching the locale's language is installed.
    fn has_voice(&self, locale: &str) -> bool;
}

enum Backend {
    /// macOS `say`.
    Say,
    /// `espeak-ng` or `espeak`, whichever is on PATH.
    Espeak(String),
    /// User-configured program, invoked as `<program> <locale> <text>`.
    Custom(String),
}

/// Process-spawning synthesizer.
pub struct Synthesizer {
    backend: Option<Backend>,
}

impl Synthesizer {
    /// Probe for a synthesizer, preferring the configured override.
    pub fn new(command_override: Option<String>) -> Self {
        let backend = match command_override {
            Some(cmd) => find_in_path(&cmd).map(|_| Backend::Custom(cmd)),
            None => detect_backend(),
        };
        Self { backend }
    }
}

fn detect_backend() -> Option<Backend> {
    if cfg!(target_os = "macos") && find_in_path("say").is_some() {
        return Some(Backend::Say);
    }
    for candidate in ["espeak-ng", "espeak"] {
        if find_in_path(candidate).is_some() {
            return Some(Backend::Espeak(candidate.to_string()));
        }
    }
    None
}

fn find_in_path(program: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|p| p.is_file())
}

/// Primary language subtag of a BCP-47 tag ("ar-SA" -> "ar").
fn primary_subtag(locale: &str) -> &str {
    locale.split('-').next().unwrap_or(locale)
}

impl SpeechPort for Synthesizer {
    fn speak(&self, text: &str, locale: &str) -> Result<(), SpeechError> {
        let backend = self.backend.as_ref().ok_or(SpeechError::Unavailable)?;

        let mut cmd = match backend {
            Backend::Say => {
                let mut c = Command::new("say");
                c.arg("-r").arg("180").arg(text);
                c
            }
            Backend::Espeak(program) => {
                let mut c = Command::new(program);
                c.arg("-v")
                    .arg(primary_subtag(locale))
                    .arg("-s")
                    .arg("140")
                    .arg(text);
                c
            }
            Backend::Custom(program) => {
                let mut c = Command::new(program);
                c.arg(locale).arg(text);
                c
            }
        };

        // Fire and forget; playback runs while the UI keeps handling events.
        cmd.stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| SpeechError::Failed(e.to_string()))
    }

    fn has_voice(&self, locale: &str) -> bool {
        match self.backend.as_ref() {
            None => false,
            Some(Backend::Say) | Some(Backend::Custom(_)) => true,
            Some(Backend::Espeak(program)) => Command::new(program)
                .arg(format!("--voices={}", primary_subtag(locale)))
                .stderr(Stdio::null())
                .output()
                .map(|out| {
                    // First line is the column header.
                    out.status.success()
                        && String::from_utf8_lossy(&out.stdout).lines().count() > 1
                })
                .unwrap_or(false),
        }
    }
}

/// Play a word entry's pronunciation.
///
/// The Arabic group falls back to the phonetic respelling spoken with an
/// English voice when no Arabic voice is installed; `Ok(Some(_))` carries
/// the warning shown for that case. Everything else speaks the native
/// form at the language's locale.
pub fn pronounce(
    port: &dyn SpeechPort,
    entry: &WordEntry,
    locale: &str,
) -> Result<Option<String>, SpeechError> {
    if entry.language == "Arabic" && !port.has_voice(locale) {
        if entry.pronunciation.is_empty() {
            return Err(SpeechError::VoiceMissing(locale.to_string()));
        }
        port.speak(&entry.pronunciation, "en-US")?;
        return Ok(Some(format!(
            "No Arabic voice available, using phonetic \"{}\"",
            entry.pronunciation
        )));
    }
    port.speak(&entry.word, locale)?;
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakePort {
        voiced: bool,
        available: bool,
        spoken: RefCell<Vec<(String, String)>>,
    }

    impl FakePort {
        fn new(voiced: bool, available: bool) -> Self {
            Self {
                voiced,
                available,
                spoken: RefCell::new(Vec::new()),
            }
        }
    }

    impl SpeechPort for FakePort {
        fn speak(&self, text: &str, locale: &str) -> Result<(), SpeechError> {
            if !self.available {
                return Err(SpeechError::Unavailable);
            }
            self.spoken
                .borrow_mut()
                .push((text.to_string(), locale.to_string()));
            Ok(())
        }

        fn has_voice(&self, _locale: &str) -> bool {
            self.voiced
        }
    }

    fn arabic_entry(pronunciation: &str) -> WordEntry {
        WordEntry {
            id: "najwa".to_string(),
            word: "نجوى".to_string(),
            language: "Arabic".to_string(),
            meaning: "Secret conversation".to_string(),
            story: String::new(),
            pronunciation: pronunciation.to_string(),
        }
    }

    #[test]
    fn test_primary_subtag() {
        assert_eq!(primary_subtag("ar-SA"), "ar");
        assert_eq!(primary_subtag("ja"), "ja");
    }

    #[test]
    fn test_speaks_native_form_when_voiced() {
        let port = FakePort::new(true, true);
        let entry = arabic_entry("NAJ-wah");
        let warning = pronounce(&port, &entry, "ar-SA").unwrap();
        assert!(warning.is_none());
        assert_eq!(
            port.spoken.borrow().as_slice(),
            &[("نجوى".to_string(), "ar-SA".to_string())]
        );
    }

    #[test]
    fn test_arabic_falls_back_to_phonetic() {
        let port = FakePort::new(false, true);
        let entry = arabic_entry("NAJ-wah");
        let warning = pronounce(&port, &entry, "ar-SA").unwrap();
        assert!(warning.unwrap().contains("NAJ-wah"));
        assert_eq!(
            port.spoken.borrow().as_slice(),
            &[("NAJ-wah".to_string(), "en-US".to_string())]
        );
    }

    #[test]
    fn test_voiceless_without_fallback_aborts_cleanly() {
        let port = FakePort::new(false, true);
        let entry = arabic_entry("");
        let err = pronounce(&port, &entry, "ar-SA").unwrap_err();
        assert_eq!(err, SpeechError::VoiceMissing("ar-SA".to_string()));
        assert!(port.spoken.borrow().is_empty());
    }

    #[test]
    fn test_unavailable_platform_propagates() {
        let port = FakePort::new(true, false);
        let mut entry = arabic_entry("NAJ-wah");
        entry.language = "Japanese".to_string();
        let err = pronounce(&port, &entry, "ja-JP").unwrap_err();
        assert_eq!(err, SpeechError::Unavailable);
    }
}
