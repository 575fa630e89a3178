// src/extractors/sukta.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

// --- Constants ---
pub const DEFAULT_FIRST_MANDALA: u32 = 1;
pub const DEFAULT_LAST_MANDALA: u32 = 10;
pub const DEFAULT_FILE_PATTERN: &str = "mandala{n}.txt";
/// Placeholder in the file pattern replaced by the mandala index.
pub const MANDALA_PLACEHOLDER: &str = "{n}";

const LABEL_WORDS: usize = 3;
const LABEL_MAX_CHARS: usize = 20;
const LABEL_ELLIPSIS: &str = "...";

// --- Regex Patterns (Lazy Static) ---
// Trailing "mandala.sukta.mantra" reference, e.g. "... purohitam 1.1.1".
// `\d` is Unicode aware, so Devanagari numerals ("१.२.1") match as well.
static VERSE_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\.(\d+)\.(\d+)$")
        .expect("Failed to compile VERSE_REF_RE")
});

// Single decimal digit of any script
static DIGIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d$").expect("Failed to compile DIGIT_RE")
});

// --- Data Structures ---
/// Non-negative integer of any size, stored as canonical ASCII digits
/// (no leading zeros). Written to the table exactly like an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MarkerNumber(String);

impl MarkerNumber {
    /// Parses a run of decimal digits from any script, e.g. "007" or "१२".
    pub fn from_digits(digits: &str) -> Option<Self> {
        let ascii = digits
            .chars()
            .map(|c| digit_value(c).and_then(|d| char::from_digit(d, 10)))
            .collect::<Option<String>>()?;
        if ascii.is_empty() {
            return None;
        }

        let trimmed = ascii.trim_start_matches('0');
        Some(Self(if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() }))
    }
}

impl From<u64> for MarkerNumber {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for MarkerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the output table: the first-mantra label of a sukta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuktaRecord {
    pub mandala: MarkerNumber,
    pub sukta: MarkerNumber,
    pub name: String,
}

/// Reference parsed from the end of a verse line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRef<'a> {
    pub mandala: MarkerNumber,
    pub sukta: MarkerNumber,
    pub mantra: &'a str, // kept literal: only "1" opens a sukta
}

impl VerseRef<'_> {
    pub fn is_first_mantra(&self) -> bool {
        self.mantra == "1"
    }
}

/// What to do with a mandala file that exists but cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnreadablePolicy {
    #[default]
    Abort,
    SkipAndWarn,
}

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub input_dir: PathBuf,
    pub first_mandala: u32,
    pub last_mandala: u32,
    pub file_pattern: String,
    pub unreadable: UnreadablePolicy,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./"),
            first_mandala: DEFAULT_FIRST_MANDALA,
            last_mandala: DEFAULT_LAST_MANDALA,
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            unreadable: UnreadablePolicy::Abort,
        }
    }
}

impl ExtractorConfig {
    /// Expected path of the file holding mandala `index`.
    pub fn mandala_path(&self, index: u32) -> PathBuf {
        let file_name = self.file_pattern.replace(MANDALA_PLACEHOLDER, &index.to_string());
        self.input_dir.join(file_name)
    }
}

/// Records of a whole run plus every file that was passed over.
#[derive(Debug, Default)]
pub struct ExtractionOutcome {
    pub records: Vec<SuktaRecord>,
    pub missing: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

// --- Parsing Helpers ---

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DIGIT_RE.is_match(c.encode_utf8(&mut buf))
}

/// Numeric value of a decimal digit from any script.
/// Unicode lays decimal digits out in contiguous runs of ten starting at
/// zero, so the value is the offset from the start of the run modulo ten.
fn digit_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }

    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    Some((c as u32 - start) % 10)
}

/// Splits a trimmed line into its verse text and trailing reference.
/// Returns `None` for lines without a well-formed reference.
pub fn split_verse_line(line: &str) -> Option<(&str, VerseRef<'_>)> {
    let caps = VERSE_REF_RE.captures(line)?;
    let whole = caps.get(0)?;

    let mandala = MarkerNumber::from_digits(caps.get(1)?.as_str())?;
    let sukta = MarkerNumber::from_digits(caps.get(2)?.as_str())?;
    let mantra = caps.get(3)?.as_str();

    let text = line[..whole.start()].trim();
    Some((text, VerseRef { mandala, sukta, mantra }))
}

/// Builds the display label from the first words of a verse.
pub fn derive_label(text: &str) -> String {
    let name = text
        .split_whitespace()
        .take(LABEL_WORDS)
        .collect::<Vec<_>>()
        .join(" ");

    // Character counts, not bytes: labels are usually Devanagari or IAST.
    if name.chars().count() > LABEL_MAX_CHARS {
        let mut truncated: String = name.chars().take(LABEL_MAX_CHARS).collect();
        truncated.push_str(LABEL_ELLIPSIS);
        truncated
    } else {
        name
    }
}

// --- Main Extractor Structure ---
pub struct SuktaExtractor {
    config: ExtractorConfig,
}

impl SuktaExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Walks every mandala index in the configured range and collects the
    /// first-mantra record of each sukta, in file order.
    pub fn extract_all(&self) -> Result<ExtractionOutcome, ExtractError> {
        let mut outcome = ExtractionOutcome::default();

        for index in self.config.first_mandala..=self.config.last_mandala {
            let path = self.config.mandala_path(index);
            if !path.exists() {
                tracing::warn!("{} not found, skipping mandala {}", path.display(), index);
                outcome.missing.push(path);
                continue;
            }

            match self.extract_file(&path) {
                Ok(records) => {
                    tracing::debug!("Mandala {}: {} suktas from {}", index, records.len(), path.display());
                    outcome.records.extend(records);
                }
                Err(e) if self.config.unreadable == UnreadablePolicy::SkipAndWarn => {
                    tracing::warn!("{}, skipping mandala {}", e, index);
                    outcome.skipped.push(path);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::debug!(
            "Extracted {} suktas ({} files missing, {} skipped)",
            outcome.records.len(),
            outcome.missing.len(),
            outcome.skipped.len()
        );
        Ok(outcome)
    }

    /// Extracts the records of a single mandala file.
    pub fn extract_file(&self, path: &Path) -> Result<Vec<SuktaRecord>, ExtractError> {
        let to_error = |source: io::Error| ExtractError::Unreadable {
            path: path.display().to_string(),
            source,
        };

        let file = File::open(path).map_err(to_error)?;
        Self::extract_lines(BufReader::new(file)).map_err(to_error)
    }

    /// Core pass over one file's lines. The seen-set lives only for this call.
    pub fn extract_lines<R: BufRead>(reader: R) -> io::Result<Vec<SuktaRecord>> {
        let mut records = Vec::new();
        let mut seen: HashSet<(MarkerNumber, MarkerNumber)> = HashSet::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();

            let Some((text, verse)) = split_verse_line(line) else {
                continue;
            };
            if !verse.is_first_mantra() {
                continue;
            }
            if !seen.insert((verse.mandala.clone(), verse.sukta.clone())) {
                tracing::trace!("Duplicate first mantra for {}.{}, ignoring", verse.mandala, verse.sukta);
                continue;
            }

            records.push(SuktaRecord {
                mandala: verse.mandala,
                sukta: verse.sukta,
                name: derive_label(text),
            });
        }

        Ok(records)
    }
}
