use std::collections::HashMap;
use std::ops::RangeInclusive;

use log::{debug, warn};

use crate::config::RequestProfiles;
use crate::error::Result;
use crate::llm::prompts::{SYSTEM_PROMPT_TRANSLATE_BATCH, SYSTEM_PROMPT_TRANSLATE_TEXT};
use crate::llm::{GenerationRequest, TextGenerator};

/// Cyrillic block. Text with too few characters from it is treated as
/// already translated.
pub const SOURCE_SCRIPT: RangeInclusive<char> = '\u{0400}'..='\u{04FF}';

/// Minimum share of source-script characters before a request is made.
pub const SOURCE_SCRIPT_MIN_RATIO: f64 = 0.1;

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// True when at least 10% of the characters are Cyrillic.
pub fn needs_translation(text: &str) -> bool {
    if is_blank(text) {
        return false;
    }
    let total = text.chars().count();
    let source = text.chars().filter(|c| SOURCE_SCRIPT.contains(c)).count();
    (source as f64) >= (total as f64) * SOURCE_SCRIPT_MIN_RATIO
}

/// Renders `(index, text)` pairs as `[index] text` lines. Line breaks inside
/// a text are folded into single spaces so every entry stays on its own line.
pub fn render_numbered(items: &[(usize, &str)]) -> String {
    items
        .iter()
        .map(|(i, text)| format!("[{}] {}", i, single_line(text)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses `[index] text` lines. Malformed lines are skipped, a repeated index
/// keeps the last occurrence, and empty translations are dropped.
pub fn parse_numbered(response: &str) -> HashMap<usize, String> {
    let mut parsed = HashMap::new();
    for line in response.lines() {
        let Some(rest) = line.trim().strip_prefix('[') else {
            continue;
        };
        let Some((tag, text)) = rest.split_once(']') else {
            continue;
        };
        let Ok(index) = tag.trim().parse::<usize>() else {
            continue;
        };
        let text = text.trim();
        if !text.is_empty() {
            parsed.insert(index, text.to_string());
        }
    }
    parsed
}

/// Translates report text through a [`TextGenerator`].
pub struct Translator<'a, G: TextGenerator + ?Sized> {
    generator: &'a G,
    profiles: RequestProfiles,
}

impl<'a, G: TextGenerator + ?Sized> Translator<'a, G> {
    pub fn new(generator: &'a G, profiles: RequestProfiles) -> Self {
        Self {
            generator,
            profiles,
        }
    }

    /// Translates one string. Blank text and text that is not mostly in the
    /// source script are returned as-is without a request.
    pub async fn translate_text(&self, text: &str) -> Result<String> {
        if !needs_translation(text) {
            return Ok(text.to_string());
        }

        let request = GenerationRequest::new(
            SYSTEM_PROMPT_TRANSLATE_TEXT,
            text,
            self.profiles.single_translation,
        );
        let translated = self.generator.generate(request).await?;
        Ok(translated.trim().to_string())
    }

    /// Translates several strings with one request.
    ///
    /// The result always has the input's length. Blank entries pass through,
    /// and any entry the response does not cover keeps its original text. A
    /// failed request degrades the whole batch to the originals.
    pub async fn translate_batch(&self, texts: &[String]) -> Vec<String> {
        let mut result = texts.to_vec();

        let non_empty: Vec<(usize, &str)> = texts
            .iter()
            .enumerate()
            .filter(|(_, t)| !is_blank(t))
            .map(|(i, t)| (i, t.as_str()))
            .collect();
        if non_empty.is_empty() {
            return result;
        }

        let numbered = render_numbered(&non_empty);
        debug!(
            "Batch translating {} of {} fields ({} chars)",
            non_empty.len(),
            texts.len(),
            numbered.len()
        );

        let request = GenerationRequest::new(
            SYSTEM_PROMPT_TRANSLATE_BATCH,
            numbered,
            self.profiles.batch_translation,
        );
        let response = match self.generator.generate(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Batch translation failed, keeping originals: {}", e);
                return result;
            }
        };

        let mut translations = parse_numbered(&response);
        let mut missing = 0;
        for (i, _) in &non_empty {
            match translations.remove(i) {
                Some(translated) => result[*i] = translated,
                None => missing += 1,
            }
        }
        if missing > 0 {
            warn!(
                "Batch response covered {} of {} fields; the rest stay untranslated",
                non_empty.len() - missing,
                non_empty.len()
            );
        }

        result
    }
}
