//! # Destination Matching
//!
//! Free-text destinations ("Honolulu, HI 96815") checked against region
//! markers. Two-letter codes must be whole words so "Chicago" is not "HI";
//! full names match as case-insensitive phrases.

/// A region recognised by its postal code and/or its spelled-out name.
#[derive(Debug, Clone, Copy)]
pub struct Region {
    pub codes: &'static [&'static str],
    pub names: &'static [&'static str],
}

impl Region {
    /// True when `destination` mentions this region.
    pub fn matches(&self, destination: &str) -> bool {
        let lower = destination.to_lowercase();
        let tokens = words(&lower);

        self.codes
            .iter()
            .any(|code| tokens.iter().any(|w| w.eq_ignore_ascii_case(code)))
            || self
                .names
                .iter()
                .any(|name| contains_phrase(&tokens, &name.to_lowercase()))
    }
}

/// Splits on punctuation/whitespace and on letter-digit boundaries, so
/// "HI96815" yields "hi" and "96815".
fn words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start: Option<(usize, bool)> = None;

    for (i, c) in text.char_indices() {
        let class = c.is_alphanumeric().then(|| c.is_numeric());
        match (start, class) {
            (Some((s, digit)), Some(is_digit)) if digit != is_digit => {
                words.push(&text[s..i]);
                start = Some((i, is_digit));
            }
            (Some(_), Some(_)) => {}
            (None, Some(is_digit)) => start = Some((i, is_digit)),
            (Some((s, _)), None) => {
                words.push(&text[s..i]);
                start = None;
            }
            (None, None) => {}
        }
    }
    if let Some((s, _)) = start {
        words.push(&text[s..]);
    }
    words
}

/// Word-aligned phrase search so "Alaskan Way, Seattle" is not Alaska.
fn contains_phrase(words: &[&str], phrase: &str) -> bool {
    let needle: Vec<&str> = phrase.split_whitespace().collect();
    if needle.is_empty() || needle.len() > words.len() {
        return false;
    }
    words.windows(needle.len()).any(|window| window == needle.as_slice())
}

/// Destinations that ship at the remote surcharge.
pub const REMOTE_REGIONS: &[Region] = &[
    Region {
        codes: &["HI"],
        names: &["Hawaii"],
    },
    Region {
        codes: &["AK"],
        names: &["Alaska"],
    },
    Region {
        codes: &["PR"],
        names: &["Puerto Rico"],
    },
];

/// The one taxing jurisdiction.
pub const NEW_JERSEY: Region = Region {
    codes: &["NJ"],
    names: &["New Jersey"],
};

/// True for Hawaii, Alaska and Puerto Rico destinations.
pub fn is_remote(destination: &str) -> bool {
    REMOTE_REGIONS.iter().any(|r| r.matches(destination))
}
