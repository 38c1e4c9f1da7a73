//! `word_list`: load and normalize the word list for the grid filler.
//!
//! Each non-empty line is either a bare word or `word;score`. Parsing:
//! - words are trimmed and uppercased;
//! - when a score is present and parses, entries scoring below `min_score` are dropped
//!   (lines whose score does not parse are skipped);
//! - words containing anything other than ASCII letters are skipped, since overlaps are
//!   compared letter-by-letter on bytes;
//! - the result is deduplicated and sorted by length first, then alphabetically.

use log::debug;

/// A processed, ready-to-use word list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    /// Uppercase words, sorted by (length, alphabetical).
    /// Example: `["CAT", "DOG", "ABLE", ...]`
    pub words: Vec<String>,
}

impl WordList {
    /// Parse a raw word list from an in-memory string.
    #[must_use]
    pub fn parse_from_str(contents: &str, min_score: i32) -> WordList {
        let mut skipped = 0usize;

        let mut words: Vec<String> = contents
            .lines()
            .filter_map(|raw_line| {
                let line = raw_line.trim();
                if line.is_empty() {
                    return None;
                }

                let word_raw = match line.split_once(';') {
                    Some((word_raw, score_raw)) => {
                        let Ok(score) = score_raw.trim().parse::<i32>() else {
                            skipped += 1;
                            return None;
                        };
                        if score < min_score {
                            return None;
                        }
                        word_raw
                    }
                    None => line,
                };

                let word = word_raw.trim().to_ascii_uppercase();
                if word.is_empty() || !word.bytes().all(|b| b.is_ascii_uppercase()) {
                    skipped += 1;
                    return None;
                }
                Some(word)
            })
            .collect();

        // dedup() only removes adjacent duplicates, so sort alphabetically first
        words.sort();
        words.dedup();
        words.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        if skipped > 0 {
            debug!("Skipped {skipped} malformed word-list lines");
        }

        WordList { words }
    }

    /// Native-only convenience method: read from a file path and parse.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if unable to read a file at `path`.
    pub fn load_from_path<P: AsRef<std::path::Path>>(
        path: P,
        min_score: i32,
    ) -> std::io::Result<WordList> {
        let path_ref = path.as_ref();

        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read word list from '{}': {}", path_ref.display(), e),
            )
        })?;

        Ok(Self::parse_from_str(&data, min_score))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Borrowed view, the shape [`crate::solver::Solver::new`] takes.
    #[must_use]
    pub fn as_strs(&self) -> Vec<&str> {
        self.words.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_words() {
        let word_list = WordList::parse_from_str("cat\ndog\nbird", 0);
        assert_eq!(word_list.words, vec!["CAT", "DOG", "BIRD"]);
    }

    #[test]
    fn test_parse_filters_low_scores() {
        let input = "apple;100\nbanana;20\ncherry;80";
        let word_list = WordList::parse_from_str(input, 50);

        assert_eq!(word_list.words, vec!["APPLE", "CHERRY"]);
    }

    #[test]
    fn test_unscored_words_ignore_min_score() {
        let word_list = WordList::parse_from_str("cat\ndog;10", 50);
        assert_eq!(word_list.words, vec!["CAT"]);
    }

    #[test]
    fn test_parse_deduplicates_case_insensitively() {
        let input = "cat\nDog\nCAT\ncat;80";
        let word_list = WordList::parse_from_str(input, 0);

        assert_eq!(word_list.words, vec!["CAT", "DOG"]);
    }

    #[test]
    fn test_parse_sorts_by_length_then_alpha() {
        let input = "dog\napple\ncat\nab\nzebra";
        let word_list = WordList::parse_from_str(input, 0);

        assert_eq!(word_list.words, vec!["AB", "CAT", "DOG", "APPLE", "ZEBRA"]);
    }

    #[test]
    fn test_parse_skips_empty_and_malformed_lines() {
        let input = "cat\n\n\ndog\nice cream\nno-dash\napple;bad_score\ncafé\n";
        let word_list = WordList::parse_from_str(input, 0);

        assert_eq!(word_list.words, vec!["CAT", "DOG"]);
    }

    #[test]
    fn test_parse_handles_whitespace_and_crlf() {
        let input = "  cat  ;  50  \r\n  dog  \r\n";
        let word_list = WordList::parse_from_str(input, 45);

        assert_eq!(word_list.words, vec!["CAT", "DOG"]);
    }

    #[test]
    fn test_parse_empty_input() {
        let word_list = WordList::parse_from_str("", 0);
        assert!(word_list.is_empty());
        assert_eq!(word_list.len(), 0);
    }

    #[test]
    fn test_as_strs() {
        let word_list = WordList::parse_from_str("b\naa", 0);
        assert_eq!(word_list.as_strs(), vec!["B", "AA"]);
    }
}
