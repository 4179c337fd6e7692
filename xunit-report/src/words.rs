// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Splitting of compound identifiers (`CamelCase`, `snake2Digits`, ...) into words.

use std::str;

/// Splits `v` into the words it's made of.
///
/// Words are maximal runs of digits, maximal runs of whitespace, acronyms (runs of uppercase
/// letters) or a single optional uppercase letter followed by lowercase letters. An acronym that
/// is immediately followed by a capitalized word gives up its last letter to that word, so
/// `EasyXMLParser` splits into `Easy`, `XML` and `Parser`.
///
/// Characters outside these classes are kept attached to the word that follows them (or to the
/// last word if nothing follows), so concatenating the output always yields `v` again.
///
/// An empty string returns a single empty word.
pub fn split_words(v: &str) -> Vec<&str> {
    if v.is_empty() {
        return vec![v];
    }

    let chars: Vec<(usize, char)> = v.char_indices().collect();
    let mut ends = Vec::with_capacity(chars.len() / 2 + 1);

    let mut pos = 0;
    while pos < chars.len() {
        let c = chars[pos].1;
        let last = if c.is_numeric() {
            run_end(&chars, pos, char::is_numeric)
        } else if c.is_uppercase() || c.is_lowercase() {
            word_end(&chars, pos)
        } else if c.is_whitespace() {
            run_end(&chars, pos, char::is_whitespace)
        } else {
            pos += 1;
            continue;
        };

        ends.push(byte_end(v, &chars, last));
        pos = last + 1;
    }

    // Trailing characters that don't start a word belong to the last one.
    match ends.last_mut() {
        Some(end) => *end = v.len(),
        None => ends.push(v.len()),
    }

    let mut start = 0;
    ends.into_iter()
        .map(|end| {
            let word = &v[start..end];
            start = end;
            word
        })
        .collect()
}

/// Splits `v` into words, treating it as UTF-8.
///
/// If `v` isn't valid UTF-8, a single word containing all of `v` is returned.
pub fn split_bytes(v: &[u8]) -> Vec<&[u8]> {
    match str::from_utf8(v) {
        Ok(s) => split_words(s).into_iter().map(str::as_bytes).collect(),
        Err(_) => vec![v],
    }
}

// Returns the index of the last character of the run matching `pred` that starts at `idx`.
fn run_end(chars: &[(usize, char)], idx: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut last = idx;
    while chars.get(last + 1).is_some_and(|&(_, c)| pred(c)) {
        last += 1;
    }
    last
}

// Returns the index of the last character of the word starting at `idx`.
fn word_end(chars: &[(usize, char)], idx: usize) -> usize {
    let is_upper_at = |i: usize| chars.get(i).is_some_and(|&(_, c)| c.is_uppercase());

    if is_upper_at(idx + 1) {
        // A lowercase letter directly before an uppercase one is a word of its own.
        if !chars[idx].1.is_uppercase() {
            return idx;
        }

        let last = run_end(chars, idx, char::is_uppercase);
        return match chars.get(last + 1) {
            // The last uppercase letter starts the next word: `PDFLoader`.
            Some(&(_, c)) if c.is_lowercase() => last - 1,
            _ => last,
        };
    }

    let mut last = idx;
    while chars.get(last + 1).is_some_and(|&(_, c)| c.is_lowercase()) {
        last += 1;
    }
    last
}

fn byte_end(v: &str, chars: &[(usize, char)], last: usize) -> usize {
    chars.get(last + 1).map_or(v.len(), |&(offset, _)| offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case("", &[""] ; "empty")]
    #[test_case("lowercase", &["lowercase"] ; "lowercase")]
    #[test_case("Uppercase", &["Uppercase"] ; "uppercase")]
    #[test_case("MultipleWords", &["Multiple", "Words"] ; "multiple words")]
    #[test_case("MyID", &["My", "ID"] ; "trailing acronym")]
    #[test_case("HTML", &["HTML"] ; "acronym only")]
    #[test_case("PDFLoader", &["PDF", "Loader"] ; "leading acronym")]
    #[test_case("ASample", &["A", "Sample"] ; "single letter word")]
    #[test_case("EasyXMLParser", &["Easy", "XML", "Parser"] ; "inner acronym")]
    #[test_case("vimRPCPlugin", &["vim", "RPC", "Plugin"] ; "lowercase start")]
    #[test_case("GL11Version", &["GL", "11", "Version"] ; "acronym before digits")]
    #[test_case("10", &["10"] ; "digits only")]
    #[test_case("10Validators", &["10", "Validators"] ; "leading digits")]
    #[test_case("May5", &["May", "5"] ; "trailing digit")]
    #[test_case("BFG9000", &["BFG", "9000"] ; "acronym then number")]
    #[test_case("Html2Version", &["Html", "2", "Version"] ; "digit between words")]
    #[test_case("5May2000", &["5", "May", "2000"] ; "date like")]
    #[test_case("Two  spaces", &["Two", "  ", "spaces"] ; "multiple spaces")]
    #[test_case("xRay", &["x", "Ray"] ; "single lowercase letter")]
    #[test_case("aBC", &["a", "BC"] ; "lowercase before acronym")]
    #[test_case("AB c", &["AB", " ", "c"] ; "acronym before space")]
    #[test_case("Scenario2", &["Scenario", "2"] ; "numbered scenario")]
    #[test_case("A_b", &["A", "_b"] ; "separator joins next word")]
    #[test_case("Done!", &["Done!"] ; "trailing punctuation joins last word")]
    #[test_case("&&", &["&&"] ; "punctuation only")]
    #[test_case("ÉcoleÜber", &["École", "Über"] ; "non ascii letters")]
    fn split(input: &str, expected: &[&str]) {
        assert_eq!(split_words(input), expected);
    }

    #[test]
    fn split_invalid_utf8() {
        let input = b"BadUTF8\xe2\xe2\xa1";
        assert_eq!(split_bytes(input), vec![&input[..]]);
    }

    #[test]
    fn split_valid_bytes() {
        assert_eq!(
            split_bytes(b"GL11Version"),
            vec![&b"GL"[..], &b"11"[..], &b"Version"[..]]
        );
    }

    proptest! {
        #[test]
        fn split_is_lossless(input in "\\PC*") {
            let words = split_words(&input);
            prop_assert_eq!(words.concat(), input);
        }

        #[test]
        fn split_words_are_non_empty(input in "\\PC+") {
            let words = split_words(&input);
            prop_assert!(words.iter().all(|word| !word.is_empty()), "words: {:?}", words);
        }

        #[test]
        fn identifiers_split_on_case_and_digits(input in "[A-Za-z0-9]{1,24}") {
            let words = split_words(&input);
            prop_assert_eq!(words.concat(), input.clone());
            for word in &words {
                let all_digits = word.chars().all(|c| c.is_ascii_digit());
                let has_digit = word.chars().any(|c| c.is_ascii_digit());
                prop_assert!(all_digits || !has_digit, "word {:?} mixes digits and letters", word);
            }
        }
    }
}
