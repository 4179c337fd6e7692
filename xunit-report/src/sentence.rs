// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turning a list of words into a readable sentence.

/// Joins `words` with spaces into a sentence.
///
/// The first word is kept as is. Every following word is lowercased unless it's listed in
/// `no_transform`, in which case it's kept as is too.
pub fn to_sentence<S: AsRef<str>>(words: &[S], no_transform: &[&str]) -> String {
    let mut sentence = String::with_capacity(words.iter().map(|w| w.as_ref().len() + 1).sum());

    for (idx, word) in words.iter().enumerate() {
        let word = word.as_ref();
        if idx == 0 {
            sentence.push_str(word);
            continue;
        }

        sentence.push(' ');
        if no_transform.contains(&word) {
            sentence.push_str(word);
        } else {
            sentence.push_str(&word.to_lowercase());
        }
    }

    sentence
}
