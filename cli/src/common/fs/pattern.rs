//! # tar-external File Pattern Expansion
//!
//! File: cli/src/common/fs/pattern.rs
//!
//! ## Overview
//!
//! `create` accepts a file pattern such as `"*.txt"` or `"src docs/*.md"`.
//! Since commands are never run through a shell, this module does the part of
//! the shell's job that matters here: split the pattern into words and expand
//! the words that contain glob metacharacters.
//!
//! ## Rules
//!
//! - Words are split with `process::split_marked`, so quoting works as in a shell.
//! - A word containing an unquoted `*`, `?` or `[` is expanded with the `glob`
//!   crate, relative to the working directory. Quoted or backslash-escaped
//!   metacharacters match themselves. Matches come back sorted, and a
//!   leading `.` must be matched literally.
//! - A word that matches nothing, or is not a valid glob, is passed through
//!   unchanged. The archiver then reports the missing file itself.
//! - Other words are passed through unchanged.
//!
use crate::common::process::split_marked;
use glob::MatchOptions;
use std::path::Path;
use tracing::debug;

const GLOB_CHARS: [char; 3] = ['*', '?', '['];

/// Expands `pattern` into the list of file arguments for the archiver.
///
/// Returns `None` if the pattern has an unterminated quote.
pub fn expand_pattern(pattern: &str, base: Option<&Path>) -> Option<Vec<String>> {
    let words = split_marked(pattern)?;
    let mut files = Vec::with_capacity(words.len());
    for word in words {
        let literal: String = word.iter().map(|&(c, _)| c).collect();
        let has_glob = word
            .iter()
            .any(|&(c, quoted)| !quoted && GLOB_CHARS.contains(&c));
        if has_glob {
            files.extend(expand_word(&glob_source(&word), &literal, base));
        } else {
            files.push(literal);
        }
    }
    debug!("Expanded pattern {:?} to {:?}", pattern, files);
    Some(files)
}

/// Glob source for a split word, with quoted characters escaped.
fn glob_source(word: &[(char, bool)]) -> String {
    let mut source = String::with_capacity(word.len());
    for &(c, quoted) in word {
        if quoted {
            source.push_str(&glob::Pattern::escape(c.encode_utf8(&mut [0; 4])));
        } else {
            source.push(c);
        }
    }
    source
}

fn expand_word(word: &str, literal: &str, base: Option<&Path>) -> Vec<String> {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    // Absolute words ignore the base, as `Path::join` would.
    let base = base.filter(|_| !Path::new(word).is_absolute());
    let full_pattern = match base {
        Some(dir) => format!(
            "{}/{}",
            glob::Pattern::escape(&dir.to_string_lossy()),
            word
        ),
        None => word.to_string(),
    };

    let paths = match glob::glob_with(&full_pattern, options) {
        Ok(paths) => paths,
        Err(e) => {
            debug!("Not a valid glob, passing {:?} through: {}", literal, e);
            return vec![literal.to_string()];
        }
    };

    let matches: Vec<String> = paths
        .filter_map(|entry| entry.ok())
        .map(|path| match base {
            Some(dir) => path
                .strip_prefix(dir)
                .map(|rel| rel.to_string_lossy().into_owned())
                .unwrap_or_else(|_| path.to_string_lossy().into_owned()),
            None => path.to_string_lossy().into_owned(),
        })
        .collect();

    if matches.is_empty() {
        vec![literal.to_string()]
    } else {
        matches
    }
}
