use std::mem;

use crate::commands::error::{CommandError, UnterminatedQuoteSnafu};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// `>`
    Truncate,
    /// `>>`
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Redirect(RedirectMode),
}

/// Splits a command line into words and redirect operators.
///
/// Quotes group characters into one word and are dropped; a quoted `>` is an
/// ordinary character.
pub fn tokenize(line: &str) -> Result<Vec<Token>, CommandError> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => finish_word(&mut tokens, &mut word, &mut in_word),
            '\'' | '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some(closing) if closing == c => break,
                        Some(other) => word.push(other),
                        None => return UnterminatedQuoteSnafu.fail(),
                    }
                }
            }
            '>' => {
                finish_word(&mut tokens, &mut word, &mut in_word);
                let mode = if chars.next_if_eq(&'>').is_some() {
                    RedirectMode::Append
                } else {
                    RedirectMode::Truncate
                };
                tokens.push(Token::Redirect(mode));
            }
            other => {
                in_word = true;
                word.push(other);
            }
        }
    }
    finish_word(&mut tokens, &mut word, &mut in_word);

    Ok(tokens)
}

fn finish_word(tokens: &mut Vec<Token>, word: &mut String, in_word: &mut bool) {
    if mem::take(in_word) {
        tokens.push(Token::Word(mem::take(word)));
    }
}
