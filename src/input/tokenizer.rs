use tracing::{debug, warn};

pub const DEFAULT_MAX_TOKENS: usize = 100;
pub const DEFAULT_MAX_LINE_LEN: usize = 1024;

/// Splits a raw input line into whitespace-delimited tokens.
///
/// No quoting, escaping or operator splitting: `<`, `>` and `&` only mean
/// something when they stand alone as a token.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    max_tokens: usize,
    max_line_len: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKENS, DEFAULT_MAX_LINE_LEN)
    }
}

impl Tokenizer {
    /// `max_tokens` and `max_line_len` count a terminating slot, so a limit
    /// of 100 yields at most 99 tokens and 1024 at most 1023 bytes.
    pub fn new(max_tokens: usize, max_line_len: usize) -> Self {
        Self {
            max_tokens: max_tokens.max(2),
            max_line_len: max_line_len.max(2),
        }
    }

    pub fn token_limit(&self) -> usize {
        self.max_tokens - 1
    }

    pub fn tokenize(&self, line: &str) -> Vec<String> {
        let line = self.truncate(line);
        let mut tokens: Vec<String> = Vec::new();

        for token in line.split_whitespace() {
            if tokens.len() == self.token_limit() {
                debug!(limit = self.token_limit(), "token limit reached, dropping the rest of the line");
                break;
            }
            tokens.push(token.to_string());
        }

        tokens
    }

    fn truncate<'a>(&self, line: &'a str) -> &'a str {
        let usable = self.max_line_len - 1;
        if line.len() <= usable {
            return line;
        }

        let mut end = usable;
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        warn!(len = line.len(), usable, "input line too long, truncating");
        &line[..end]
    }
}
