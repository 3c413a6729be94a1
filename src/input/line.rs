use super::Tokenizer;

/// One tokenized input line, with the background suffix already removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
    background: bool,
}

impl CommandLine {
    /// Returns `None` when there is nothing to run.
    pub fn parse(line: &str, tokenizer: &Tokenizer) -> Option<Self> {
        let mut tokens = tokenizer.tokenize(line);
        let background = tokens.last().is_some_and(|t| t == "&");
        if background {
            tokens.pop();
        }

        if tokens.is_empty() {
            return None;
        }

        Some(Self { tokens, background })
    }

    pub fn name(&self) -> &str {
        &self.tokens[0]
    }

    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_background(&self) -> bool {
        self.background
    }
}
