mod line;
mod tokenizer;

pub use line::CommandLine;
pub use tokenizer::{Tokenizer, DEFAULT_MAX_LINE_LEN, DEFAULT_MAX_TOKENS};
