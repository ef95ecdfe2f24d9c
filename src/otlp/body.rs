//! Log body sources

use fake::Fake;
use fake::faker::lorem::en::Sentence;
use std::ops::Range;

/// Supplies one freeform body string per log record
pub trait BodySource {
    /// Next body string
    fn next_body(&mut self) -> String;
}

/// Random lorem-ipsum sentences
#[derive(Debug, Clone)]
pub struct LoremSentences {
    words: Range<usize>,
}

impl LoremSentences {
    /// Sentences with a word count drawn from `words`
    pub fn new(words: Range<usize>) -> Self {
        Self { words }
    }
}

impl Default for LoremSentences {
    fn default() -> Self {
        Self::new(4..10)
    }
}

impl BodySource for LoremSentences {
    fn next_body(&mut self) -> String {
        Sentence(self.words.clone()).fake()
    }
}

impl<F> BodySource for F
where
    F: FnMut() -> String,
{
    fn next_body(&mut self) -> String {
        self()
    }
}
