use tracing::debug;

use super::lexicon::{tokenize, Lexicon, LEXICON};


/// Canonical form for free-text interest items.
///
/// Holds a handle to the shared [`Lexicon`]; constructing the first
/// normalizer initializes it, later ones reuse it.
#[derive(Clone, Copy)]
pub struct TextNormalizer {
    lexicon: &'static Lexicon,
}

impl TextNormalizer {
    pub fn new() -> Self {
        lazy_static::initialize(&LEXICON);
        debug!("TextNormalizer ready");
        Self { lexicon: &LEXICON }
    }

    /// Lowercase, tokenize, lemmatize each token and rejoin with single spaces.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        tokenize(&lowered)
            .into_iter()
            .map(|token| self.lexicon.lemmatize(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
