//! Spanish text analysis for the full-text index.
//!
//! Pipeline: split on non-alphanumeric runs → lowercase → Spanish stop words →
//! light stemming. Input should be NFC-normalized first so that combining
//! accents do not split words. Index and query text go through the same
//! analyzer, registered on the index under [`SPANISH_ANALYZER`].

use tantivy::tokenizer::{
    Language, LowerCaser, SimpleTokenizer, StopWordFilter, TextAnalyzer, Token, TokenFilter,
    TokenStream, Tokenizer,
};

use crate::error::{SearchError, SearchResult};

/// Tokenizer name used in the index schema.
pub const SPANISH_ANALYZER: &str = "spanish_light";

/// Build the Spanish analyzer.
pub fn spanish_analyzer() -> SearchResult<TextAnalyzer> {
    let stop_words = StopWordFilter::new(Language::Spanish).ok_or_else(|| SearchError::Index {
        message: "no Spanish stop word list available".into(),
    })?;
    Ok(TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .filter(stop_words)
        .filter(SpanishLightStemmer)
        .build())
}

/// Token filter applying [`stem`] to every token.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpanishLightStemmer;

impl TokenFilter for SpanishLightStemmer {
    type Tokenizer<T: Tokenizer> = StemmingTokenizer<T>;

    fn transform<T: Tokenizer>(self, tokenizer: T) -> StemmingTokenizer<T> {
        StemmingTokenizer { inner: tokenizer }
    }
}

#[derive(Clone)]
pub struct StemmingTokenizer<T> {
    inner: T,
}

impl<T: Tokenizer> Tokenizer for StemmingTokenizer<T> {
    type TokenStream<'a> = StemmingTokenStream<T::TokenStream<'a>>;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        StemmingTokenStream {
            tail: self.inner.token_stream(text),
        }
    }
}

pub struct StemmingTokenStream<T> {
    tail: T,
}

impl<T: TokenStream> TokenStream for StemmingTokenStream<T> {
    fn advance(&mut self) -> bool {
        if !self.tail.advance() {
            return false;
        }
        let stemmed = stem(&self.tail.token().text);
        self.tail.token_mut().text = stemmed;
        true
    }

    fn token(&self) -> &Token {
        self.tail.token()
    }

    fn token_mut(&mut self) -> &mut Token {
        self.tail.token_mut()
    }
}

/// Spanish light stemmer.
///
/// Words shorter than five characters are left alone. Longer words have their
/// vowel accents folded, then lose a final `o`/`a`/`e`, or a plural ending
/// (`eses` → `es`, `ces` → `z`, `os`/`as`/`es` → stripped).
pub fn stem(word: &str) -> String {
    let mut s: Vec<char> = word.chars().collect();
    let len = s.len();
    if len < 5 {
        return word.to_string();
    }
    for c in s.iter_mut() {
        *c = match *c {
            'à' | 'á' | 'â' | 'ä' => 'a',
            'ò' | 'ó' | 'ô' | 'ö' => 'o',
            'è' | 'é' | 'ê' | 'ë' => 'e',
            'ù' | 'ú' | 'û' | 'ü' => 'u',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            other => other,
        };
    }
    let last = s[len - 1];
    let keep = match last {
        'o' | 'a' | 'e' => len - 1,
        's' if s[len - 2] == 'e' && s[len - 3] == 's' && s[len - 4] == 'e' => len - 2,
        's' if s[len - 2] == 'e' && s[len - 3] == 'c' => {
            s[len - 3] = 'z';
            len - 2
        }
        's' if matches!(s[len - 2], 'o' | 'a' | 'e') => len - 2,
        _ => len,
    };
    s[..keep].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        let mut analyzer = spanish_analyzer().unwrap();
        let mut stream = analyzer.token_stream(text);
        let mut out = Vec::new();
        while stream.advance() {
            out.push(stream.token().text.clone());
        }
        out
    }

    #[test]
    fn stop_words_are_dropped() {
        assert_eq!(tokens("la guerra de los mundos"), vec!["guerr", "mund"]);
    }

    #[test]
    fn stemming_folds_gender_and_number() {
        assert_eq!(stem("guerra"), "guerr");
        assert_eq!(stem("guerras"), "guerr");
        assert_eq!(stem("naciones"), "nacion");
        assert_eq!(stem("lápices"), "lapiz");
        assert_eq!(stem("intereses"), "interes");
        assert_eq!(stem("energía"), "energi");
    }

    #[test]
    fn short_words_keep_accents() {
        assert_eq!(stem("sol"), "sol");
        assert_eq!(stem("país"), "país");
    }

    #[test]
    fn punctuation_and_case_are_ignored() {
        assert_eq!(
            tokens("Energía SOLAR, (fotovoltaica)!"),
            vec!["energi", "solar", "fotovoltaic"]
        );
        assert_eq!(tokens("2014"), vec!["2014"]);
    }

    #[test]
    fn positions_survive_stemming() {
        let mut analyzer = spanish_analyzer().unwrap();
        let mut stream = analyzer.token_stream("guerras civiles");
        let mut positions = Vec::new();
        while stream.advance() {
            positions.push((stream.token().text.clone(), stream.token().position));
        }
        assert_eq!(positions, vec![("guerr".to_string(), 0), ("civil".to_string(), 1)]);
    }
}
