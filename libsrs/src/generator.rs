//! Word generation.

use crate::errors::ConfigurationError;
use crate::grammar::{Alphabet, Word};

use rand::Rng;

/// A word of `len` symbols, each drawn uniformly from `alphabet`.
///
/// An empty alphabet only has the empty word.
pub fn random_word<R>(alphabet: &Alphabet, len: usize, rng: &mut R) -> Word
where
    R: Rng + ?Sized,
{
    let symbols = alphabet.symbols();
    if symbols.is_empty() {
        return Word::empty();
    }
    Word::new((0..len).map(|_| symbols[rng.gen_range(0..symbols.len())]))
}

/// A length drawn uniformly from `min..=max`.
pub fn random_length<R>(min: usize, max: usize, rng: &mut R) -> Result<usize, ConfigurationError>
where
    R: Rng + ?Sized,
{
    ConfigurationError::check_range("word length", min, max)?;
    Ok(rng.gen_range(min..=max))
}

/// Every word of exactly `len` symbols over `alphabet`, in lexicographic order of the
/// alphabet's symbol order.
pub fn all_words(alphabet: &Alphabet, len: usize) -> Vec<Word> {
    let mut words = vec![Vec::with_capacity(len)];
    for _ in 0..len {
        words = words
            .into_iter()
            .flat_map(|prefix| {
                alphabet.symbols().iter().map(move |&symbol| {
                    let mut word = prefix.clone();
                    word.push(symbol);
                    word
                })
            })
            .collect();
    }
    words.into_iter().map(Word::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test::rng;

    fn ab() -> Alphabet {
        Alphabet::new("ab".chars()).unwrap()
    }

    #[test]
    fn random_word_uses_alphabet() {
        let alphabet = Alphabet::new("xyz".chars()).unwrap();
        let word = random_word(&alphabet, 50, &mut rng(0));
        assert_eq!(word.len(), 50);
        assert!(alphabet.check_word(&word).is_ok());
    }

    #[test]
    fn random_word_is_reproducible() {
        let a = random_word(&ab(), 30, &mut rng(9));
        let b = random_word(&ab(), 30, &mut rng(9));
        assert_eq!(a, b);
    }

    #[test]
    fn random_length_is_inclusive() {
        let mut rng = rng(2);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let len = random_length(8, 10, &mut rng).unwrap();
            seen[len - 8] = true;
        }
        assert_eq!(seen, [true, true, true]);
        assert_eq!(random_length(4, 4, &mut rng), Ok(4));
    }

    #[test]
    fn random_length_rejects_empty_range() {
        assert_eq!(
            random_length(10, 8, &mut rng(0)),
            Err(ConfigurationError::InvalidBounds {
                what: "word length",
                min: 10,
                max: 8
            })
        );
    }

    #[test]
    fn all_words_in_order() {
        let words: Vec<String> = all_words(&ab(), 2).iter().map(|w| w.to_string()).collect();
        assert_eq!(words, vec!["aa", "ab", "ba", "bb"]);
        assert_eq!(all_words(&ab(), 0), vec![Word::empty()]);
        assert_eq!(all_words(&ab(), 11).len(), 2048);
    }
}
