use crate::Generator;
use md5::{Digest, Md5};
use shortlink_core::{GenerationError, LinkCache, ShortCode, ShortUrl};
use url::Url;

/// Method name selecting the hashed generator.
pub const INTERNAL_METHOD: &str = "internal";

/// The 63 symbols a code is built from. [`SYMBOL_MASK`] only lets even
/// indices through, so 32 of them are used, from `a` (0) up to and
/// including `_` (62).
const ALPHABET: &[u8; 63] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";

/// Kept at `0x3E`: codes already issued depend on it.
const SYMBOL_MASK: u32 = 0x3E;
const SYMBOL_SHIFT: u32 = 5;

/// Length of every generated code.
pub const CODE_LENGTH: usize = 6;
/// Number of candidate codes derived from one digest.
pub const CANDIDATE_COUNT: usize = 4;

/// Derives the candidate codes for `key`, in preference order.
///
/// The MD5 digest of the key is split into four big-endian 32-bit words.
/// Each word yields one code: six times, the masked low bits pick a symbol
/// and the word is shifted right by five.
pub fn candidate_codes(key: &str) -> [ShortCode; CANDIDATE_COUNT] {
    let digest = Md5::digest(key.as_bytes());
    std::array::from_fn(|i| {
        let word = u32::from_be_bytes([
            digest[4 * i],
            digest[4 * i + 1],
            digest[4 * i + 2],
            digest[4 * i + 3],
        ]);
        encode_word(word)
    })
}

fn encode_word(mut word: u32) -> ShortCode {
    let code: String = (0..CODE_LENGTH)
        .map(|_| {
            let symbol = ALPHABET[(word & SYMBOL_MASK) as usize] as char;
            word >>= SYMBOL_SHIFT;
            symbol
        })
        .collect();
    ShortCode::new_unchecked(code)
}

/// Generates short URLs from a digest of the page key.
///
/// The same key always yields the same candidates; the cache only decides
/// which of them is still free.
#[derive(Debug, Clone)]
pub struct HashedGenerator {
    base_url: Url,
}

impl HashedGenerator {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Returns the candidate URLs for `key`, in preference order.
    pub fn candidates(&self, key: &str) -> Result<Vec<ShortUrl>, GenerationError> {
        candidate_codes(key)
            .iter()
            .map(|code| code.to_url(&self.base_url))
            .collect()
    }
}

impl Generator for HashedGenerator {
    fn name(&self) -> &str {
        INTERNAL_METHOD
    }

    fn generate(&self, key: &str, cache: &LinkCache) -> Result<ShortUrl, GenerationError> {
        self.candidates(key)?
            .into_iter()
            .find(|url| !cache.contains_value(url))
            .ok_or_else(|| GenerationError::NoCandidate {
                key: key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    const BASE: &str = "https://s.example/";

    fn generator() -> HashedGenerator {
        HashedGenerator::new(Url::parse(BASE).unwrap())
    }

    fn cache_with(urls: &[&ShortUrl]) -> LinkCache {
        let entries: BTreeMap<_, _> = urls
            .iter()
            .enumerate()
            .map(|(i, url)| (format!("/other/{i}"), (*url).clone()))
            .collect();
        LinkCache::from_entries(entries)
    }

    #[test]
    fn candidate_codes_match_reference_digest() {
        // md5("/posts/hello") = 4e121ed5 449d1a91 d097f46c f1cef028
        let codes = candidate_codes("/posts/hello");
        let codes: Vec<_> = codes.iter().map(ShortCode::as_str).collect();
        assert_eq!(codes, vec!["u2gKGM", "qug6iI", "SI8UiO", "Oa8CC4"]);
    }

    #[test]
    fn candidate_codes_for_other_keys() {
        let about: Vec<_> = candidate_codes("/about/")
            .iter()
            .map(|c| c.as_str().to_string())
            .collect();
        assert_eq!(about, vec!["UWSw04", "SMgA04", "O04AKu", "sAQEoC"]);

        let root: Vec<_> = candidate_codes("/")
            .iter()
            .map(|c| c.as_str().to_string())
            .collect();
        assert_eq!(root, vec!["2QYmMY", "gYusw8", "CC42Mo", "y_Wyq6"]);
    }

    #[test]
    fn codes_only_use_even_alphabet_positions() {
        let reachable: Vec<char> = ALPHABET
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 2 == 0)
            .map(|(_, b)| *b as char)
            .collect();
        assert_eq!(ALPHABET.len(), 63);
        assert_eq!(reachable.len(), 32);
        assert_eq!(reachable.last(), Some(&'_'));

        for key in ["/posts/hello", "/about/", "/", "/posts/2024/rust", ""] {
            for code in candidate_codes(key) {
                assert_eq!(code.as_str().len(), CODE_LENGTH);
                assert!(
                    code.as_str().chars().all(|c| reachable.contains(&c)),
                    "{code} uses an odd alphabet position"
                );
            }
        }
    }

    #[test]
    fn encode_word_walks_five_bits_at_a_time() {
        // 0x3E picks index 62 ('_') and the remaining bits are all ones.
        assert_eq!(encode_word(u32::MAX).as_str(), "______");
        assert_eq!(encode_word(0).as_str(), "aaaaaa");
        // low bits 0b00010 -> index 2 ('c'), then zeros
        assert_eq!(encode_word(2).as_str(), "caaaaa");
    }

    #[test]
    fn candidates_are_deterministic() {
        let generator = generator();
        let first = generator.candidates("/posts/hello").unwrap();
        let second = generator.candidates("/posts/hello").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), CANDIDATE_COUNT);
        assert_eq!(first[0].as_str(), "https://s.example/u2gKGM");
    }

    #[test]
    fn generate_returns_first_candidate_on_empty_cache() {
        let url = generator()
            .generate("/posts/hello", &LinkCache::new())
            .unwrap();
        assert_eq!(url.as_str(), "https://s.example/u2gKGM");
    }

    #[test]
    fn generate_skips_taken_candidates() {
        let generator = generator();
        let candidates = generator.candidates("/posts/hello").unwrap();

        let cache = cache_with(&[&candidates[0]]);
        assert_eq!(
            generator.generate("/posts/hello", &cache).unwrap(),
            candidates[1]
        );

        let cache = cache_with(&[&candidates[0], &candidates[1], &candidates[2]]);
        assert_eq!(
            generator.generate("/posts/hello", &cache).unwrap(),
            candidates[3]
        );
    }

    #[test]
    fn generate_fails_when_all_candidates_taken() {
        let generator = generator();
        let candidates = generator.candidates("/posts/hello").unwrap();
        let cache = cache_with(&candidates.iter().collect::<Vec<_>>());

        let err = generator.generate("/posts/hello", &cache).unwrap_err();

        assert!(matches!(err, GenerationError::NoCandidate { key } if key == "/posts/hello"));
    }

    #[test]
    fn collisions_are_checked_against_values_not_keys() {
        let generator = generator();
        let mut entries = BTreeMap::new();
        entries.insert(
            "https://s.example/u2gKGM".to_string(),
            ShortUrl::new_unchecked("https://s.example/elsewhere"),
        );
        let cache = LinkCache::from_entries(entries);

        assert_eq!(
            generator.generate("/posts/hello", &cache).unwrap().as_str(),
            "https://s.example/u2gKGM"
        );
    }

    #[test]
    fn base_without_trailing_slash_replaces_last_segment() {
        let generator = HashedGenerator::new(Url::parse("https://s.example/go").unwrap());
        let url = generator.generate("/posts/hello", &LinkCache::new()).unwrap();
        assert_eq!(url.as_str(), "https://s.example/u2gKGM");
    }
}
