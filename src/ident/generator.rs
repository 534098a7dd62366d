use crate::ident::Identifier;
use crate::ConfigError;
use std::collections::HashSet;
use std::iter::FusedIterator;

/// Default identifier alphabet: lowercase letters, digits, hyphen, underscore
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz1234567890-_";

/// Default identifier length
pub const DEFAULT_LENGTH: usize = 3;

/// The set of all fixed-length identifiers over an alphabet
///
/// The space is restartable: every call to [`IdentifierSpace::iter`] yields
/// the full sequence again from the start.
#[derive(Debug, Clone)]
pub struct IdentifierSpace {
    alphabet: Vec<char>,
    length: usize,
    size: usize,
}

impl IdentifierSpace {
    /// Creates an identifier space
    ///
    /// # Arguments
    ///
    /// * `alphabet` - Symbols in their fixed ordering; must be non-empty and
    ///   free of repeats
    /// * `length` - Identifier length; must be at least 1
    ///
    /// # Returns
    ///
    /// * `Ok(IdentifierSpace)` - The space is valid and its size fits in `usize`
    /// * `Err(ConfigError)` - The alphabet or length is invalid
    ///
    /// # Example
    ///
    /// ```
    /// use profile_sweep::ident::IdentifierSpace;
    ///
    /// let space = IdentifierSpace::new("ab", 2).unwrap();
    /// let all: Vec<String> = space.iter().map(|id| id.to_string()).collect();
    /// assert_eq!(all, vec!["aa", "ab", "ba", "bb"]);
    /// ```
    pub fn new(alphabet: &str, length: usize) -> Result<Self, ConfigError> {
        let symbols: Vec<char> = alphabet.chars().collect();

        if symbols.is_empty() {
            return Err(ConfigError::Validation(
                "alphabet cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(symbols.len());
        if let Some(repeated) = symbols.iter().find(|c| !seen.insert(**c)) {
            return Err(ConfigError::Validation(format!(
                "alphabet contains '{}' more than once",
                repeated
            )));
        }

        if length == 0 {
            return Err(ConfigError::Validation(
                "identifier length must be >= 1".to_string(),
            ));
        }

        let size = u32::try_from(length)
            .ok()
            .and_then(|exp| symbols.len().checked_pow(exp))
            .ok_or_else(|| {
                ConfigError::Validation(format!(
                    "{} symbols at length {} is too many identifiers",
                    symbols.len(),
                    length
                ))
            })?;

        Ok(Self {
            alphabet: symbols,
            length,
            size,
        })
    }

    /// Returns the number of identifiers in the space (`A^L`)
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the space has no identifiers
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the identifier length
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns the alphabet in its fixed ordering
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Returns a fresh iterator over the whole space
    pub fn iter(&self) -> Identifiers<'_> {
        Identifiers {
            alphabet: &self.alphabet,
            digits: vec![0; self.length],
            remaining: self.size,
        }
    }

    /// Returns the first identifier in generation order
    pub fn first(&self) -> Identifier {
        self.identifier_at(&vec![0; self.length])
    }

    /// Returns the last identifier in generation order
    pub fn last(&self) -> Identifier {
        self.identifier_at(&vec![self.alphabet.len() - 1; self.length])
    }

    fn identifier_at(&self, digits: &[usize]) -> Identifier {
        Identifier::new(digits.iter().map(|&d| self.alphabet[d]).collect::<String>())
    }
}

impl<'a> IntoIterator for &'a IdentifierSpace {
    type Item = Identifier;
    type IntoIter = Identifiers<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over an [`IdentifierSpace`]
///
/// Works like an odometer: the rightmost position advances fastest.
#[derive(Debug, Clone)]
pub struct Identifiers<'a> {
    alphabet: &'a [char],
    digits: Vec<usize>,
    remaining: usize,
}

impl Iterator for Identifiers<'_> {
    type Item = Identifier;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let current: String = self.digits.iter().map(|&d| self.alphabet[d]).collect();
        self.remaining -= 1;

        // Advance the odometer
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < self.alphabet.len() {
                break;
            }
            *digit = 0;
        }

        Some(Identifier::new(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Identifiers<'_> {}

impl FusedIterator for Identifiers<'_> {}
