//! Configuration options for packing and unpacking.
//!
//! [`PackOptions`] controls the configurable characters of the wire grammar
//! (element delimiter, assignment separator, escape character) and whether
//! identifiers carry their set prefix.
//!
//! ## Examples
//!
//! ```rust
//! use parampack::PackOptions;
//!
//! // Defaults: `,` delimiter, `=` assignment, `\` escape, prefixed names.
//! let options = PackOptions::default();
//! assert_eq!(options.delimiter, ',');
//!
//! // Semicolon-delimited, bare names.
//! let options = PackOptions::new().with_delimiter(';').without_prefix();
//! assert!(!options.with_prefix);
//! ```

/// Configurable characters and switches of the wire grammar.
///
/// The same options must be used on both sides of a link: the delimiter and
/// escape character decide which characters get escaped inside free-form
/// text, and the prefix switch decides how identifiers resolve.
#[derive(Clone, Debug, PartialEq)]
pub struct PackOptions {
    /// Separator between successive elements of a packed list.
    pub delimiter: char,
    /// Separator between an element's identifier and its value.
    pub assign: char,
    /// Escape character protecting reserved characters in free-form text.
    pub escape: char,
    /// Whether packed identifiers carry their `prefix.` lead-in.
    pub with_prefix: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        PackOptions {
            delimiter: ',',
            assign: '=',
            escape: '\\',
            with_prefix: true,
        }
    }
}

impl PackOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the element delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the identifier/value assignment separator.
    #[must_use]
    pub fn with_assign(mut self, assign: char) -> Self {
        self.assign = assign;
        self
    }

    /// Sets the escape character.
    #[must_use]
    pub fn with_escape(mut self, escape: char) -> Self {
        self.escape = escape;
        self
    }

    /// Suppresses the `prefix.` lead-in on packed identifiers.
    #[must_use]
    pub fn without_prefix(mut self) -> Self {
        self.with_prefix = false;
        self
    }

    /// The characters that must be escaped inside free-form text under
    /// these options: the active delimiter and the brace pair the list
    /// splitter tracks. The escape character itself is always escaped.
    #[must_use]
    pub(crate) fn reserved(&self) -> [char; 3] {
        [self.delimiter, '{', '}']
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = PackOptions::new()
            .with_delimiter(';')
            .with_assign(':')
            .with_escape('^')
            .without_prefix();
        assert_eq!(options.delimiter, ';');
        assert_eq!(options.assign, ':');
        assert_eq!(options.escape, '^');
        assert!(!options.with_prefix);
    }

    #[test]
    fn test_reserved_tracks_delimiter() {
        let options = PackOptions::new().with_delimiter('|');
        assert!(options.reserved().contains(&'|'));
    }
}
