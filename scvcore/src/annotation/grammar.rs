use std::fmt;
use std::fmt::{Display, Formatter};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The three lexical patterns of the PSM/PTM annotation notation.
///
/// # Example
///
/// ```
/// use scvcore::annotation::grammar::TokenPatterns;
///
/// let patterns = TokenPatterns::new();
/// assert!(patterns.is_single("N[115]"));
/// assert!(patterns.is_group("(ST)[80]"));
/// ```
pub struct TokenPatterns {
    /// one residue letter immediately followed by a bracketed mass, e.g. `N[115]`
    pub single: Regex,
    /// a parenthesized residue run followed by a bracketed mass, e.g. `(ST)[80]`
    pub group: Regex,
    /// a brace block with a bracketed label, or any bare line as fallback
    pub block: Regex,
}

impl TokenPatterns {
    pub fn new() -> TokenPatterns {
        TokenPatterns {
            single: Regex::new(r"\w\[\d+(?:\.\d+)?\]").unwrap(),
            group: Regex::new(r"\((\w+)\)\[(\d+(?:\.\d+)?)\]").unwrap(),
            block: Regex::new(r"\{([^}]+)\}\[([^\]]+)\]|([^\r\n]+)").unwrap(),
        }
    }

    /// True if the whole string is a single-residue modification token.
    pub fn is_single(&self, text: &str) -> bool {
        matches_whole(&self.single, text)
    }

    /// True if the whole string is a group modification token.
    pub fn is_group(&self, text: &str) -> bool {
        matches_whole(&self.group, text)
    }

    /// Expand a group token into one concrete token per residue letter, all
    /// sharing the group's bracketed mass.
    ///
    /// Returns `None` when the string is not a whole group token or when its
    /// mass segment does not parse to a finite number, so callers can skip
    /// the entry instead of failing.
    ///
    /// # Example
    ///
    /// ```
    /// use scvcore::annotation::grammar::TokenPatterns;
    ///
    /// let patterns = TokenPatterns::new();
    /// let expanded = patterns.expand_group("(ST)[80]").unwrap();
    /// assert_eq!(expanded, vec!["S[80]".to_string(), "T[80]".to_string()]);
    /// assert!(patterns.expand_group("(ST)[80").is_none());
    /// ```
    pub fn expand_group(&self, token: &str) -> Option<Vec<String>> {
        let caps = self.group.captures(token)?;
        let whole = caps.get(0)?;
        if whole.start() != 0 || whole.end() != token.len() {
            return None;
        }
        let residues = caps.get(1)?.as_str();
        let mass = caps.get(2)?.as_str();
        let value: f64 = mass.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(
            residues
                .chars()
                .map(|residue| format!("{}[{}]", residue, mass))
                .collect(),
        )
    }
}

impl Default for TokenPatterns {
    fn default() -> Self {
        TokenPatterns::new()
    }
}

fn matches_whole(pattern: &Regex, text: &str) -> bool {
    pattern
        .find(text)
        .is_some_and(|m| m.start() == 0 && m.end() == text.len())
}

/// A modification token in canonical string form. Single-residue tokens come
/// out of text extraction; group tokens enter through user selection only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PtmToken {
    Single(String),
    Group(String),
}

impl PtmToken {
    /// Classify a string as a modification token. Group tokens are tried
    /// first since their tail also carries a bracketed mass.
    pub fn parse(patterns: &TokenPatterns, text: &str) -> Option<PtmToken> {
        if patterns.is_group(text) {
            Some(PtmToken::Group(text.to_string()))
        } else if patterns.is_single(text) {
            Some(PtmToken::Single(text.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PtmToken::Single(text) => text,
            PtmToken::Group(text) => text,
        }
    }

    /// Identifier of the token's annotation card, with bracket characters
    /// replaced by underscores.
    pub fn card_id(&self) -> String {
        self.as_str()
            .chars()
            .map(|c| match c {
                '[' | ']' | '(' | ')' => '_',
                _ => c,
            })
            .collect()
    }
}

impl Display for PtmToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_token_matching() {
        let patterns = TokenPatterns::new();
        assert!(patterns.is_single("N[115]"));
        assert!(patterns.is_single("C[143.1]"));
        assert!(patterns.is_single("X[5]"));
        assert!(!patterns.is_single("N[115"));
        assert!(!patterns.is_single("N115]"));
        assert!(!patterns.is_single("AB[100]C"));
        assert!(!patterns.is_single("(ST)[80]"));
    }

    #[test]
    fn test_group_token_matching() {
        let patterns = TokenPatterns::new();
        assert!(patterns.is_group("(ST)[80]"));
        assert!(patterns.is_group("(STY)[79.97]"));
        assert!(!patterns.is_group("(ST)[80"));
        assert!(!patterns.is_group("ST[80]"));
        assert!(!patterns.is_group("x(ST)[80]"));
    }

    #[test]
    fn test_group_expansion() {
        let patterns = TokenPatterns::new();
        assert_eq!(
            patterns.expand_group("(STY)[79.97]").unwrap(),
            vec!["S[79.97]", "T[79.97]", "Y[79.97]"]
        );
        assert!(patterns.expand_group("group1").is_none());
        assert!(patterns.expand_group("(ST)[80]x").is_none());
    }

    #[test]
    fn test_group_expansion_skips_unparseable_mass() {
        let patterns = TokenPatterns::new();
        let huge = format!("(ST)[{}]", "9".repeat(400));
        assert!(patterns.expand_group(&huge).is_none());
    }

    #[test]
    fn test_token_classification() {
        let patterns = TokenPatterns::new();
        assert_eq!(
            PtmToken::parse(&patterns, "N[115]"),
            Some(PtmToken::Single("N[115]".to_string()))
        );
        assert_eq!(
            PtmToken::parse(&patterns, "(ST)[80]"),
            Some(PtmToken::Group("(ST)[80]".to_string()))
        );
        assert_eq!(PtmToken::parse(&patterns, "group1"), None);
    }

    #[test]
    fn test_card_id_sanitizes_brackets() {
        assert_eq!(PtmToken::Single("N[115]".to_string()).card_id(), "N_115_");
        assert_eq!(PtmToken::Group("(ST)[80]".to_string()).card_id(), "_ST__80_");
    }
}
