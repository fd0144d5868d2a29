//! Case folding policies shared by extraction and stopword matching.

use std::borrow::Cow;

/// Controls how words are case-normalized before they are compared or stored.
///
/// Extraction and stopword matching each carry their own policy, so a stopword
/// file can be matched case-insensitively while extracted terms keep their case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseFold {
    /// Lowercase words written in Title Case.
    pub fold_titlecase: bool,
    /// Lowercase every word.
    pub ignore_case: bool,
}

impl Default for CaseFold {
    fn default() -> Self {
        Self {
            fold_titlecase: true,
            ignore_case: false,
        }
    }
}

impl CaseFold {
    /// Policy that keeps every word exactly as written.
    pub const PRESERVE: Self = Self {
        fold_titlecase: false,
        ignore_case: false,
    };

    /// Policy that lowercases everything.
    pub const IGNORE: Self = Self {
        fold_titlecase: true,
        ignore_case: true,
    };

    /// Returns true if `text` would be lowercased under this policy.
    pub fn folds(&self, text: &str) -> bool {
        self.ignore_case || (self.fold_titlecase && is_titlecase(text))
    }

    /// Applies the policy to `text`, borrowing when nothing changes.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.folds(text) {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        }
    }
}

/// Returns true if `text` is in title case.
///
/// Uppercase characters may only follow uncased characters and lowercase
/// characters may only follow cased ones. At least one cased character is
/// required, so `"Open File"` and `"O'Neil"` qualify while `"OpenFile"`,
/// `"OK"` and `"42"` do not.
pub fn is_titlecase(text: &str) -> bool {
    let mut previous_cased = false;
    let mut any_cased = false;

    for c in text.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            any_cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            any_cased = true;
        } else {
            previous_cased = false;
        }
    }

    any_cased
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn titlecase_words() {
        assert!(is_titlecase("Open"));
        assert!(is_titlecase("Open File"));
        assert!(is_titlecase("O'Neil"));
        assert!(is_titlecase("Émile"));
    }

    #[test]
    fn non_titlecase_words() {
        assert!(!is_titlecase("open"));
        assert!(!is_titlecase("OpenFile"));
        assert!(!is_titlecase("OK"));
        assert!(!is_titlecase("42"));
        assert!(!is_titlecase(""));
        assert!(!is_titlecase("Open file"));
    }

    #[test]
    fn default_folds_titlecase_only() {
        let fold = CaseFold::default();
        assert_eq!(fold.apply("Open"), "open");
        assert_eq!(fold.apply("OK"), "OK");
        assert_eq!(fold.apply("iPhone"), "iPhone");
    }

    #[test]
    fn ignore_case_lowercases_everything() {
        assert_eq!(CaseFold::IGNORE.apply("OK"), "ok");
        assert_eq!(CaseFold::IGNORE.apply("iPhone"), "iphone");
    }

    #[test]
    fn preserve_keeps_case() {
        assert_eq!(CaseFold::PRESERVE.apply("Open"), "Open");
        assert!(matches!(CaseFold::PRESERVE.apply("Open"), Cow::Borrowed(_)));
    }
}
