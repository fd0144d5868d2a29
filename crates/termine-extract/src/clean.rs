//! Removal of non-linguistic decoration from translatable strings.

use std::sync::LazyLock;

use regex::Regex;

/// printf and Python format placeholders: `%s`, `%5.2f`, `%(name)d`, `%1$s`, `%lld`.
static FORMAT_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%(?:\([^)]+\)|[0-9]+\$)?[-+#0]*[0-9.*]*(?:[hlLzjt][hl])?[EFGXc-ginoprsux]")
        .expect("format placeholder pattern is valid")
});

/// XML/HTML elements, comments and processing instructions.
static MARKUP_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?:![\[-]|[/?]?[A-Za-z_:])[^>]*>").expect("markup element pattern is valid")
});

/// XML/HTML entities: `&#32;`, `&#x20;`, `&amp;`, `&my_entity;`.
static MARKUP_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)&(?:#(?:[0-9]+|x[0-9a-f]+)|[a-z_:][\w./:]*);")
        .expect("markup entity pattern is valid")
});

/// Strips accelerators, placeholders and markup from source strings.
#[derive(Debug, Clone, Default)]
pub struct TextCleaner {
    /// Characters removed wherever they occur.
    accelerators: Vec<char>,
}

impl TextCleaner {
    /// Creates a cleaner that removes every character of `accelerators`.
    pub fn new(accelerators: &str) -> Self {
        Self {
            accelerators: accelerators.chars().collect(),
        }
    }

    /// Returns the text that should be matched for terms.
    ///
    /// Accelerators are removed first, so `&amp;` survives as an entity only
    /// when `&` is not an accelerator.
    pub fn clean(&self, text: &str) -> String {
        let stripped: String = text
            .chars()
            .filter(|c| !self.accelerators.contains(c))
            .collect();
        let text = FORMAT_PLACEHOLDER.replace_all(&stripped, " ");
        let text = MARKUP_ELEMENT.replace_all(&text, " ");
        let text = MARKUP_ENTITY.replace_all(&text, " ");
        text.trim().to_string()
    }
}
