//! Per-language code signatures.
//!
//! Each signature pairs a language name with one regex over free text. The
//! patterns are deliberately loose and tuned for recall, not precision: a
//! single unanchored substring match anywhere in the text fires the
//! signature.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ProbeError, Result};

/// The built-in recognition table. One `(language, pattern)` entry per
/// supported language, in declaration order. Case-insensitive entries carry
/// an inline `(?i)`.
static BUILTIN_PATTERNS: &[(&str, &str)] = &[
    ("dart", r"(dart.io|File|if \(|\);|.append[^(])"),
    ("wasm", r"(f32.(add|mul|load)|get [0-9]|param( i32)+)"),
    (
        "rust",
        r"(extern crate|fn main\(\)|unsafe ?\{|loop ?\{|println!|\slet [^ +]\s+=|std::)",
    ),
    ("x86_64", r"(?i)(rsi|rax|rbx|rcx|rdx|rdi)[\s,]"),
    (
        "x86",
        r"(?i)(mov|int [0-9A-F]+h|jnz|cmp|jne|pushad|pushfd|ax, ax)",
    ),
    (
        "csharp",
        r"(using [A-Z]|System\.Windows|private const|namespace [A-Z].*\s\{|Application\.Run\(\))",
    ),
    ("c", r"(#include<|\.h>|int main|fprintf|fclose)"),
    (
        "objc",
        r#"(#import |static const|[a-z][^:]+:[a-z][^\s]+|^\{|format:@|@"|\)init |\(void\)[a-z]|@end)"#,
    ),
    ("cpp", r"(using [a-z]|#include <|int main\(\)\s+?\{|std::)"),
    (
        "python",
        r"(__(main|name)__|def [a-z][^(]+\s?\(|import py|from [a-z][^\s]+ import [a-z]|sys.)",
    ),
];

static BUILTIN: Lazy<Vec<LanguageSignature>> = Lazy::new(|| {
    BUILTIN_PATTERNS
        .iter()
        .map(|(name, pattern)| LanguageSignature::new(name, pattern).unwrap())
        .collect()
});

/// One language's recognition rule: a name plus exactly one compiled regex.
/// Immutable once constructed.
#[derive(Debug, Clone)]
pub struct LanguageSignature {
    name: String,
    pattern: Regex,
}

impl LanguageSignature {
    /// Compile a signature from a pattern string. Fails on an invalid
    /// pattern (the only failure mode signatures have).
    pub fn new(name: &str, pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|source| ProbeError::Signature {
            language: name.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            pattern,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// True if the pattern matches anywhere in `text`. Matching is never
    /// anchored and never requires a full-line match.
    pub fn fires_on(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// The closed set of signatures a detector runs with. Built once before any
/// detection call, never mutated afterwards, safe to share across threads.
#[derive(Debug, Clone)]
pub struct SignatureSet {
    signatures: Vec<LanguageSignature>,
}

impl SignatureSet {
    pub fn new(signatures: Vec<LanguageSignature>) -> Self {
        Self { signatures }
    }

    /// The full built-in table.
    pub fn builtin() -> Self {
        Self {
            signatures: BUILTIN.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageSignature> {
        self.signatures.iter()
    }

    pub fn into_signatures(self) -> Vec<LanguageSignature> {
        self.signatures
    }

    pub fn contains(&self, name: &str) -> bool {
        self.signatures.iter().any(|s| s.name == name)
    }

    /// True if any signature fires on `text`. Short-circuits on the first
    /// hit.
    pub fn any_match(&self, text: &str) -> bool {
        self.signatures.iter().any(|s| s.fires_on(text))
    }

    /// Names of all signatures that fire on `text`, in set order.
    pub fn matching_languages(&self, text: &str) -> Vec<&str> {
        self.signatures
            .iter()
            .filter(|s| s.fires_on(text))
            .map(|s| s.name())
            .collect()
    }
}
