//! Process-wide grammar registry.
//!
//! Language tokens are resolved against syntect's default syntax set exactly
//! once and the resolution is cached. Registration is idempotent: resolving
//! the same token from any number of threads, in any order, yields the same
//! grammar and never duplicates work beyond the first lookup.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;
use syntect::parsing::{SyntaxReference, SyntaxSet};

static SYNTAXES: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// Cache of lower-cased language token to resolved grammar name.
///
/// `None` marks a token with no known grammar, so unknown languages are also
/// looked up only once.
static RESOLVED: Lazy<RwLock<HashMap<String, Option<String>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// The loaded syntax set backing all grammars.
pub fn syntax_set() -> &'static SyntaxSet {
    &SYNTAXES
}

/// Whether a grammar resolution has already been cached for `token`.
pub fn is_registered(token: &str) -> bool {
    let key = token.to_ascii_lowercase();
    RESOLVED
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(&key)
}

/// Resolve `token` to a grammar, registering it on first use.
///
/// Matching tries the token itself, then grammar name, then file extension
/// (so `rs`, `rust` and `Rust` all resolve to the same grammar). Tokens with
/// no matching grammar resolve to the plain-text grammar.
pub fn ensure_registered(token: &str) -> &'static SyntaxReference {
    let key = token.to_ascii_lowercase();

    let cached = RESOLVED
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
        .cloned();
    if let Some(entry) = cached {
        return grammar_by_name(entry.as_deref());
    }

    let mut map = RESOLVED.write().unwrap_or_else(PoisonError::into_inner);
    let entry = map
        .entry(key.clone())
        .or_insert_with(|| {
            let found = find_grammar(&key).map(|syntax| syntax.name.clone());
            if found.is_none() {
                tracing::warn!(language = %key, "no grammar for language, using plain text");
            }
            found
        })
        .clone();
    drop(map);

    grammar_by_name(entry.as_deref())
}

fn grammar_by_name(name: Option<&str>) -> &'static SyntaxReference {
    name.and_then(|name| SYNTAXES.find_syntax_by_name(name))
        .unwrap_or_else(|| SYNTAXES.find_syntax_plain_text())
}

fn find_grammar(token: &str) -> Option<&'static SyntaxReference> {
    SYNTAXES
        .find_syntax_by_token(token)
        .or_else(|| SYNTAXES.find_syntax_by_name(token))
        .or_else(|| SYNTAXES.find_syntax_by_extension(token))
}
