//! Stylesheet indexing: `#id { … }` rules folded into per-element
//! declaration bags.
//!
//! Only plain ID selectors are honored. Class, type, attribute, pseudo and
//! compound selectors are skipped, as are at-rules and their blocks.

mod flow;
mod values;

pub use flow::{is_removed_from_flow, resolve_layout, LayoutKind};
pub use values::{extract_translate, normalize_number, Normalizer, Translate};

use std::collections::{BTreeMap, HashMap};

/// Raw declarations for one element: property name → declared value.
pub type Declarations = BTreeMap<String, String>;

/// Element identifier → declarations targeting it. Built once per compilation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    rules: HashMap<String, Declarations>,
}

impl StyleMap {
    /// Declarations for `id`, if any rule targeted it.
    pub fn get(&self, id: &str) -> Option<&Declarations> {
        self.rules.get(id)
    }

    /// Declarations for an optional id, empty when absent or unmatched.
    pub fn lookup(&self, id: Option<&str>) -> Declarations {
        id.and_then(|id| self.get(id)).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Parse a stylesheet into a [`StyleMap`].
///
/// Later rules and later declarations overwrite earlier ones for the same
/// id and property; there is no specificity ordering.
pub fn parse_stylesheet(css: &str) -> StyleMap {
    let mut map = StyleMap::default();
    let css = strip_comments(css);

    // Simple state machine: find selector { declarations }
    let mut chars = css.chars().peekable();
    let mut current = String::new();

    while let Some(&ch) = chars.peek() {
        match ch {
            '{' => {
                chars.next();
                let selector_str = current.trim().to_string();
                current.clear();

                // Read until closing brace
                let mut depth = 1;
                let mut body = String::new();
                while let Some(&c) = chars.peek() {
                    chars.next();
                    if c == '{' {
                        depth += 1;
                    } else if c == '}' {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    body.push(c);
                }

                if selector_str.is_empty() || selector_str.starts_with('@') {
                    continue;
                }

                let declarations = parse_declarations(&body);
                for sel in selector_str.split(',') {
                    let Some(id) = id_selector(sel) else {
                        log::trace!("ignoring non-id selector {:?}", sel.trim());
                        continue;
                    };
                    let bag = map.rules.entry(id.to_string()).or_default();
                    for (property, value) in &declarations {
                        bag.insert(property.clone(), value.clone());
                    }
                }
            }
            ';' | '}' => {
                // Statement at-rules (`@import …;`) and stray braces
                chars.next();
                current.clear();
            }
            _ => {
                current.push(ch);
                chars.next();
            }
        }
    }

    map
}

/// Split a declaration block into `(property, value)` pairs in source order.
/// Property names are lowercased; a trailing `!important` is dropped.
pub fn parse_declarations(block: &str) -> Vec<(String, String)> {
    split_declarations(block)
        .into_iter()
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim().trim_end_matches("!important").trim();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            Some((name, value.to_string()))
        })
        .collect()
}

/// Split on `;` outside parentheses and quoted strings, so values like
/// `url("data:image/png;base64,…")` survive intact.
fn split_declarations(block: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in block.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(&block[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&block[start..]);
    parts
}

/// `#ident` → `ident`; anything else → `None`.
fn id_selector(sel: &str) -> Option<&str> {
    let id = sel.trim().strip_prefix('#')?;
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii());
    valid.then_some(id)
}

fn strip_comments(css: &str) -> String {
    let mut result = String::with_capacity(css.len());
    let mut chars = css.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c == '/' {
            chars.next();
            if chars.peek() == Some(&'*') {
                chars.next();
                // Skip until */
                loop {
                    match chars.next() {
                        Some('*') if chars.peek() == Some(&'/') => {
                            chars.next();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
            } else {
                result.push('/');
            }
        } else {
            result.push(c);
            chars.next();
        }
    }
    result
}
