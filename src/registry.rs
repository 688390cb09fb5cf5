//! The set of examples compiled into the crate.
//!
//! `build.rs` walks `shaders/` and emits one [`ManifestEntry`] per directory
//! holding a `frag.glsl`. [`Registry`] orders those entries for display with a
//! numeric-aware comparison so `2-x` sorts before `10-x`.

use std::cmp::Ordering;

use crate::error::PlaygroundError;

/// One example as listed in a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: &'static str,
    pub fragment: &'static str,
    pub vertex: Option<&'static str>,
}

mod generated {
    use super::ManifestEntry;

    include!(concat!(env!("OUT_DIR"), "/examples.rs"));
}

#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<ManifestEntry>,
    shared_vertex: &'static str,
}

impl Registry {
    /// Registry over the shaders bundled at build time.
    pub fn embedded() -> Self {
        Self::from_manifest(generated::EXAMPLES, generated::SHARED_VERTEX)
    }

    pub fn from_manifest(entries: &[ManifestEntry], shared_vertex: &'static str) -> Self {
        let mut sorted: Vec<ManifestEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if sorted.iter().any(|kept| kept.name == entry.name) {
                log::warn!("duplicate example {:?} ignored", entry.name);
                continue;
            }
            sorted.push(*entry);
        }
        // stable, so equal keys keep manifest order
        sorted.sort_by(|a, b| numeric_aware_cmp(a.name, b.name));
        Self {
            entries: sorted,
            shared_vertex,
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.name).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&'static str> {
        self.entries.first().map(|entry| entry.name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// The vertex shader used by examples that don't ship their own.
    pub fn shared_vertex(&self) -> &'static str {
        self.shared_vertex
    }

    /// Looks `name` up, failing with the list of known examples.
    pub fn resolve(&self, name: &str) -> Result<&ManifestEntry, PlaygroundError> {
        self.get(name).ok_or_else(|| PlaygroundError::UnknownExample {
            name: name.to_string(),
            available: self.names().into_iter().map(str::to_string).collect(),
        })
    }
}

/// Orders strings the way a person reads numbered names.
///
/// Names become a sequence of keys: punctuation, digit runs and letters, in
/// that rank. Digit runs compare by value and letters case-insensitively.
/// Remaining ties go to the longer zero-padded run, then to lowercase, then
/// to a byte comparison so the order stays total.
pub fn numeric_aware_cmp(a: &str, b: &str) -> Ordering {
    let left = collation_keys(a);
    let right = collation_keys(b);

    let primary = left
        .iter()
        .zip(&right)
        .map(|(l, r)| l.primary_cmp(r))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or_else(|| left.len().cmp(&right.len()));
    if primary != Ordering::Equal {
        return primary;
    }

    // primary keys match one for one from here on
    let padding = left.iter().zip(&right).map(|(l, r)| match (l, r) {
        (Key::Digits { raw_len: l, .. }, Key::Digits { raw_len: r, .. }) => r.cmp(l),
        _ => Ordering::Equal,
    });
    let case = left.iter().zip(&right).map(|(l, r)| match (l, r) {
        (Key::Letter { upper: l, .. }, Key::Letter { upper: r, .. }) => l.cmp(r),
        _ => Ordering::Equal,
    });
    padding
        .chain(case)
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or_else(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy)]
enum Key<'a> {
    Punct(char),
    Digits { value: &'a str, raw_len: usize },
    Letter { lower: char, upper: bool },
}

impl Key<'_> {
    fn rank(&self) -> u8 {
        match self {
            Key::Punct(_) => 0,
            Key::Digits { .. } => 1,
            Key::Letter { .. } => 2,
        }
    }

    fn primary_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::Punct(l), Key::Punct(r)) => l.cmp(r),
            (Key::Digits { value: l, .. }, Key::Digits { value: r, .. }) => {
                l.len().cmp(&r.len()).then_with(|| l.cmp(r))
            }
            (Key::Letter { lower: l, .. }, Key::Letter { lower: r, .. }) => l.cmp(r),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn collation_keys(s: &str) -> Vec<Key<'_>> {
    let mut keys = Vec::new();
    let mut rest = s;
    while let Some(first) = rest.chars().next() {
        if first.is_ascii_digit() {
            let end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            let (run, tail) = rest.split_at(end);
            keys.push(Key::Digits {
                value: run.trim_start_matches('0'),
                raw_len: run.len(),
            });
            rest = tail;
            continue;
        }
        keys.push(if first.is_alphabetic() {
            Key::Letter {
                lower: first.to_lowercase().next().unwrap_or(first),
                upper: first.is_uppercase(),
            }
        } else {
            Key::Punct(first)
        });
        rest = &rest[first.len_utf8()..];
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHARED: &str = "void main() {}";

    fn entry(name: &'static str) -> ManifestEntry {
        ManifestEntry {
            name,
            fragment: "void main() { gl_FragColor = vec4(1.0); }",
            vertex: None,
        }
    }

    #[test]
    fn sorts_numbers_by_value() {
        let registry = Registry::from_manifest(&[entry("2-x"), entry("10-x"), entry("1-x")], SHARED);
        assert_eq!(registry.names(), vec!["1-x", "2-x", "10-x"]);
    }

    #[test]
    fn dotted_prefixes_sort_per_component() {
        let mut names = vec!["01.10-b", "01.02-a", "02.01-c", "01.01-hello"];
        names.sort_by(|a, b| numeric_aware_cmp(a, b));
        assert_eq!(names, vec!["01.01-hello", "01.02-a", "01.10-b", "02.01-c"]);
    }

    #[test]
    fn leading_zeros_compare_by_value() {
        assert_eq!(numeric_aware_cmp("007-a", "7-a"), Ordering::Less);
        assert_eq!(numeric_aware_cmp("007-a", "8-a"), Ordering::Less);
        assert_eq!(numeric_aware_cmp("9-a", "007-a"), Ordering::Greater);
    }

    #[test]
    fn text_compares_case_insensitively() {
        assert_eq!(numeric_aware_cmp("Alpha", "beta"), Ordering::Less);
        assert_eq!(numeric_aware_cmp("abc", "abc"), Ordering::Equal);
        assert_eq!(numeric_aware_cmp("abc", "ABC"), Ordering::Less);
    }

    #[test]
    fn matches_browser_numeric_collation() {
        let mut names = vec!["b-x", "B-x", "-a", "1-a", "a", "01", "1"];
        names.sort_by(|a, b| numeric_aware_cmp(a, b));
        assert_eq!(names, vec!["-a", "01", "1", "1-a", "a", "b-x", "B-x"]);
    }

    #[test]
    fn duplicate_names_keep_first_entry() {
        let mut second = entry("01-a");
        second.fragment = "other";
        let registry = Registry::from_manifest(&[entry("01-a"), second], SHARED);
        assert_eq!(registry.len(), 1);
        assert_ne!(registry.get("01-a").unwrap().fragment, "other");
    }

    #[test]
    fn resolve_reports_available_examples() {
        let registry = Registry::from_manifest(&[entry("01-a"), entry("02-b")], SHARED);
        let err = registry.resolve("nope").unwrap_err();
        assert_eq!(err.to_string(), "Unknown example \"nope\". Available: 01-a, 02-b");
    }

    #[test]
    fn empty_registry_is_allowed() {
        let registry = Registry::from_manifest(&[], SHARED);
        assert!(registry.is_empty());
        assert_eq!(registry.first(), None);
    }

    #[test]
    fn embedded_manifest_is_sorted() {
        let registry = Registry::embedded();
        let names = registry.names();
        let mut sorted = names.clone();
        sorted.sort_by(|a, b| numeric_aware_cmp(a, b));
        assert_eq!(names, sorted);
        assert!(!registry.shared_vertex().is_empty());
    }
}
