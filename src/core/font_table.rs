/*
 * The font table: a flat mapping from symbolic font tags to concrete face
 * names and point sizes, plus the textual substitution that expands deferred
 * `%(tag)` placeholders inside style strings. The table itself is supplied
 * by a `FontProviderOperations` collaborator; the styling core never talks
 * to a toolkit's font enumeration directly. `CoreFontProvider` supplies
 * platform-neutral logical faces for hosts that do not inject their own.
 */
use std::collections::HashMap;

pub const FONT_TAG_TIMES: &str = "times";
pub const FONT_TAG_MONO: &str = "mono";
pub const FONT_TAG_HELV: &str = "helv";
pub const FONT_TAG_OTHER: &str = "other";
pub const FONT_TAG_SIZE: &str = "size";
pub const FONT_TAG_SIZE2: &str = "size2";

const DEFAULT_POINT_SIZE: i32 = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontTable {
    entries: HashMap<String, String>,
}

impl FontTable {
    pub fn new() -> Self {
        FontTable::default()
    }

    pub fn insert(&mut self, tag: &str, value: &str) {
        self.entries.insert(tag.to_string(), value.to_string());
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.entries.get(tag).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /*
     * Expands every `%(tag)` token in `text` with the table's value for
     * `tag`, consuming one trailing conversion character (the `s` in
     * `%(mono)s`) when present. Tokens naming an unknown tag, and `%(`
     * sequences with no closing parenthesis, are left in place, which keeps
     * the operation idempotent. The input is never mutated; a new string is
     * returned.
     */
    pub fn substitute(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find("%(") {
            out.push_str(&rest[..start]);
            let token = &rest[start..];
            let close = match token.find(')') {
                Some(close) => close,
                None => {
                    out.push_str(token);
                    rest = "";
                    break;
                }
            };
            let tag = &token[2..close];
            let conv = match token[close + 1..].chars().next() {
                Some(c) if c.is_ascii_alphabetic() => 1,
                _ => 0,
            };
            let token_end = close + 1 + conv;
            match self.entries.get(tag) {
                Some(value) => out.push_str(value),
                None => out.push_str(&token[..token_end]),
            }
            rest = &token[token_end..];
        }
        out.push_str(rest);
        out
    }
}

pub trait FontProviderOperations: Send + Sync {
    fn font_table(&self) -> FontTable;
}

pub struct CoreFontProvider {}

impl CoreFontProvider {
    pub fn new() -> Self {
        CoreFontProvider {}
    }
}

impl Default for CoreFontProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FontProviderOperations for CoreFontProvider {
    /*
     * Builds the default table: logical face names at a ten point standard
     * size, with `size2` two points smaller for margin furniture.
     */
    fn font_table(&self) -> FontTable {
        let mut table = FontTable::new();
        table.insert(FONT_TAG_MONO, "Monospace");
        table.insert(FONT_TAG_TIMES, "Serif");
        table.insert(FONT_TAG_HELV, "Sans");
        table.insert(FONT_TAG_OTHER, "Sans");
        table.insert(FONT_TAG_SIZE, &DEFAULT_POINT_SIZE.to_string());
        table.insert(FONT_TAG_SIZE2, &(DEFAULT_POINT_SIZE - 2).to_string());
        log::trace!("CoreFontProvider: built default font table ({} tags)", table.len());
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> FontTable {
        let mut table = FontTable::new();
        table.insert(FONT_TAG_MONO, "Menlo");
        table.insert(FONT_TAG_OTHER, "Arial");
        table.insert(FONT_TAG_SIZE, "10");
        table
    }

    #[test]
    fn test_substitute_expands_known_tags() {
        let table = sample_table();
        assert_eq!(table.substitute("face:%(mono)s,size:%(size)d"), "face:Menlo,size:10");
    }

    #[test]
    fn test_substitute_leaves_unknown_tags_in_place() {
        let table = sample_table();
        assert_eq!(table.substitute("face:%(bogus)s"), "face:%(bogus)s");
    }

    #[test]
    fn test_substitute_is_idempotent() {
        let table = sample_table();
        let once = table.substitute("fore:#000000,face:%(mono)s,size:%(missing)d");
        let twice = table.substitute(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_substitute_resolves_formerly_unknown_tag_after_insert() {
        let mut table = sample_table();
        let unresolved = table.substitute("face:%(helv)s");
        assert_eq!(unresolved, "face:%(helv)s");

        table.insert(FONT_TAG_HELV, "Helvetica");
        assert_eq!(table.substitute(&unresolved), "face:Helvetica");
    }

    #[test]
    fn test_substitute_without_conversion_character() {
        let table = sample_table();
        assert_eq!(table.substitute("face:%(mono),bold"), "face:Menlo,bold");
    }

    #[test]
    fn test_substitute_ignores_plain_percent_and_unclosed_token() {
        let table = sample_table();
        assert_eq!(table.substitute("100% pure"), "100% pure");
        assert_eq!(table.substitute("face:%(mono"), "face:%(mono");
    }

    #[test]
    fn test_insert_overwrites_existing_tag() {
        let mut table = sample_table();
        table.insert(FONT_TAG_MONO, "Courier New");
        assert_eq!(table.get(FONT_TAG_MONO), Some("Courier New"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_new_table_starts_empty() {
        let table = FontTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(!sample_table().is_empty());
    }

    #[test]
    fn test_core_provider_supplies_all_tags() {
        let table = CoreFontProvider::new().font_table();
        for tag in [
            FONT_TAG_TIMES,
            FONT_TAG_MONO,
            FONT_TAG_HELV,
            FONT_TAG_OTHER,
            FONT_TAG_SIZE,
            FONT_TAG_SIZE2,
        ] {
            assert!(table.get(tag).is_some(), "missing font tag {tag}");
        }
        assert_eq!(table.get(FONT_TAG_SIZE), Some("10"));
        assert_eq!(table.get(FONT_TAG_SIZE2), Some("8"));
    }
}
