/*
 * The style table: tag name to `StyleItem`, plus the two resolution steps
 * that turn freshly parsed, possibly partial tables into complete ones.
 * `merge_from` overlays whole entries; `fill_defaults` copies every unset
 * field from the reserved `default_style` entry so that, after resolution,
 * every entry has all four fields populated.
 *
 * `default_style_table` is the hardcoded baseline every manager starts from
 * and the fallback when a custom sheet cannot be loaded.
 */
use crate::core::{StyleAttr, StyleItem};
use std::collections::HashMap;

pub const DEFAULT_STYLE_TAG: &str = "default_style";

/* How `StyleManager::set_styles` treats the incoming table relative to the
 * one already committed. */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    Merge,
    Replace,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleTable {
    entries: HashMap<String, StyleItem>,
}

impl StyleTable {
    pub fn new() -> Self {
        StyleTable::default()
    }

    pub fn insert(&mut self, tag: &str, item: StyleItem) {
        self.entries.insert(tag.to_string(), item);
    }

    pub fn get(&self, tag: &str) -> Option<&StyleItem> {
        self.entries.get(tag)
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleItem)> {
        self.entries.iter().map(|(tag, item)| (tag.as_str(), item))
    }

    /*
     * Overlays `overlay` onto this table: every overlay tag replaces the
     * whole entry of the same name; tags absent from the overlay are left
     * untouched. Entries are cloned in, so the two tables never share item
     * storage afterwards.
     */
    pub fn merge_from(&mut self, overlay: &StyleTable) {
        for (tag, item) in &overlay.entries {
            self.entries.insert(tag.clone(), item.clone());
        }
    }

    /*
     * Copies each field of the `default_style` entry into every entry where
     * that field is unset, `default_style` itself included. Without a
     * `default_style` entry this is a no-op. Idempotent.
     */
    pub fn fill_defaults(&mut self) {
        let default = match self.entries.get(DEFAULT_STYLE_TAG) {
            Some(item) => item.clone(),
            None => return,
        };
        for item in self.entries.values_mut() {
            for attr in StyleAttr::ALL {
                if item.get(attr).is_none() {
                    if let Some(value) = default.get(attr) {
                        item.set(attr, value);
                    }
                }
            }
        }
    }
}

/*
 * The baseline style set. Covers the common syntax classes plus editor
 * furniture (line-number margin, brace matching, calltips). Values are hex
 * colors, optionally suffixed with one extra attribute, and font fields use
 * deferred `%(tag)` placeholders resolved against the font table at lookup.
 */
pub fn default_style_table() -> StyleTable {
    let mut table = StyleTable::new();
    table.insert(
        "brace_good",
        StyleItem::new().with_fore("#FFFFFF").with_back("#0000FF,bold"),
    );
    table.insert("brace_bad", StyleItem::new().with_back("#FF0000,bold"));
    table.insert(
        "calltip",
        StyleItem::new().with_fore("#404040").with_back("#FFFFB8"),
    );
    table.insert("ctrl_char", StyleItem::new());
    table.insert(
        "line_num",
        StyleItem::new()
            .with_back("#C0C0C0")
            .with_face("%(other)s")
            .with_size("%(size2)d"),
    );
    table.insert(
        "array_style",
        StyleItem::new().with_fore("#EE8B02,bold").with_face("%(other)s"),
    );
    table.insert(
        "btick_style",
        StyleItem::new().with_fore("#8959F6,bold").with_size("%(size)d"),
    );
    table.insert(
        DEFAULT_STYLE_TAG,
        StyleItem::new()
            .with_fore("#000000")
            .with_back("#F6F6F6")
            .with_face("%(mono)s")
            .with_size("%(size)d"),
    );
    table.insert("char_style", StyleItem::new().with_fore("#FF3AFF"));
    table.insert("class_style", StyleItem::new().with_fore("#2E8B57,bold"));
    table.insert("class2_style", StyleItem::new().with_fore("#2E8B57,bold"));
    table.insert("comment_style", StyleItem::new().with_fore("#838383"));
    table.insert(
        "directive_style",
        StyleItem::new().with_fore("#0000FF,bold").with_face("%(other)s"),
    );
    table.insert("dockey_style", StyleItem::new().with_fore("#0000FF"));
    table.insert(
        "error_style",
        StyleItem::new().with_fore("#DD0101,bold").with_face("%(other)s"),
    );
    table.insert("funct_style", StyleItem::new().with_fore("#008B8B,italic"));
    table.insert(
        "global_style",
        StyleItem::new().with_fore("#007F7F,bold").with_face("%(other)s"),
    );
    table.insert(
        "here_style",
        StyleItem::new().with_fore("#CA61CA,bold").with_face("%(other)s"),
    );
    table.insert(
        "ideol_style",
        StyleItem::new().with_fore("#E0C0E0").with_face("%(other)s"),
    );
    table.insert("keyword_style", StyleItem::new().with_fore("#A52B2B,bold"));
    table.insert("keyword2_style", StyleItem::new().with_fore("#2E8B57,bold"));
    table.insert("keyword3_style", StyleItem::new().with_fore("#008B8B,bold"));
    table.insert("keyword4_style", StyleItem::new().with_fore("#9D2424"));
    table.insert(
        "marker_style",
        StyleItem::new().with_fore("#FFFFFF").with_back("#000000"),
    );
    table.insert(
        "folder_style",
        StyleItem::new().with_fore("#FFFFFF").with_back("#000000"),
    );
    table.insert("number_style", StyleItem::new().with_fore("#DD0101"));
    table.insert("number2_style", StyleItem::new().with_fore("#DD0101,bold"));
    table.insert(
        "operator_style",
        StyleItem::new().with_fore("#000000").with_face("%(mono)s,bold"),
    );
    table.insert("pre_style", StyleItem::new().with_fore("#AB39F2,bold"));
    table.insert(
        "pre2_style",
        StyleItem::new().with_fore("#AB39F2,bold").with_back("#FFFFFF"),
    );
    table.insert("regex_style", StyleItem::new().with_fore("#008B8B"));
    table.insert(
        "scalar_style",
        StyleItem::new().with_fore("#AB37F2,bold").with_face("%(other)s"),
    );
    table.insert(
        "scalar2_style",
        StyleItem::new().with_fore("#AB37F2").with_face("%(other)s"),
    );
    table.insert("string_style", StyleItem::new().with_fore("#FF3AFF,bold"));
    table.insert(
        "stringeol_style",
        StyleItem::new()
            .with_fore("#000000,bold")
            .with_back("#EEC0EE,eol")
            .with_face("%(other)s"),
    );
    table.insert(
        "unknown_style",
        StyleItem::new()
            .with_fore("#FFFFFF,bold")
            .with_back("#DD0101,eol")
            .with_face("%(other)s"),
    );
    table
}

/*
 * The baseline tag set with every entry reset to the plain monospace look.
 * Useful as a neutral starting point for building a custom sheet.
 */
pub fn blank_style_table() -> StyleTable {
    let mut table = StyleTable::new();
    for tag in default_style_table().tags() {
        table.insert(
            tag,
            StyleItem::new().with_face("%(mono)s").with_size("%(size)d"),
        );
    }
    table
}
