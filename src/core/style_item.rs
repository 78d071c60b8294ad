/*
 * The value type for one named style: up to four optional fields (foreground
 * color, background color, font face, font size), each stored as its raw
 * field text. A field's text is either a plain value or `value,extra` where
 * `extra` is one of the closed extra-attribute set (bold, italic, underline,
 * eol); a field never holds more than one extra attribute.
 *
 * Items encode to and decode from a canonical string form: present fields in
 * the fixed order fore, back, face, size, each rendered `name:value`, joined
 * by commas. Everything downstream (the sheet parser, table resolution, font
 * substitution) trades in this encoding.
 */
use std::fmt;

/* Primary attribute names, in canonical encoding order. The same order is
 * used as the placement priority when attaching an extra attribute. */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleAttr {
    Fore,
    Back,
    Face,
    Size,
}

impl StyleAttr {
    pub const ALL: [StyleAttr; 4] = [
        StyleAttr::Fore,
        StyleAttr::Back,
        StyleAttr::Face,
        StyleAttr::Size,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleAttr::Fore => "fore",
            StyleAttr::Back => "back",
            StyleAttr::Face => "face",
            StyleAttr::Size => "size",
        }
    }

    pub fn from_key(key: &str) -> Option<StyleAttr> {
        match key {
            "fore" => Some(StyleAttr::Fore),
            "back" => Some(StyleAttr::Back),
            "face" => Some(StyleAttr::Face),
            "size" => Some(StyleAttr::Size),
            _ => None,
        }
    }
}

impl fmt::Display for StyleAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/* Extra text attributes. These piggyback on a primary field's value rather
 * than living in a field of their own. */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtraAttr {
    Bold,
    Italic,
    Underline,
    Eol,
}

impl ExtraAttr {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtraAttr::Bold => "bold",
            ExtraAttr::Italic => "italic",
            ExtraAttr::Underline => "underline",
            ExtraAttr::Eol => "eol",
        }
    }

    pub fn from_key(key: &str) -> Option<ExtraAttr> {
        match key {
            "bold" => Some(ExtraAttr::Bold),
            "italic" => Some(ExtraAttr::Italic),
            "underline" => Some(ExtraAttr::Underline),
            "eol" => Some(ExtraAttr::Eol),
            _ => None,
        }
    }
}

impl fmt::Display for ExtraAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleItem {
    fore: Option<String>,
    back: Option<String>,
    face: Option<String>,
    size: Option<String>,
}

impl StyleItem {
    pub fn new() -> Self {
        StyleItem::default()
    }

    pub fn with_fore(mut self, value: &str) -> Self {
        self.fore = Some(value.to_string());
        self
    }

    pub fn with_back(mut self, value: &str) -> Self {
        self.back = Some(value.to_string());
        self
    }

    pub fn with_face(mut self, value: &str) -> Self {
        self.face = Some(value.to_string());
        self
    }

    pub fn with_size(mut self, value: &str) -> Self {
        self.size = Some(value.to_string());
        self
    }

    pub fn fore(&self) -> Option<&str> {
        self.fore.as_deref()
    }

    pub fn back(&self) -> Option<&str> {
        self.back.as_deref()
    }

    pub fn face(&self) -> Option<&str> {
        self.face.as_deref()
    }

    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    pub fn get(&self, attr: StyleAttr) -> Option<&str> {
        match attr {
            StyleAttr::Fore => self.fore.as_deref(),
            StyleAttr::Back => self.back.as_deref(),
            StyleAttr::Face => self.face.as_deref(),
            StyleAttr::Size => self.size.as_deref(),
        }
    }

    pub fn set(&mut self, attr: StyleAttr, value: &str) {
        let slot = match attr {
            StyleAttr::Fore => &mut self.fore,
            StyleAttr::Back => &mut self.back,
            StyleAttr::Face => &mut self.face,
            StyleAttr::Size => &mut self.size,
        };
        *slot = Some(value.to_string());
    }

    pub fn set_fore(&mut self, value: &str) {
        self.set(StyleAttr::Fore, value);
    }

    pub fn set_back(&mut self, value: &str) {
        self.set(StyleAttr::Back, value);
    }

    pub fn set_face(&mut self, value: &str) {
        self.set(StyleAttr::Face, value);
    }

    pub fn set_size(&mut self, value: &str) {
        self.set(StyleAttr::Size, value);
    }

    /*
     * Replaces the primary value of a field while keeping its extra
     * attribute, if one is encoded. Not intended for writing extra
     * attributes themselves; use `set_ex_attr` for that.
     */
    pub fn set_named_attr(&mut self, attr: StyleAttr, value: &str) {
        let replacement = match self.get(attr) {
            Some(current) => match current.split_once(',') {
                Some((_, extra)) => format!("{value},{extra}"),
                None => value.to_string(),
            },
            None => value.to_string(),
        };
        self.set(attr, &replacement);
    }

    pub fn has_ex_attr(&self, extra: ExtraAttr) -> bool {
        StyleAttr::ALL.iter().any(|attr| {
            self.get(*attr)
                .and_then(|value| value.split_once(','))
                .is_some_and(|(_, tail)| tail == extra.as_str())
        })
    }

    /*
     * Enables or disables one extra attribute. Enabling attaches it to the
     * first field in fore, back, face, size order whose value is set and
     * carries no extra yet; if the attribute is already present anywhere the
     * call is a no-op. Disabling strips it from every field that encodes it.
     */
    pub fn set_ex_attr(&mut self, extra: ExtraAttr, enable: bool) {
        if enable {
            if self.has_ex_attr(extra) {
                return;
            }
            for attr in StyleAttr::ALL {
                let joined = match self.get(attr) {
                    Some(value) if !value.contains(',') => {
                        format!("{},{}", value, extra.as_str())
                    }
                    _ => continue,
                };
                self.set(attr, &joined);
                break;
            }
        } else {
            for attr in StyleAttr::ALL {
                let stripped = match self.get(attr) {
                    Some(value) => match value.split_once(',') {
                        Some((primary, tail)) if tail == extra.as_str() => primary.to_string(),
                        _ => continue,
                    },
                    None => continue,
                };
                self.set(attr, &stripped);
            }
        }
    }

    /*
     * Bulk-sets fields from a canonical style string. Tokenizes on commas,
     * then on colons: a `key:value` token whose key is a primary attribute
     * assigns that field and becomes the "last set" field; a token whose key
     * is an extra-attribute name continues the last-set field (appended
     * after a comma, unless that field already carries an extra). Tokens
     * matching neither vocabulary are ignored. Existing fields absent from
     * the input are left untouched.
     *
     * Returns true when at least one primary field was assigned.
     */
    pub fn set_attr_from_str(&mut self, text: &str) -> bool {
        let mut last_set: Option<StyleAttr> = None;
        for atom in text.split(',') {
            let key = match atom.split_once(':') {
                Some((key, value)) => {
                    if !value.contains(':') {
                        if let Some(attr) = StyleAttr::from_key(key) {
                            self.set(attr, value);
                            last_set = Some(attr);
                            continue;
                        }
                    }
                    key
                }
                None => atom,
            };
            if let Some(extra) = ExtraAttr::from_key(key) {
                if let Some(attr) = last_set {
                    let appended = match self.get(attr) {
                        Some(value) if !value.contains(',') => {
                            format!("{},{}", value, extra.as_str())
                        }
                        _ => continue,
                    };
                    self.set(attr, &appended);
                }
            }
        }
        last_set.is_some()
    }

    pub fn to_style_string(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        for attr in StyleAttr::ALL {
            if let Some(value) = self.get(attr) {
                parts.push(format!("{}:{}", attr.as_str(), value));
            }
        }
        parts.join(",")
    }
}

impl fmt::Display for StyleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_style_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_string_orders_fields() {
        let item = StyleItem::new()
            .with_size("%(size)d")
            .with_back("#F6F6F6")
            .with_fore("#000000")
            .with_face("%(mono)s");
        assert_eq!(
            item.to_style_string(),
            "fore:#000000,back:#F6F6F6,face:%(mono)s,size:%(size)d"
        );
    }

    #[test]
    fn test_canonical_string_omits_unset_fields() {
        let item = StyleItem::new().with_back("#C0C0C0").with_size("%(size2)d");
        assert_eq!(item.to_style_string(), "back:#C0C0C0,size:%(size2)d");
        assert_eq!(StyleItem::new().to_style_string(), "");
    }

    #[test]
    fn test_display_matches_style_string() {
        let item = StyleItem::new().with_fore("#A52B2B,bold");
        assert_eq!(format!("{item}"), item.to_style_string());
    }

    #[test]
    fn test_encode_then_bulk_set_round_trips() {
        let samples = vec![
            StyleItem::new()
                .with_fore("#000000")
                .with_back("#F6F6F6")
                .with_face("%(mono)s")
                .with_size("%(size)d"),
            StyleItem::new().with_fore("#DD0101,bold").with_face("%(other)s"),
            StyleItem::new().with_back("#EEC0EE,eol"),
            StyleItem::new().with_face("Monaco").with_size("10"),
        ];
        for original in samples {
            let mut decoded = StyleItem::new();
            assert!(decoded.set_attr_from_str(&original.to_style_string()));
            assert_eq!(decoded, original);
        }
    }

    #[test]
    fn test_bulk_set_appends_extra_to_last_set_field() {
        let mut item = StyleItem::new();
        assert!(item.set_attr_from_str("fore:#123456,bold,back:#FFFFFF"));
        assert_eq!(item.fore(), Some("#123456,bold"));
        assert_eq!(item.back(), Some("#FFFFFF"));
    }

    #[test]
    fn test_bulk_set_ignores_unknown_tokens() {
        let mut item = StyleItem::new();
        assert!(item.set_attr_from_str("shiny:#123456,fore:#838383,blink"));
        assert_eq!(item.fore(), Some("#838383"));
        assert_eq!(item.back(), None);
        assert_eq!(item.to_style_string(), "fore:#838383");
    }

    #[test]
    fn test_bulk_set_ignores_extra_with_no_prior_field() {
        let mut item = StyleItem::new();
        assert!(!item.set_attr_from_str("bold,italic"));
        assert_eq!(item, StyleItem::new());
    }

    #[test]
    fn test_bulk_set_returns_false_when_nothing_assigned() {
        let mut item = StyleItem::new();
        assert!(!item.set_attr_from_str(""));
        assert!(!item.set_attr_from_str("fore:#00:00"));
        assert_eq!(item, StyleItem::new());
    }

    #[test]
    fn test_bulk_set_extra_keyed_token_continues_last_field() {
        // "bold:x" carries an extra-attribute key, so it continues the
        // last-set field; the text after the colon is discarded.
        let mut item = StyleItem::new();
        assert!(item.set_attr_from_str("fore:#123456,bold:x"));
        assert_eq!(item.fore(), Some("#123456,bold"));
    }

    #[test]
    fn test_bulk_set_does_not_stack_extras_on_one_field() {
        let mut item = StyleItem::new();
        assert!(item.set_attr_from_str("fore:#123456,bold,italic"));
        assert_eq!(item.fore(), Some("#123456,bold"));
    }

    #[test]
    fn test_set_ex_attr_attaches_in_priority_order() {
        let mut item = StyleItem::new().with_back("#FF0000").with_face("%(mono)s");
        item.set_ex_attr(ExtraAttr::Bold, true);
        assert_eq!(item.back(), Some("#FF0000,bold"));
        assert_eq!(item.face(), Some("%(mono)s"));
    }

    #[test]
    fn test_set_ex_attr_skips_fields_already_carrying_an_extra() {
        let mut item = StyleItem::new()
            .with_fore("#000000,bold")
            .with_back("#EEC0EE");
        item.set_ex_attr(ExtraAttr::Eol, true);
        assert_eq!(item.fore(), Some("#000000,bold"));
        assert_eq!(item.back(), Some("#EEC0EE,eol"));
    }

    #[test]
    fn test_set_ex_attr_is_noop_when_already_present() {
        let mut item = StyleItem::new()
            .with_fore("#000000")
            .with_back("#FFFFFF,eol");
        item.set_ex_attr(ExtraAttr::Eol, true);
        assert_eq!(item.fore(), Some("#000000"));
        assert_eq!(item.back(), Some("#FFFFFF,eol"));
    }

    #[test]
    fn test_set_ex_attr_removes_named_attribute() {
        let mut item = StyleItem::new();
        assert!(item.set_attr_from_str("fore:#123456,bold"));
        item.set_ex_attr(ExtraAttr::Bold, false);
        assert_eq!(item.fore(), Some("#123456"));
        assert_eq!(item.to_style_string(), "fore:#123456");
    }

    #[test]
    fn test_set_ex_attr_remove_leaves_other_extras_alone() {
        let mut item = StyleItem::new()
            .with_fore("#000000,bold")
            .with_back("#EEC0EE,eol");
        item.set_ex_attr(ExtraAttr::Bold, false);
        assert_eq!(item.fore(), Some("#000000"));
        assert_eq!(item.back(), Some("#EEC0EE,eol"));
    }

    #[test]
    fn test_field_setters_replace_raw_field_text() {
        let mut item = StyleItem::new();
        item.set_fore("#2E8B57");
        item.set_back("#FFFFFF");
        item.set_face("%(helv)s");
        item.set_size("%(size2)d");
        assert_eq!(
            item.to_style_string(),
            "fore:#2E8B57,back:#FFFFFF,face:%(helv)s,size:%(size2)d"
        );

        // Unlike set_named_attr, a field setter overwrites any encoded extra.
        item.set_fore("#A52B2B,bold");
        item.set_fore("#000000");
        assert_eq!(item.fore(), Some("#000000"));
    }

    #[test]
    fn test_set_named_attr_preserves_encoded_extra() {
        let mut item = StyleItem::new().with_fore("#A52B2B,bold");
        item.set_named_attr(StyleAttr::Fore, "#112233");
        assert_eq!(item.fore(), Some("#112233,bold"));
    }

    #[test]
    fn test_set_named_attr_plain_assignment_when_unset() {
        let mut item = StyleItem::new();
        item.set_named_attr(StyleAttr::Size, "12");
        assert_eq!(item.size(), Some("12"));
    }

    #[test]
    fn test_equality_tracks_canonical_string() {
        let left = StyleItem::new().with_fore("#838383");
        let mut right = StyleItem::new();
        right.set_attr_from_str("fore:#838383");
        assert_eq!(left, right);
        assert_eq!(left.to_style_string(), right.to_style_string());

        let different = StyleItem::new().with_fore("#838384");
        assert_ne!(left, different);
    }

    #[test]
    fn test_attr_vocabulary_lookups() {
        assert_eq!(StyleAttr::from_key("fore"), Some(StyleAttr::Fore));
        assert_eq!(StyleAttr::from_key("FORE"), None);
        assert_eq!(StyleAttr::from_key(" back"), None);
        assert_eq!(ExtraAttr::from_key("eol"), Some(ExtraAttr::Eol));
        assert_eq!(ExtraAttr::from_key("old"), None);
        assert_eq!(ExtraAttr::from_key(""), None);
    }
}
