/*
 * `StyleManager` is the lookup facade over the styling core. It owns the
 * resolved style table and the font table, loads and merges style sheets
 * through the injected loader, and answers name-based lookups with font
 * placeholders substituted on the fly. Stored entries keep their
 * placeholders; substitution happens per lookup so later font changes take
 * effect without reloading a sheet.
 */
use crate::core::{
    DEFAULT_STYLE_TAG, DiagnosticSeverity, DiagnosticSinkOperations, FONT_TAG_MONO,
    FontProviderOperations, FontTable, MergeMode, ParseError, ParseMode, SheetLoaderOperations,
    StyleItem, StyleTable, default_style_table, parse_style_sheet,
};
use std::path::Path;
use std::sync::Arc;

pub struct StyleManager {
    styles: StyleTable,
    fonts: FontTable,
    loader: Arc<dyn SheetLoaderOperations>,
    diagnostics: Arc<dyn DiagnosticSinkOperations>,
}

impl StyleManager {
    /*
     * Builds a manager seeded with the presentation defaults, so lookups are
     * answerable before any sheet is loaded.
     */
    pub fn new(
        font_provider: &dyn FontProviderOperations,
        loader: Arc<dyn SheetLoaderOperations>,
        diagnostics: Arc<dyn DiagnosticSinkOperations>,
    ) -> Self {
        let fonts = font_provider.font_table();
        let mut styles = default_style_table();
        styles.fill_defaults();
        log::debug!(
            "StyleManager: Initialized with {} baseline styles and {} font entries",
            styles.len(),
            fonts.len()
        );
        StyleManager {
            styles,
            fonts,
            loader,
            diagnostics,
        }
    }

    pub fn with_style_sheet(
        font_provider: &dyn FontProviderOperations,
        loader: Arc<dyn SheetLoaderOperations>,
        diagnostics: Arc<dyn DiagnosticSinkOperations>,
        sheet: &Path,
    ) -> Self {
        let mut manager = Self::new(font_provider, loader, diagnostics);
        if manager.load_style_sheet(sheet) {
            manager.diagnostics.report(
                DiagnosticSeverity::Info,
                &format!("[init] loaded style sheet {sheet:?}"),
            );
        } else {
            manager.diagnostics.report(
                DiagnosticSeverity::Warning,
                &format!("[init error] falling back to presentation defaults for {sheet:?}"),
            );
        }
        manager
    }

    /*
     * Reads a sheet through the loader and merges its styles over the
     * current table. On any failure the current table is left untouched and
     * the cause is reported through the diagnostics sink.
     */
    pub fn load_style_sheet(&mut self, path: &Path) -> bool {
        let text = match self.loader.read_sheet(path) {
            Ok(text) => text,
            Err(error) => {
                self.diagnostics
                    .report(DiagnosticSeverity::Error, &format!("[load error] {error}"));
                return false;
            }
        };
        match self.parse_style_data(&text, ParseMode::Lenient) {
            Ok(parsed) => {
                log::debug!(
                    "StyleManager: Loaded {} style(s) from {path:?}",
                    parsed.len()
                );
                self.set_styles(parsed, MergeMode::Merge);
                true
            }
            Err(error) => {
                self.diagnostics
                    .report(DiagnosticSeverity::Error, &format!("[load error] {error}"));
                false
            }
        }
    }

    pub fn parse_style_data(
        &self,
        text: &str,
        mode: ParseMode,
    ) -> Result<StyleTable, ParseError> {
        parse_style_sheet(text, mode, self.diagnostics.as_ref())
    }

    /*
     * Commits a parsed table. `Replace` makes it the whole table; `Merge`
     * overlays it onto the current one, whole entries winning per tag. Both
     * paths re-fill unset fields from `default_style` afterwards.
     */
    pub fn set_styles(&mut self, table: StyleTable, mode: MergeMode) {
        match mode {
            MergeMode::Replace => {
                let mut committed = table;
                committed.fill_defaults();
                log::debug!(
                    "StyleManager: Replaced style table with {} entries",
                    committed.len()
                );
                self.styles = committed;
            }
            MergeMode::Merge => {
                log::debug!(
                    "StyleManager: Merging {} entries into the style table",
                    table.len()
                );
                self.styles.merge_from(&table);
                self.styles.fill_defaults();
            }
        }
    }

    pub fn has_named_style(&self, tag: &str) -> bool {
        self.styles.contains_tag(tag)
    }

    /*
     * Looks up a style by tag. An unknown tag yields a blank item. A stored
     * value carrying a `%` is formatted against the font table and the
     * formatted string decoded into a fresh item, leaving the stored entry
     * untouched.
     */
    pub fn item_by_name(&self, tag: &str) -> StyleItem {
        let Some(stored) = self.styles.get(tag) else {
            log::trace!("StyleManager: no style named '{tag}', returning a blank item");
            return StyleItem::new();
        };
        let encoded = stored.to_style_string();
        if !encoded.contains('%') {
            return stored.clone();
        }
        let mut fresh = StyleItem::new();
        fresh.set_attr_from_str(&self.substitute_with_warning(tag, &encoded));
        fresh
    }

    /* String twin of `item_by_name`: the formatted canonical string. */
    pub fn style_by_name(&self, tag: &str) -> String {
        let Some(stored) = self.styles.get(tag) else {
            return String::new();
        };
        let encoded = stored.to_style_string();
        if !encoded.contains('%') {
            return encoded;
        }
        self.substitute_with_warning(tag, &encoded)
    }

    /* The font table always exists, so this cannot currently fail. */
    pub fn set_global_font(&mut self, font_tag: &str, value: &str) -> bool {
        log::debug!("StyleManager: Setting global font '{font_tag}' to '{value}'");
        self.fonts.insert(font_tag, value);
        true
    }

    /*
     * Inserts or overwrites a single style entry, then re-fills so a partial
     * item still resolves completely.
     */
    pub fn set_style_tag(&mut self, tag: &str, item: StyleItem) {
        log::debug!("StyleManager: Setting style tag '{tag}'");
        self.styles.insert(tag, item);
        self.styles.fill_defaults();
    }

    pub fn style_set(&self) -> StyleTable {
        self.styles.clone()
    }

    pub fn default_fore_color(&self) -> String {
        let item = self.item_by_name(DEFAULT_STYLE_TAG);
        match item.fore() {
            Some(value) => strip_extra_suffix(value).to_string(),
            None => "#000000".to_string(),
        }
    }

    pub fn default_back_color(&self) -> String {
        let item = self.item_by_name(DEFAULT_STYLE_TAG);
        match item.back() {
            Some(value) => strip_extra_suffix(value).to_string(),
            None => "#FFFFFF".to_string(),
        }
    }

    pub fn mono_font(&self) -> Option<String> {
        self.fonts.get(FONT_TAG_MONO).map(str::to_string)
    }

    fn substitute_with_warning(&self, tag: &str, encoded: &str) -> String {
        let resolved = self.fonts.substitute(encoded);
        if resolved.contains("%(") {
            self.diagnostics.report(
                DiagnosticSeverity::Warning,
                &format!("unresolved font placeholder in style '{tag}': '{resolved}'"),
            );
        }
        resolved
    }
}

fn strip_extra_suffix(value: &str) -> &str {
    match value.split_once(',') {
        Some((primary, _)) => primary,
        None => value,
    }
}
