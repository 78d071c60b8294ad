/*
 * This module consolidates the core logic of the styling engine. It
 * re-exports the style value types, the style-sheet parser, the resolution
 * table, font substitution, and the abstractions the manager layer is built
 * on (`SheetLoaderOperations`, `FontProviderOperations`, and
 * `DiagnosticSinkOperations`).
 */
pub mod diagnostics;
pub mod font_table;
pub mod sheet_loader;
pub mod sheet_parser;
pub mod style_item;
pub mod style_table;

// Re-export the style value types
pub use style_item::{ExtraAttr, StyleAttr, StyleItem};

// Re-export the style table and its baselines
pub use style_table::{DEFAULT_STYLE_TAG, MergeMode, StyleTable, default_style_table};

#[cfg(test)]
pub use style_table::blank_style_table;

// Re-export parser entry points
pub use sheet_parser::{ParseError, ParseMode, parse_style_sheet};

// Re-export font substitution items
pub use font_table::{
    CoreFontProvider, FONT_TAG_HELV, FONT_TAG_MONO, FONT_TAG_OTHER, FONT_TAG_SIZE, FONT_TAG_SIZE2,
    FONT_TAG_TIMES, FontProviderOperations, FontTable,
};

// Re-export sheet loading items
pub use sheet_loader::{CoreSheetLoader, SheetLoaderOperations};

#[cfg(test)]
pub use sheet_loader::SheetLoadError;

// Re-export diagnostics items
pub use diagnostics::{CoreDiagnosticSink, DiagnosticSeverity, DiagnosticSinkOperations};
