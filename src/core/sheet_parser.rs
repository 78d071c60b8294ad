/*
 * The style-sheet parser. Turns the raw text of a sheet document into a
 * `StyleTable` of possibly partial entries, recovering from malformed input
 * block by block and declaration by declaration.
 *
 * The grammar is a flat sequence of `tag { key:value; ... }` blocks; braces
 * do not nest. Scanning walks the text once with a three-state machine
 * (between blocks, inside a block, skipping a dropped block) and tracks line
 * numbers so diagnostics can cite positions. Within a block, declarations
 * are separated by `;` and split on a single `:`; values are then validated
 * against the closed attribute vocabulary before being re-encoded into the
 * canonical form `StyleItem` decodes.
 *
 * In `Lenient` mode every malformed fragment is reported through the
 * diagnostics sink and dropped, never failing the document as a whole. In
 * `Strict` mode the first offence is returned as a `ParseError`; strictness
 * applies uniformly to all error classes, value validation included.
 */
use crate::core::{
    DiagnosticSeverity, DiagnosticSinkOperations, ExtraAttr, StyleAttr, StyleItem, StyleTable,
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Lenient,
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    BlockSyntax { line: usize, detail: String },
    InvalidTag { line: usize, tag: String },
    DeclarationSyntax { line: usize, tag: String, fragment: String },
    UnknownAttribute { line: usize, tag: String, key: String },
    InvalidValue { line: usize, tag: String, detail: String },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::BlockSyntax { line, .. }
            | ParseError::InvalidTag { line, .. }
            | ParseError::DeclarationSyntax { line, .. }
            | ParseError::UnknownAttribute { line, .. }
            | ParseError::InvalidValue { line, .. } => *line,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BlockSyntax { line, detail } => {
                write!(f, "syntax error near line {line}: {detail}")
            }
            ParseError::InvalidTag { line, tag } => {
                write!(f, "syntax error near line {line}: '{tag}' is not a valid style tag")
            }
            ParseError::DeclarationSyntax { line, tag, fragment } => {
                write!(
                    f,
                    "syntax error near line {line}: missing ':' or ';' in a declaration of '{tag}' ('{fragment}')"
                )
            }
            ParseError::UnknownAttribute { line, tag, key } => {
                write!(
                    f,
                    "syntax warning near line {line}: unknown style attribute '{key}' in declaration of '{tag}'"
                )
            }
            ParseError::InvalidValue { line, tag, detail } => {
                write!(
                    f,
                    "syntax warning near line {line}: {detail} in declaration of '{tag}'"
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

pub type Result<T> = std::result::Result<T, ParseError>;

/*
 * Parses a whole sheet document. Lenient parses always return `Ok`; strict
 * parses return the first offence. Diagnostics go to `sink` in both modes,
 * before a strict failure is returned.
 */
pub fn parse_style_sheet(
    text: &str,
    mode: ParseMode,
    sink: &dyn DiagnosticSinkOperations,
) -> Result<StyleTable> {
    SheetParser { mode, sink }.parse(text)
}

enum ScanState {
    BetweenBlocks,
    InBlock,
    SkipBlock,
}

struct SheetParser<'a> {
    mode: ParseMode,
    sink: &'a dyn DiagnosticSinkOperations,
}

impl SheetParser<'_> {
    fn parse(&self, text: &str) -> Result<StyleTable> {
        let mut table = StyleTable::new();
        let mut state = ScanState::BetweenBlocks;
        let mut line: usize = 1;
        let mut tag = String::new();
        let mut tag_line: usize = 1;
        let mut fragments: Vec<(String, usize)> = Vec::new();
        let mut fragment = String::new();
        let mut fragment_line: Option<usize> = None;

        for ch in text.chars() {
            match state {
                ScanState::BetweenBlocks => {
                    if ch == '{' {
                        if valid_tag(&tag) {
                            fragments.clear();
                            fragment.clear();
                            fragment_line = None;
                            state = ScanState::InBlock;
                        } else {
                            let cited = if tag.is_empty() { line } else { tag_line };
                            self.reject(ParseError::InvalidTag {
                                line: cited,
                                tag: std::mem::take(&mut tag),
                            })?;
                            state = ScanState::SkipBlock;
                        }
                    } else if ch == '}' {
                        let detail = if tag.is_empty() {
                            "unexpected '}' with no open block".to_string()
                        } else {
                            format!("missing '{{' in definition of '{tag}'")
                        };
                        self.reject(ParseError::BlockSyntax { line, detail })?;
                        tag.clear();
                    } else if !ch.is_whitespace() {
                        if tag.is_empty() {
                            tag_line = line;
                        }
                        tag.push(ch);
                    }
                }
                ScanState::InBlock => match ch {
                    '}' => {
                        fragments.push((
                            std::mem::take(&mut fragment),
                            fragment_line.take().unwrap_or(line),
                        ));
                        self.process_block(&tag, std::mem::take(&mut fragments), &mut table)?;
                        tag.clear();
                        state = ScanState::BetweenBlocks;
                    }
                    '{' => {
                        self.reject(ParseError::BlockSyntax {
                            line,
                            detail: format!("unexpected '{{' inside the block of '{tag}'"),
                        })?;
                        tag.clear();
                        fragments.clear();
                        fragment.clear();
                        fragment_line = None;
                        state = ScanState::SkipBlock;
                    }
                    ';' => {
                        fragments.push((
                            std::mem::take(&mut fragment),
                            fragment_line.take().unwrap_or(line),
                        ));
                    }
                    _ => {
                        if fragment_line.is_none() && !ch.is_whitespace() {
                            fragment_line = Some(line);
                        }
                        fragment.push(ch);
                    }
                },
                ScanState::SkipBlock => {
                    if ch == '}' {
                        state = ScanState::BetweenBlocks;
                    }
                }
            }
            if ch == '\n' {
                line += 1;
            }
        }

        match state {
            ScanState::BetweenBlocks => {
                if !tag.is_empty() {
                    self.reject(ParseError::BlockSyntax {
                        line: tag_line,
                        detail: format!("missing '{{' in definition of '{tag}'"),
                    })?;
                }
            }
            ScanState::InBlock => {
                // A document ending inside a block keeps its declarations.
                fragments.push((
                    std::mem::take(&mut fragment),
                    fragment_line.take().unwrap_or(line),
                ));
                self.process_block(&tag, fragments, &mut table)?;
            }
            ScanState::SkipBlock => {}
        }
        Ok(table)
    }

    /*
     * Validates one block's declarations and, when anything survives,
     * decodes the accumulated canonical string into the block's `StyleItem`.
     * A block whose declarations all fail produces no entry.
     */
    fn process_block(
        &self,
        tag: &str,
        mut fragments: Vec<(String, usize)>,
        table: &mut StyleTable,
    ) -> Result<()> {
        // One empty fragment before the closing brace is the trailing ';'.
        if fragments
            .last()
            .is_some_and(|(text, _)| text.trim().is_empty())
        {
            fragments.pop();
        }

        let mut parts: Vec<String> = Vec::new();
        for (fragment, line) in fragments {
            let trimmed = fragment.trim();
            let pair = match trimmed.split_once(':') {
                Some((key, value)) if !value.contains(':') => Some((key, value)),
                _ => None,
            };
            let Some((raw_key, raw_value)) = pair else {
                self.reject(ParseError::DeclarationSyntax {
                    line,
                    tag: tag.to_string(),
                    fragment: trimmed.to_string(),
                })?;
                continue;
            };
            let key = raw_key.trim();
            let Some(attr) = StyleAttr::from_key(key) else {
                self.reject(ParseError::UnknownAttribute {
                    line,
                    tag: tag.to_string(),
                    key: key.to_string(),
                })?;
                continue;
            };

            let tokens: Vec<&str> = raw_value.split_whitespace().collect();
            let Some(primary) = tokens.first().copied() else {
                self.reject(ParseError::InvalidValue {
                    line,
                    tag: tag.to_string(),
                    detail: format!("missing value for '{key}'"),
                })?;
                continue;
            };
            if tokens.len() > 2 {
                self.reject(ParseError::InvalidValue {
                    line,
                    tag: tag.to_string(),
                    detail: "only one extra attribute can be set per field".to_string(),
                })?;
            }
            let primary_ok = match attr {
                StyleAttr::Fore | StyleAttr::Back => is_color_shape(primary),
                StyleAttr::Face | StyleAttr::Size => {
                    is_placeholder(primary) || is_bare_literal(primary)
                }
            };
            if !primary_ok {
                self.reject(ParseError::InvalidValue {
                    line,
                    tag: tag.to_string(),
                    detail: format!("invalid value '{primary}' for '{key}'"),
                })?;
                continue;
            }
            let mut extra: Option<ExtraAttr> = None;
            if tokens.len() == 2 {
                match ExtraAttr::from_key(tokens[1]) {
                    Some(found) => extra = Some(found),
                    None => {
                        self.reject(ParseError::InvalidValue {
                            line,
                            tag: tag.to_string(),
                            detail: format!("unknown extra attribute '{}'", tokens[1]),
                        })?;
                    }
                }
            }
            match extra {
                Some(extra) => parts.push(format!("{key}:{primary},{extra}")),
                None => parts.push(format!("{key}:{primary}")),
            }
        }

        if parts.is_empty() {
            return Ok(());
        }
        let encoded = parts.join(",");
        let mut item = StyleItem::new();
        if item.set_attr_from_str(&encoded) {
            log::trace!("SheetParser: accepted style '{tag}' => '{encoded}'");
            table.insert(tag, item);
        }
        Ok(())
    }

    /*
     * Reports one offence through the sink and, in strict mode, turns it
     * into the parse failure. Lenient callers fall through and drop the
     * offending fragment.
     */
    fn reject(&self, error: ParseError) -> Result<()> {
        let severity = match &error {
            ParseError::UnknownAttribute { .. } | ParseError::InvalidValue { .. } => {
                DiagnosticSeverity::Warning
            }
            _ => DiagnosticSeverity::Error,
        };
        self.sink.report(severity, &error.to_string());
        match self.mode {
            ParseMode::Strict => Err(error),
            ParseMode::Lenient => Ok(()),
        }
    }
}

fn valid_tag(tag: &str) -> bool {
    tag.chars().next().is_some_and(|c| c.is_alphabetic())
}

/* Shape check only: '#' plus six alphanumerics, not strict hex. */
fn is_color_shape(value: &str) -> bool {
    let mut chars = value.chars();
    chars.next() == Some('#') && value.len() == 7 && chars.all(|c| c.is_ascii_alphanumeric())
}

fn is_placeholder(value: &str) -> bool {
    let Some(inner) = value.strip_prefix("%(") else {
        return false;
    };
    let Some((ident, conv)) = inner.split_once(')') else {
        return false;
    };
    !ident.is_empty()
        && ident.chars().all(|c| c.is_ascii_alphanumeric())
        && (conv.is_empty() || (conv.len() == 1 && conv.chars().all(|c| c.is_ascii_alphabetic())))
}

fn is_bare_literal(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}
