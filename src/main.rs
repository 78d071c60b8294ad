/*
 * Command-line entry point: validates and inspects editor style sheets.
 * A lenient run loads each sheet the way an editor would, merging it over
 * the presentation defaults and recovering from malformed fragments, then
 * prints a summary. `--strict` instead fails on the first syntax offence,
 * which is what sheet authors want from a checker.
 */
mod core;
mod style_manager;

use crate::core::{
    CoreDiagnosticSink, CoreFontProvider, CoreSheetLoader, DiagnosticSinkOperations, ParseMode,
    SheetLoaderOperations, parse_style_sheet,
};
use crate::style_manager::StyleManager;

use serde::Serialize;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

const USAGE: &str = "Usage: syntax_styler [OPTIONS] <SHEET>...

Validates and inspects editor style sheets.

Options:
  --strict    Fail on the first syntax error instead of recovering
  --json      Emit a JSON report per sheet
  --verbose   Enable debug logging
  -h, --help  Print this help text";

/* Safe to call more than once; only the first call installs the logger. */
pub fn initialize_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}

#[derive(Debug)]
enum CliCommand {
    Run(CliOptions),
    Help,
}

#[derive(Debug, Default)]
struct CliOptions {
    strict: bool,
    json: bool,
    verbose: bool,
    sheets: Vec<PathBuf>,
}

impl CliOptions {
    fn parse<I>(args: I) -> Result<CliCommand, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = CliOptions::default();
        for arg in args {
            match arg.as_str() {
                "--strict" => options.strict = true,
                "--json" => options.json = true,
                "--verbose" => options.verbose = true,
                "-h" | "--help" => return Ok(CliCommand::Help),
                other if other.starts_with('-') => {
                    return Err(format!("unknown option '{other}'"));
                }
                sheet => options.sheets.push(PathBuf::from(sheet)),
            }
        }
        if options.sheets.is_empty() {
            return Err("no style sheets given".to_string());
        }
        Ok(CliCommand::Run(options))
    }
}

#[derive(Serialize)]
struct SheetReport {
    sheet: String,
    loaded: bool,
    style_count: usize,
    default_fore: String,
    default_back: String,
    mono_font: Option<String>,
    styles: BTreeMap<String, String>,
}

impl SheetReport {
    fn build(sheet: &Path, loaded: bool, manager: &StyleManager) -> Self {
        let set = manager.style_set();
        let mut styles = BTreeMap::new();
        for tag in set.tags() {
            styles.insert(tag.to_string(), manager.style_by_name(tag));
        }
        SheetReport {
            sheet: sheet.display().to_string(),
            loaded,
            style_count: styles.len(),
            default_fore: manager.default_fore_color(),
            default_back: manager.default_back_color(),
            mono_font: manager.mono_font(),
            styles,
        }
    }
}

fn main() -> ExitCode {
    let command = match CliOptions::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("syntax_styler: {message}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };
    let options = match command {
        CliCommand::Run(options) => options,
        CliCommand::Help => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
    };
    initialize_logging(options.verbose);
    ExitCode::from(run(&options))
}

/* Processes every sheet and keeps the worst exit code. */
fn run(options: &CliOptions) -> u8 {
    let loader = Arc::new(CoreSheetLoader::new());
    let diagnostics = Arc::new(CoreDiagnosticSink::new());
    let font_provider = CoreFontProvider::new();

    let mut worst: u8 = 0;
    for sheet in &options.sheets {
        let code = if options.strict {
            check_sheet_strict(sheet, loader.as_ref(), diagnostics.as_ref())
        } else {
            inspect_sheet(
                sheet,
                &font_provider,
                Arc::clone(&loader),
                Arc::clone(&diagnostics),
                options.json,
            )
        };
        worst = worst.max(code);
    }
    worst
}

/* Exit codes: 0 clean, 1 unreadable sheet, 2 syntax failure. */
fn check_sheet_strict(
    sheet: &Path,
    loader: &dyn SheetLoaderOperations,
    diagnostics: &dyn DiagnosticSinkOperations,
) -> u8 {
    let text = match loader.read_sheet(sheet) {
        Ok(text) => text,
        Err(error) => {
            eprintln!("{}: {error}", sheet.display());
            return 1;
        }
    };
    match parse_style_sheet(&text, ParseMode::Strict, diagnostics) {
        Ok(table) => {
            println!("{}: OK ({} style(s))", sheet.display(), table.len());
            0
        }
        Err(error) => {
            eprintln!("{}: {error}", sheet.display());
            2
        }
    }
}

fn inspect_sheet(
    sheet: &Path,
    font_provider: &CoreFontProvider,
    loader: Arc<CoreSheetLoader>,
    diagnostics: Arc<CoreDiagnosticSink>,
    json: bool,
) -> u8 {
    let mut manager = StyleManager::new(
        font_provider,
        loader as Arc<dyn SheetLoaderOperations>,
        diagnostics as Arc<dyn DiagnosticSinkOperations>,
    );
    let loaded = manager.load_style_sheet(sheet);
    let report = SheetReport::build(sheet, loaded, &manager);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(rendered) => println!("{rendered}"),
            Err(error) => {
                eprintln!("{}: failed to render report: {error}", sheet.display());
                return 1;
            }
        }
    } else if loaded {
        println!(
            "{}: loaded {} style(s), default {} on {}",
            sheet.display(),
            report.style_count,
            report.default_fore,
            report.default_back
        );
    } else {
        println!(
            "{}: load failed, using presentation defaults ({} style(s))",
            sheet.display(),
            report.style_count
        );
    }
    if loaded { 0 } else { 1 }
}
