mod logging;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use symtab::check;
use symtab::lexer::{token::Token, LexerError};
use symtab::parser::ParseError;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path of the declaration listing to check
    file: PathBuf,

    /// Print every declared symbol with its type and reference count
    #[arg(long, short)]
    summary: bool,

    /// Log filter directives (overrides SYMTAB_LOG), e.g. `debug` or `symtab=trace`
    #[arg(long)]
    log: Option<String>,
}

fn report(text: &str, token: &Token, message: &str) {
    let line_start = text[..token.span.0].rfind('\n').map_or(0, |i| i + 1);
    let column = token.span.0 - line_start + 1;

    eprintln!(
        "{}",
        format!(
            "Error {}:{} (at {:?}):: {}",
            token.line,
            column,
            &text[token.span.0..token.span.1],
            message
        )
        .red()
    );
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::register_global_logger(cli.log.as_deref())?;

    let text = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    let check_report = match check(&text) {
        Ok(check_report) => check_report,
        Err(err) => {
            let (token, err_msg) = err
                .downcast::<LexerError>()
                .map(|le| (le.token, le.error.to_string()))
                .or_else(|err| {
                    err.downcast::<ParseError>()
                        .map(|pe| (pe.token, pe.error.to_string()))
                })?;

            report(&text, &token, &err_msg);
            std::process::exit(1);
        }
    };

    for diagnostic in &check_report.diagnostics {
        report(&text, &diagnostic.token, &diagnostic.kind.to_string());
    }

    if cli.summary {
        for (name, usage) in &check_report.symbols {
            let ty = check_report
                .table
                .type_info(name)
                .map(|info| info.ty)
                .unwrap_or_default();
            println!("{}: {} ({} uses)", name.bold(), ty, usage.uses);
        }
    }

    if !check_report.is_ok() {
        std::process::exit(1);
    }

    Ok(())
}
