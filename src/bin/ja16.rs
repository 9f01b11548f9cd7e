// -*- mode: rust; bidi-display-reordering: nil -*-

use std::io::{self, Read, Write};
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use ja16::{Coverage, MappingTable, Separators, TableConfig};

/// Convert text to and from the Ja16 16-bit character set.
///
/// Input is read from standard input; results go to standard output.
#[derive(Debug, Parser)]
#[command(name = "ja16", about, version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use the gap-free table in which every code is defined
    #[arg(long, global = true)]
    full: bool,

    /// Order of the separators at codes 0x3E and 0x3F
    #[arg(long, global = true, value_enum)]
    separators: Option<SeparatorArg>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Text to whitespace-separated hex codes
    Encode,
    /// Hex codes to text
    Decode,
    /// Text to safe-alphabet text (two characters per code)
    Visualize,
    /// Safe-alphabet text back to text
    Devisualize,
    /// List every defined code with its character
    Table {
        /// Emit a JSON array instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SeparatorArg {
    /// `-` then `_`
    HyphenFirst,
    /// `_` then `-`
    UnderscoreFirst,
}

impl From<SeparatorArg> for Separators {
    fn from(arg: SeparatorArg) -> Self {
        match arg {
            | SeparatorArg::HyphenFirst => Separators::HyphenUnderscore,
            | SeparatorArg::UnderscoreFirst => Separators::UnderscoreHyphen,
        }
    }
}

#[derive(Serialize)]
struct TableRow {
    ja16_code: String,
    #[serde(rename = "char")]
    character: char,
    unicode_ref: String,
}

impl TableRow {
    fn new(code: u16, character: char) -> Self {
        TableRow {
            ja16_code: format!("0x{:04X}", code),
            character,
            unicode_ref: format!("U+{:04X}", character as u32),
        }
    }
}

fn config(cli: &Cli) -> TableConfig {
    let mut config = if cli.full { TableConfig::full() } else { TableConfig::default() };
    if let Some(separators) = cli.separators {
        config = config.with_separators(separators.into());
    }
    config
}

fn read_stdin() -> Result<String, i32> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input).map_err(|e| {
        eprintln!("error: could not read standard input: {e}");
        1
    })?;
    Ok(input)
}

fn parse_codes(input: &str) -> Result<Vec<u16>, i32> {
    input
        .split_whitespace()
        .map(|word| {
            let digits = word
                .strip_prefix("0x")
                .or_else(|| word.strip_prefix("0X"))
                .unwrap_or(word);
            u16::from_str_radix(digits, 16).map_err(|e| {
                eprintln!("error: {word:?} is not a hex code: {e}");
                1
            })
        })
        .collect()
}

fn report(e: ja16::Error) -> i32 {
    eprintln!("error: {e}");
    1
}

fn dump_table(table: &MappingTable, json: bool) -> Result<(), i32> {
    let mut out = io::BufWriter::new(io::stdout().lock());
    let written = if json {
        let rows: Vec<TableRow> = table.entries().map(|(code, c)| TableRow::new(code, c)).collect();
        serde_json::to_writer_pretty(&mut out, &rows)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(out))
    } else {
        table.entries().try_for_each(|(code, c)| {
            let row = TableRow::new(code, c);
            writeln!(out, "{}\t{}\t{}", row.ja16_code, c.escape_debug(), row.unicode_ref)
        })
    };
    written.and_then(|()| out.flush()).map_err(|e| {
        eprintln!("error: could not write to standard output: {e}");
        1
    })
}

fn run(cli: Cli) -> Result<(), i32> {
    let config = config(&cli);
    let table = MappingTable::build(config).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;
    if let Coverage::Partial { reserved_from } = config.coverage {
        tracing::debug!(reserved_from, defined = table.len(), "using partial ja16 table");
    }

    match cli.command {
        | Commands::Encode => {
            let codes = table.encode(&read_stdin()?).map_err(report)?;
            let hex: Vec<String> = codes.iter().map(|code| format!("{:04X}", code)).collect();
            println!("{}", hex.join(" "));
        }
        | Commands::Decode => {
            let codes = parse_codes(&read_stdin()?)?;
            print!("{}", table.decode(&codes).map_err(report)?);
        }
        | Commands::Visualize => {
            println!("{}", table.visualize_text(&read_stdin()?).map_err(report)?);
        }
        | Commands::Devisualize => {
            // Whitespace is never part of the safe alphabet.
            let input = read_stdin()?;
            print!("{}", table.devisualize_text(input.trim()).map_err(report)?);
        }
        | Commands::Table { json } => dump_table(&table, json)?,
    }
    Ok(())
}

fn main() {
    if let Err(code) = run(Cli::parse()) {
        exit(code);
    }
}
