use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tabarc::{ArchiveArgs, ArchiveFormat, DelimitedParser, FragmentParser, JsonParser};

#[derive(Clone, Debug, Parser)]
#[command(name = "tabarc", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// Archive to read
    pub input: PathBuf,

    /// Entry path or `*` wildcard pattern
    #[arg(long, short)]
    pub path: Option<String>,

    /// Deepest directory level to include, 0 for top-level entries only
    #[arg(long, short)]
    pub depth: Option<usize>,

    /// Archive format, instead of guessing from the file name
    #[arg(long, short)]
    pub format: Option<ArchiveFormat>,

    /// How each matched entry is decoded
    #[arg(long, value_enum, default_value_t = ParserKind::Csv)]
    pub parser: ParserKind,

    /// Field delimiter for csv and tsv
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Treat the first record as data rather than column names
    #[arg(long)]
    pub no_header: bool,

    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Log progress to stderr
    #[arg(long, short, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ParserKind {
    Csv,
    Tsv,
    Json,
}

impl App {
    pub fn archive_args(&self) -> ArchiveArgs {
        ArchiveArgs {
            pattern: self.path.clone(),
            depth:   self.depth,
            format:  self.format,
        }
    }

    pub fn fragment_parser(&self) -> Box<dyn FragmentParser> {
        let delimited = match self.parser {
            ParserKind::Json => return Box::new(JsonParser),
            ParserKind::Csv => DelimitedParser::csv(),
            ParserKind::Tsv => DelimitedParser::tsv(),
        };
        let delimited = match self.delimiter {
            Some(delimiter) => delimited.delimiter(delimiter),
            None => delimited,
        };
        Box::new(delimited.header(!self.no_header))
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
