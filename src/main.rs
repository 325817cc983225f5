use std::io::Read;
use std::path::PathBuf;
use std::{fs, io};

use clap::Parser as ClapParser;
use wikimodel::{ParseOptionsBuilder, Parser, WikiNode, WtError};

#[derive(ClapParser, Debug)]
#[command(name = "wikimodel")]
#[command(about = "Parse MediaWiki markup and print the document as JSON")]
struct Args {
    /// Wikitext file to read. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Page title. Inferred from the first bold text when omitted.
    #[arg(long)]
    title: Option<String>,

    /// Wiki host used for image urls.
    #[arg(long)]
    domain: Option<String>,

    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,

    /// Escape `$`-prefixed and dotted keys in the JSON.
    #[arg(long)]
    encode_keys: bool,

    /// Print plain text instead of JSON.
    #[arg(long)]
    plain: bool,
}

fn read_input(path: Option<&PathBuf>) -> Result<String, WtError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            WtError::other_with_source(format!("failed to read {}", path.display()), Some(e))
        }),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| WtError::other_with_source("failed to read stdin", Some(e)))?;
            Ok(buf)
        }
    }
}

fn run(args: &Args) -> Result<String, WtError> {
    let mut builder = ParseOptionsBuilder::default();
    if let Some(title) = &args.title {
        builder.title(title.as_str());
    }
    if let Some(domain) = &args.domain {
        builder.domain(domain.as_str());
    }
    let options = builder.build()?;

    let markup = read_input(args.input.as_ref())?;
    let doc = Parser::new(options).parse(&markup);
    log::info!(
        "parsed '{}': {} sections, {} templates, {} tables",
        doc.title().unwrap_or("<untitled>"),
        doc.sections().len(),
        doc.templates().len(),
        doc.tables().len()
    );

    if args.plain {
        return Ok(doc.plain_text());
    }
    let json = if args.encode_keys {
        doc.to_encoded_json()?
    } else {
        doc.to_json()?
    };
    let out = if args.pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    Ok(out)
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
