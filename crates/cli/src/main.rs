use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use folio_core::compile::compile_with_config;
use folio_core::model::{BookModel, CompileInput};
use folio_core::store::Store;
use folio_core::CompileConfig;

#[derive(Parser)]
#[command(name = "folio", about = "Compile HTML + CSS into a page model for book viewers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile an {"html", "css"} JSON document
    Compile {
        /// The input JSON file (use - for stdin)
        input: String,

        /// TOML file overriding page size, colors and placeholder image
        #[arg(long)]
        config: Option<PathBuf>,

        /// Persist the model here, bumping its version, and print the stored model
        #[arg(long)]
        out: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Compile a separate HTML file and stylesheet
    Parse {
        /// The HTML file to compile (use - for stdin)
        #[arg(long)]
        html: String,

        /// The stylesheet to apply
        #[arg(long)]
        css: PathBuf,

        /// TOML file overriding page size, colors and placeholder image
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List the catalog entry for a stored model
    Books {
        /// The stored model JSON file
        store: PathBuf,

        /// TOML file overriding the placeholder image
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> folio_core::Result<()> {
    match command {
        Commands::Compile {
            input,
            config,
            out,
            pretty,
        } => {
            let config = load_config(config)?;
            let input = CompileInput::from_json_str(&read_source(&input)?)?;
            let model = compile_with_config(&input.html, &input.css, &config)?;
            let model = match out {
                Some(path) => Store::new(path).save(model)?,
                None => model,
            };
            print_model(&model, pretty)
        }
        Commands::Parse {
            html,
            css,
            config,
            pretty,
        } => {
            let config = load_config(config)?;
            let html = read_source(&html)?;
            let css = std::fs::read_to_string(&css)?;
            let model = compile_with_config(&html, &css, &config)?;
            print_model(&model, pretty)
        }
        Commands::Books { store, config } => {
            let config = load_config(config)?;
            let books = Store::new(store).catalog(&config)?;
            println!("{}", serde_json::to_string_pretty(&books)?);
            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>) -> folio_core::Result<CompileConfig> {
    match path {
        Some(path) => {
            log::debug!("loading config from {}", path.display());
            CompileConfig::load(path)
        }
        None => Ok(CompileConfig::default()),
    }
}

fn read_source(file: &str) -> folio_core::Result<String> {
    if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(file)?)
    }
}

fn print_model(model: &BookModel, pretty: bool) -> folio_core::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(model)?
    } else {
        serde_json::to_string(model)?
    };
    println!("{}", json);
    Ok(())
}
