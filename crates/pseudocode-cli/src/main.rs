// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::*;
use colored::Colorize;
use log::{debug, info, LevelFilter};
use options::{read_signatures, Options};
use pseudocode_ir::{Document, IdSource, Mod, SequentialIds, TranslationPipeline, UuidIds};
use simplelog::{ConfigBuilder, WriteLogger};

mod options;

#[derive(Parser)]
#[clap(
    name = env!("CARGO_BIN_NAME"),
    about = "Translates a Python syntax tree, given as JSON, into a pseudocodejson document printed on stdout",
    rename_all = "kebab-case",
    author,
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Args {
    /// Syntax tree in JSON; `-` reads standard input
    pub input: PathBuf,

    /// Only emit this procedure and the procedures it calls
    #[clap(long = "procedure", short = 'p')]
    pub procedure: Option<String>,

    /// Typed signature file (toml or json)
    #[clap(long = "signatures", short = 's')]
    pub signatures: Option<PathBuf>,

    /// Options file in toml
    #[clap(long = "config", short = 'c', env = "PSEUDOCODE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the document on a single line
    #[clap(long = "compact")]
    pub compact: bool,

    /// Deterministic ids instead of random uuids
    #[clap(long = "sequential-ids")]
    pub sequential_ids: bool,

    /// Display debug logging on stderr
    #[clap(long = "verbose", short = 'v')]
    pub verbose: bool,
}

impl Args {
    /// Config file values, overridden by the flags given on the command line
    fn options(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::from_toml_file(path)?,
            None => Options::default(),
        };
        if self.verbose {
            options.verbosity_level = LevelFilter::Debug;
        }
        options.compact |= self.compact;
        options.sequential_ids |= self.sequential_ids;
        if self.signatures.is_some() {
            options.signatures = self.signatures.clone();
        }
        Ok(options)
    }
}

fn read_tree(path: &Path) -> Result<Mod> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("cannot read standard input")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?
    };
    Mod::from_json(&text).with_context(|| format!("malformed syntax tree in {}", path.display()))
}

fn execute(args: &Args, options: &Options) -> Result<String> {
    let module = read_tree(&args.input)?;

    let ids: Box<dyn IdSource> = if options.sequential_ids {
        Box::new(SequentialIds::new())
    } else {
        Box::new(UuidIds)
    };
    let mut pipeline = TranslationPipeline::from_boxed(ids);
    if let Some(path) = &options.signatures {
        pipeline = pipeline.with_signatures(read_signatures(path)?);
    }

    let translation = pipeline
        .run(&module)
        .with_context(|| format!("cannot translate {}", args.input.display()))?;
    info!(
        "{} called procedure(s), {} captured signature(s)",
        translation.called_procedures.len(),
        translation.captured_signatures.len()
    );

    let document: Document = match &args.procedure {
        Some(name) => translation
            .document
            .isolate(name)
            .ok_or_else(|| anyhow!("no procedure named '{}'", name))?,
        None => translation.document,
    };

    let output = if options.compact {
        serde_json::to_string(&document)?
    } else {
        serde_json::to_string_pretty(&document)?
    };
    Ok(output)
}

fn init_logging(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    if let Err(err) = WriteLogger::init(level, config, std::io::stderr()) {
        eprintln!("cannot install logger: {}", err);
    }
}

fn main() {
    #[cfg(windows)]
    let _ = colored::control::set_virtual_terminal(true);

    let bin_name = env!("CARGO_BIN_NAME");
    let args = Args::parse();

    let result = args.options().and_then(|options| {
        init_logging(options.verbosity_level);
        debug!("{} version {}", bin_name, env!("CARGO_PKG_VERSION"));
        execute(&args, &options)
    });

    match result {
        Ok(output) => println!("{}", output),
        Err(err) => {
            let err = format!("{:#}", err);
            eprintln!("{}", err.bold().red());
            eprintln!("Usage: {} [OPTIONS] <INPUT>", bin_name);
            std::process::exit(1);
        }
    }
}
