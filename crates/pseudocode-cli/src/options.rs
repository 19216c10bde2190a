// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use log::LevelFilter;
use pseudocode_ir::SignatureTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options of a translation run. Read from an optional toml file; command line
/// flags override the values found there.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Verbosity level for logging.
    pub verbosity_level: LevelFilter,
    /// Print the document on a single line.
    pub compact: bool,
    /// Use `id0`, `id1`, ... instead of random uuids.
    pub sequential_ids: bool,
    /// Typed signature file, toml or json.
    pub signatures: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            verbosity_level: LevelFilter::Warn,
            compact: false,
            sequential_ids: false,
            signatures: None,
        }
    }
}

impl Options {
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Read a signature table; `.toml` files are parsed as toml, anything else as json.
pub fn read_signatures(path: &Path) -> Result<SignatureTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read signature file {}", path.display()))?;
    let table = match path.extension().and_then(|extension| extension.to_str()) {
        Some("toml") => toml::from_str(&text).map_err(anyhow::Error::from),
        _ => SignatureTable::from_json(&text).map_err(anyhow::Error::from),
    };
    table.with_context(|| format!("invalid signature file {}", path.display()))
}
