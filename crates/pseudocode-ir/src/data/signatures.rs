// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Typed signature table
//!
//! Externally supplied knowledge about procedures, keyed by source name:
//!
//! ```json
//! { "sample": { "return": "int", "arguments": [{ "name": "a", "type": "int" }] } }
//! ```

use crate::data::types::Type;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentSignature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: Type,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(rename = "return", default)]
    pub return_type: Type,
    #[serde(default)]
    pub arguments: Vec<ArgumentSignature>,
}

impl Signature {
    pub fn new(return_type: Type) -> Self {
        Self {
            return_type,
            arguments: vec![],
        }
    }

    pub fn with_argument(mut self, name: Option<&str>, ty: Type) -> Self {
        self.arguments.push(ArgumentSignature {
            name: name.map(str::to_string),
            ty,
        });
        self
    }

    /// Type of the parameter `name` declared at `position`.
    /// Named entries are matched by name; unnamed entries by position.
    pub fn argument_type(&self, name: &str, position: usize) -> Option<Type> {
        self.arguments
            .iter()
            .find(|argument| argument.name.as_deref() == Some(name))
            .or_else(|| {
                self.arguments
                    .get(position)
                    .filter(|argument| argument.name.is_none())
            })
            .map(|argument| argument.ty.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureTable {
    entries: IndexMap<String, Signature>,
}

impl SignatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn with(mut self, name: impl Into<String>, signature: Signature) -> Self {
        self.insert(name, signature);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, signature: Signature) {
        self.entries.insert(name.into(), signature);
    }

    pub fn get(&self, name: &str) -> Option<&Signature> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
