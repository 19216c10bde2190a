// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Variable type store
//!
//! Single source of truth for the currently known type of every variable.
//! Types only ever move up the lattice: a constrained variable keeps its
//! concrete type for the rest of the translation.

use crate::data::declarations::VariableId;
use crate::data::types::Type;
use std::collections::BTreeMap;

#[derive(Default, Debug, Clone)]
pub struct VariableRegistry {
    types: BTreeMap<VariableId, Type>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Register a variable with its initial type
    pub fn register(&mut self, variable: VariableId, ty: Type) {
        self.types.insert(variable, ty);
    }

    /// Known type of a variable, `Unknown` if never registered
    pub fn get_type(&self, variable: VariableId) -> Type {
        self.types.get(&variable).cloned().unwrap_or_default()
    }

    /// Unify `ty` into the stored type.
    /// On conflict the store is left untouched and the existing type is returned.
    pub fn constrain(&mut self, variable: VariableId, ty: &Type) -> Result<Type, Type> {
        let current = self.get_type(variable);
        let unified = current.unify(ty).ok_or(current)?;
        self.types.insert(variable, unified.clone());
        Ok(unified)
    }
}
