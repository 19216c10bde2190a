// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

pub mod declarations;
pub mod expressions;
pub mod naming;
pub mod signatures;
pub mod statements;
pub mod types;
pub mod variables;
