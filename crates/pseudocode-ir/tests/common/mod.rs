// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use pseudocode_ir::Mod;
use serde_json::{json, Value};
use std::path::Path;

pub fn module(body: Vec<Value>) -> Mod {
    Mod::from_value(json!({ "_type": "Module", "body": body })).unwrap()
}

pub fn load_module(path: &Path) -> Mod {
    let text = std::fs::read_to_string(path).unwrap();
    Mod::from_json(&text).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

pub fn name(id: &str) -> Value {
    json!({ "_type": "Name", "id": id, "ctx": { "_type": "Load" } })
}

pub fn store(id: &str) -> Value {
    json!({ "_type": "Name", "id": id, "ctx": { "_type": "Store" } })
}

pub fn int(value: i64) -> Value {
    json!({ "_type": "Constant", "value": value })
}

pub fn string(value: &str) -> Value {
    json!({ "_type": "Constant", "value": value })
}

pub fn call(func: &str, args: Vec<Value>) -> Value {
    json!({ "_type": "Call", "func": name(func), "args": args, "keywords": [] })
}

pub fn assign(target: Value, value: Value) -> Value {
    json!({ "_type": "Assign", "targets": [target], "value": value })
}

pub fn function_def(name: &str, parameters: &[&str], body: Vec<Value>) -> Value {
    let args: Vec<Value> = parameters
        .iter()
        .map(|parameter| json!({ "_type": "arg", "arg": parameter }))
        .collect();
    json!({
        "_type": "FunctionDef",
        "name": name,
        "args": { "_type": "arguments", "args": args },
        "body": body,
        "decorator_list": []
    })
}

pub fn ret(value: Value) -> Value {
    json!({ "_type": "Return", "value": value })
}

pub fn expr(value: Value) -> Value {
    json!({ "_type": "Expr", "value": value })
}

/// Replace every uuid-valued field with a placeholder
pub fn strip_ids(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| match key.as_str() {
                    "uuid" | "variable" | "procedure" | "target" if value.is_string() => {
                        (key.clone(), json!("<id>"))
                    }
                    _ => (key.clone(), strip_ids(value)),
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_ids).collect()),
        other => other.clone(),
    }
}

/// Every node publishing a type uses a closed type name and a boolean array flag
pub fn assert_closed_types(value: &Value) {
    const BASES: &[&str] = &["unknown", "void", "boolean", "int", "double", "string", "type"];
    match value {
        Value::Object(map) => {
            if let Some(ty) = map.get("type") {
                let ty = ty.as_str().unwrap();
                assert!(BASES.contains(&ty.trim_end_matches("[]")), "unexpected type {}", ty);
                assert!(map.get("array").map_or(false, Value::is_boolean), "missing array flag");
            }
            map.values().for_each(assert_closed_types);
        }
        Value::Array(items) => items.iter().for_each(assert_closed_types),
        _ => {}
    }
}
