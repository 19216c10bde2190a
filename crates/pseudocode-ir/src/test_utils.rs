// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Builders for syntax trees in unit tests

use crate::data::naming::SequentialIds;
use crate::syntax::{Mod, Stmt};
use crate::translation::symbols::SymbolTable;
use serde_json::{json, Value};

pub fn module(body: Vec<Value>) -> Mod {
    Mod::from_value(json!({ "_type": "Module", "body": body })).unwrap()
}

pub fn statements(body: Vec<Value>) -> Vec<Stmt> {
    serde_json::from_value(Value::Array(body)).unwrap()
}

pub fn symbols() -> SymbolTable {
    SymbolTable::new(Box::new(SequentialIds::new()))
}

pub fn name(id: &str) -> Value {
    json!({ "_type": "Name", "id": id, "ctx": { "_type": "Load" } })
}

pub fn store(id: &str) -> Value {
    json!({ "_type": "Name", "id": id, "ctx": { "_type": "Store" } })
}

pub fn constant(value: Value) -> Value {
    json!({ "_type": "Constant", "value": value })
}

pub fn int(value: i64) -> Value {
    constant(json!(value))
}

pub fn tuple(elements: Vec<Value>) -> Value {
    json!({ "_type": "Tuple", "elts": elements })
}

pub fn binop(left: Value, op: &str, right: Value) -> Value {
    json!({ "_type": "BinOp", "left": left, "op": { "_type": op }, "right": right })
}

pub fn compare(left: Value, op: &str, right: Value) -> Value {
    json!({ "_type": "Compare", "left": left, "ops": [{ "_type": op }], "comparators": [right] })
}

pub fn call(func: &str, args: Vec<Value>) -> Value {
    json!({ "_type": "Call", "func": name(func), "args": args, "keywords": [] })
}

pub fn subscript(base: &str, index: Value) -> Value {
    json!({ "_type": "Subscript", "value": name(base), "slice": index })
}

pub fn assign(target: Value, value: Value) -> Value {
    json!({ "_type": "Assign", "targets": [target], "value": value })
}

pub fn expr(value: Value) -> Value {
    json!({ "_type": "Expr", "value": value })
}

pub fn ret(value: Value) -> Value {
    json!({ "_type": "Return", "value": value })
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

pub fn for_range(target: &str, bounds: Vec<Value>, body: Vec<Value>) -> Value {
    json!({ "_type": "For", "target": store(target), "iter": call("range", bounds), "body": body, "orelse": [] })
}
