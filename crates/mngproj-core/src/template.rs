//! Script templates in Go `text/template` syntax, rendered with `gtmpl`.
//!
//! Scripts containing `{{` are rendered against a record with two fields,
//! `.Args` (positional arguments) and `.Env` (the materialized environment).
//! A missing `.Env` key renders as `<no value>`.

use gtmpl::Value;
use std::collections::{BTreeMap, HashMap};

use crate::{Error, Result};

/// The `{.Args, .Env}` record a script template is rendered against
pub fn script_context(args: &[String], env: &BTreeMap<String, String>) -> Value {
    let args = args.iter().cloned().map(Value::String).collect();
    let env: HashMap<String, Value> = env
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();

    let mut record = HashMap::new();
    record.insert("Args".to_string(), Value::Array(args));
    record.insert("Env".to_string(), Value::Map(env));
    Value::Object(record)
}

/// Render `src` for `component`.
pub fn render(
    component: &str,
    src: &str,
    args: &[String],
    env: &BTreeMap<String, String>,
) -> Result<String> {
    gtmpl::template(src, script_context(args, env)).map_err(|e| Error::TemplateError {
        component: component.to_string(),
        reason: e.to_string(),
    })
}
