//! The `demo` capability group used by the bundled example menus.

use crate::actions::CapabilityRegistry;
use crate::models::Arguments;
use serde_json::Value;
use tracing::info;

/// Name of the group menu files refer to as `"module": "demo"`.
pub const GROUP: &str = "demo";

/// Registers `demo.hello_world` and `demo.echo_args`.
pub fn register(registry: &mut CapabilityRegistry) {
    registry
        .group(GROUP)
        .register("hello_world", hello_world)
        .register("echo_args", echo_args);
}

/// Greets the user, listing `param1` and `param2` when both are supplied.
pub fn hello_world(args: &Arguments) -> anyhow::Result<Value> {
    info!("demo.hello_world called with {} argument(s)", args.len());
    println!("{}", greeting(args));
    Ok(Value::Null)
}

fn greeting(args: &Arguments) -> String {
    match (param(args, "param1"), param(args, "param2")) {
        (Some(param1), Some(param2)) => format!(
            "Here are the arguments I received:\n\tParam 1: {}\n\tParam 2: {}\n",
            param1, param2
        ),
        _ => "Hello, world! (No params :()".to_string(),
    }
}

/// A parameter counts as supplied only when it is truthy: `null`, `false`, `0`,
/// `""`, `[]` and `{}` all read as missing. Strings print bare, anything else as JSON.
fn param(args: &Arguments, key: &str) -> Option<String> {
    let value = args.get(key).filter(|value| is_truthy(value))?;
    Some(args.get_str(key).map_or_else(|| value.to_string(), str::to_string))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Prints every argument it receives and hands the mapping back.
pub fn echo_args(args: &Arguments) -> anyhow::Result<Value> {
    if args.is_empty() {
        println!("No arguments received.");
    }
    for (key, value) in args.iter() {
        println!("{} = {}", key, value);
    }
    Ok(Value::Object(
        args.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
    ))
}
