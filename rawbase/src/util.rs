//! Introspection helpers
//!
//! Index checks, value coercions and human-readable dumps of JSON-shaped
//! values. The dump formats follow the classic `print_r` / `var_dump` layouts
//! so they read familiar to anyone debugging a component from the web side.

use serde_json::Value;
use std::fmt::Write;

/// Check whether `index` is a valid position in `value`
///
/// Only arrays and strings have positions; string length is its byte length.
/// Every other kind of value returns false.
pub fn valid_index(index: i64, value: &Value) -> bool {
    let len = match value {
        Value::Array(items) => items.len(),
        Value::String(text) => text.len(),
        _ => return false,
    };

    index >= 0 && (index as u64) < len as u64
}

/// Loose truthiness of a JSON value
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(false, |n| n != 0.0),
        Value::String(text) => !(text.is_empty() || text == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Coerce a configuration value into a non-negative identifier
///
/// Numbers truncate toward zero, negative values clamp to 0 and values past
/// `u64::MAX` saturate. Strings use their leading numeric part, sign, decimals
/// and exponent included (`" 12abc"` is 12, `"1e3"` is 1000). `true` is 1.
/// Anything else is 0.
pub fn coerce_id(value: &Value) -> u64 {
    match value {
        Value::Number(number) => match number.as_u64() {
            Some(n) => n,
            None => number.as_f64().map_or(0, clamp_id),
        },
        Value::String(text) => leading_number(text),
        Value::Bool(true) => 1,
        _ => 0,
    }
}

fn clamp_id(n: f64) -> u64 {
    // `as` truncates and saturates; NaN fails the comparison
    if n > 0.0 {
        n as u64
    } else {
        0
    }
}

/// Leading `[+-]digits[.digits][e[+-]digits]` of `text`, as an identifier
fn leading_number(text: &str) -> u64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_at = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer = digits_at(end);
    end += integer;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_at(end + 1);
        if integer + fraction > 0 {
            end += 1 + fraction;
        }
    }
    if integer + fraction == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut start = end + 1;
        if matches!(bytes.get(start), Some(b'+' | b'-')) {
            start += 1;
        }
        let exponent = digits_at(start);
        if exponent > 0 {
            end = start + exponent;
        }
    }

    let number = &text[..end];
    match number.strip_prefix('+').unwrap_or(number).parse::<u64>() {
        Ok(n) => n,
        Err(_) => number.parse::<f64>().map_or(0, clamp_id),
    }
}

/// Render a value in `print_r` layout
pub fn array_dump(value: &Value) -> String {
    let mut out = String::new();
    write_print_r(&mut out, value, 0);
    out
}

/// Render a value in `var_dump` layout, with types and lengths
pub fn object_dump(value: &Value) -> String {
    let mut out = String::new();
    write_var_dump(&mut out, value, 0);
    out
}

fn write_print_r(out: &mut String, value: &Value, indent: usize) {
    let entries: Vec<(String, &Value)> = match value {
        Value::Null | Value::Bool(false) => return,
        Value::Bool(true) => {
            out.push('1');
            return;
        }
        Value::Number(number) => {
            let _ = write!(out, "{}", number);
            return;
        }
        Value::String(text) => {
            out.push_str(text);
            return;
        }
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| (i.to_string(), item))
            .collect(),
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
    };

    let pad = " ".repeat(indent);
    out.push_str("Array\n");
    let _ = writeln!(out, "{}(", pad);
    for (key, item) in entries {
        let _ = write!(out, "{}    [{}] => ", pad, key);
        write_print_r(out, item, indent + 8);
        out.push('\n');
    }
    let _ = writeln!(out, "{})", pad);
}

fn write_var_dump(out: &mut String, value: &Value, indent: usize) {
    let pad = " ".repeat(indent);
    match value {
        Value::Null => {
            let _ = writeln!(out, "{}NULL", pad);
        }
        Value::Bool(flag) => {
            let _ = writeln!(out, "{}bool({})", pad, flag);
        }
        Value::Number(number) => {
            if number.is_i64() || number.is_u64() {
                let _ = writeln!(out, "{}int({})", pad, number);
            } else {
                let _ = writeln!(out, "{}float({})", pad, number.as_f64().unwrap_or(f64::NAN));
            }
        }
        Value::String(text) => {
            let _ = writeln!(out, "{}string({}) \"{}\"", pad, text.len(), text);
        }
        Value::Array(items) => {
            let _ = writeln!(out, "{}array({}) {{", pad, items.len());
            for (i, item) in items.iter().enumerate() {
                let _ = writeln!(out, "{}  [{}]=>", pad, i);
                write_var_dump(out, item, indent + 2);
            }
            let _ = writeln!(out, "{}}}", pad);
        }
        Value::Object(map) => {
            let _ = writeln!(out, "{}array({}) {{", pad, map.len());
            for (key, item) in map {
                let _ = writeln!(out, "{}  [\"{}\"]=>", pad, key);
                write_var_dump(out, item, indent + 2);
            }
            let _ = writeln!(out, "{}}}", pad);
        }
    }
}
