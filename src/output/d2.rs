//! D2 text formatting helpers.

/// Quote a value as a D2 string, escaping backslashes and double quotes.
pub fn quote<T: ToString>(value: T) -> String {
    let value_str = value.to_string();
    let escaped = value_str.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Declaration key for a device or interface name.
///
/// Braces are replaced so a key can never unbalance a block.
pub fn key(name: &str) -> String {
    name.replace(['{', '}'], "_")
}

/// A `key: "value"` attribute line at the given nesting depth.
pub fn attribute<T: ToString>(depth: usize, name: &str, value: T) -> String {
    format!("{}{}: {}", indent(depth), name, quote(value))
}

/// Opening line of a `name: {` block at the given nesting depth.
pub fn open_block(depth: usize, name: &str) -> String {
    format!("{}{}: {{", indent(depth), key(name))
}

pub fn close_block(depth: usize) -> String {
    format!("{}}}", indent(depth))
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
