use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Indentation used for persisted documents (4 spaces, readable by hand)
const INDENT: &[u8] = b"    ";

/// Serialize data as pretty-printed JSON with a trailing newline
///
/// # Errors
///
/// Returns an error if:
/// - Serialization fails (e.g. a map key is not a string)
pub fn serialize<T: Serialize>(data: &T) -> serde_json::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    data.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Deserialize JSON data
///
/// # Errors
///
/// Returns an error if:
/// - Data is not valid JSON
/// - Data does not match the expected structure
pub fn deserialize<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    serde_json::from_slice(bytes)
}
