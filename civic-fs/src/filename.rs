//! Percent-encoding of store keys into file names.

/// Encodes a key so it is safe to use as a file name while staying human-readable.
///
/// Alphanumeric characters, hyphens, underscores, dots, and commas are preserved.
/// All other characters are percent-encoded using their UTF-8 bytes.
pub fn encode_key(key: &str) -> String {
    let mut result = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | ',' => {
                result.push(c);
            }
            _ => {
                let mut buf = [0u8; 4];
                for &byte in c.encode_utf8(&mut buf).as_bytes() {
                    result.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    result
}

/// Decodes a file name produced by [`encode_key`] back to the key.
///
/// Returns `None` if the encoded string is malformed.
pub fn decode_key(encoded: &str) -> Option<String> {
    let mut result = Vec::with_capacity(encoded.len());
    let mut chars = encoded.chars();

    while let Some(c) = chars.next() {
        if c == '%' {
            let hex: String = chars.by_ref().take(2).collect();
            if hex.len() == 2
                && let Ok(byte) = u8::from_str_radix(&hex, 16)
            {
                result.push(byte);
                continue;
            }
            return None;
        }
        let mut buf = [0u8; 4];
        result.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }
    String::from_utf8(result).ok()
}
