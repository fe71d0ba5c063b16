use std::io::{self, BufRead};

/// Header key of the template entry in a MODELLER PIR alignment.
pub const TEMPLATE_KEY: &str = "structure";
/// Header key of the target (model) entry.
pub const MODEL_KEY: &str = "sequence";

/// Returns the second `:`-separated field of the first line containing
/// `key`, trimmed. `None` when no line matches or the field is empty.
pub fn find_entry_name(reader: &mut impl BufRead, key: &str) -> io::Result<Option<String>> {
    for line_res in reader.lines() {
        let line = line_res?;
        if !line.contains(key) {
            continue;
        }
        let name = line
            .split(':')
            .nth(1)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        return Ok(name);
    }
    Ok(None)
}
