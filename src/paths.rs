//! Lexical path normalization
//!
//! Changed-file entries come from git (forward slashes, sometimes a
//! leading `./`), while SonarQube component paths may use either
//! separator style. Both sides are normalized with the same function so
//! set membership is meaningful.

/// Normalize a path string for comparison.
///
/// Trims whitespace, strips a leading `./`, converts `\` to `/`, and
/// resolves `.` and `..` segments lexically (no filesystem access).
/// The empty string normalizes to `.`. Idempotent.
pub fn normalize(path: &str) -> String {
    let trimmed = path.trim();
    let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
    let unified = trimmed.replace('\\', "/");
    let absolute = unified.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    // Leading ".." in a relative path is preserved;
                    // at the root of an absolute path it is dropped.
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let mut out = String::new();
    if absolute {
        out.push('/');
    }
    out.push_str(&parts.join("/"));
    if out.is_empty() {
        ".".to_string()
    } else {
        out
    }
}
