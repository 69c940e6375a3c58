//! Path helpers with Go import-path semantics, and text utilities.
//!
//! Import paths and generated file names are slash-separated regardless of
//! host platform, so these operate on `&str` rather than `std::path`.

/// Last element of a slash-separated path (e.g. "github.com/pkg/errors" -> "errors").
///
/// Trailing slashes are ignored. An empty path yields ".".
pub fn base_name(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Extension of the final path element, including the dot (e.g. "api/svc.proto" -> ".proto").
pub fn extension(path: &str) -> &str {
    for (idx, c) in path.char_indices().rev() {
        match c {
            '/' => break,
            '.' => return &path[idx..],
            _ => {}
        }
    }
    ""
}

/// Strip the extension of the final path element (e.g. "api/svc.proto" -> "api/svc").
pub fn strip_extension(path: &str) -> &str {
    let ext = extension(path);
    &path[..path.len() - ext.len()]
}

/// Lexically clean a slash-separated path.
///
/// Collapses repeated separators, removes `.` elements and resolves `..`
/// against preceding elements. An empty result becomes ".".
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Join path elements with `/` and clean the result. Empty elements are ignored;
/// joining only empty elements yields an empty string.
pub fn join_path<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let joined = parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    if joined.is_empty() {
        joined
    } else {
        clean_path(&joined)
    }
}

/// Prefix each line with its 0-based line number (e.g. "0: package api").
pub fn annotate_source(source: &str) -> String {
    source
        .split('\n')
        .enumerate()
        .map(|(pos, line)| format!("{}: {}", pos, line))
        .collect::<Vec<_>>()
        .join("\n")
}
