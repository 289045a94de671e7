//! Path classification helpers
//!
//! Pure functions over slash-delimited JSON Pointer paths as produced by the
//! diff. They recognize the structural positions the classifier cares about
//! (`required` lists, `anyOf` entries, `minItems` bounds, documentation
//! keys) and never fail: missing segments come back as the empty string.

/// The second-to-last path segment (the container name), or `""` when the
/// path has fewer than two segments.
pub(crate) fn parent_segment(path: &str) -> &str {
    let mut segments = path.rsplit('/');
    segments.next();
    segments.next().unwrap_or("")
}

/// The final path segment (the leaf key or array index).
pub(crate) fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}

/// Path addresses a `minItems` bound.
pub(crate) fn is_min_items(path: &str) -> bool {
    last_segment(path) == "minItems"
}

/// Path addresses an entry of an `anyOf` list: trailing `anyOf/<index>`.
pub(crate) fn is_any_of_entry(path: &str) -> bool {
    parent_segment(path) == "anyOf" && is_index(last_segment(path))
}

/// Path addresses an entry of an `enum` list: trailing `enum/<index>`.
pub(crate) fn is_enum_entry(path: &str) -> bool {
    parent_segment(path) == "enum" && is_index(last_segment(path))
}

/// True when the node sits anywhere inside an `anyOf` list, not just when
/// it is a direct entry. Replacements produced by reordering alternatives
/// often land below the entry itself (for example on its `$ref`).
pub(crate) fn within_any_of(path: &str) -> bool {
    let segments: Vec<&str> = path.split('/').collect();
    segments
        .windows(2)
        .any(|pair| pair[0] == "anyOf" && is_index(pair[1]))
}

/// Path addresses non-semantic metadata: a `description` leaf, an example
/// key, or an entry of an example list.
pub(crate) fn is_doc_only(path: &str) -> bool {
    let leaf = last_segment(path);
    matches!(leaf, "description" | "examples" | "example")
        || matches!(parent_segment(path), "examples" | "example")
}

fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}
