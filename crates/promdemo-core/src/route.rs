//! Route label normalization.
//!
//! Raw request paths carry numeric ids, UUIDs and 24-char object ids that would
//! explode metric cardinality if used as labels. `normalize_route` rebuilds the
//! path segment by segment and collapses those into fixed placeholders:
//!
//! - all-digit segment -> `:id`
//! - 8-4-4-4-12 lowercase hex UUID -> `:uuid`
//! - 24 lowercase hex chars -> `:objectid`
//!
//! The digit check runs first. Empty segments (`//`, trailing `/`) are kept as-is.

pub const ID_PLACEHOLDER: &str = ":id";
pub const UUID_PLACEHOLDER: &str = ":uuid";
pub const OBJECT_ID_PLACEHOLDER: &str = ":objectid";

const UUID_GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

/// Map a raw path (no query string) to a bounded-cardinality route label.
pub fn normalize_route(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for (i, seg) in path.split('/').enumerate() {
        if i > 0 {
            out.push('/');
        }
        out.push_str(normalize_segment(seg));
    }
    out
}

fn normalize_segment(seg: &str) -> &str {
    if is_all_digits(seg) {
        ID_PLACEHOLDER
    } else if is_uuid(seg) {
        UUID_PLACEHOLDER
    } else if is_object_id(seg) {
        OBJECT_ID_PLACEHOLDER
    } else {
        seg
    }
}

fn is_all_digits(seg: &str) -> bool {
    !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_digit())
}

fn is_lower_hex(b: u8) -> bool {
    b.is_ascii_digit() || (b'a'..=b'f').contains(&b)
}

fn is_uuid(seg: &str) -> bool {
    if seg.len() != 36 {
        return false;
    }
    let mut groups = seg.split('-');
    for want in UUID_GROUPS {
        match groups.next() {
            Some(g) if g.len() == want && g.bytes().all(is_lower_hex) => {}
            _ => return false,
        }
    }
    groups.next().is_none()
}

fn is_object_id(seg: &str) -> bool {
    seg.len() == 24 && seg.bytes().all(is_lower_hex)
}

/// Status-code class label: leading digit plus `xx` (`404` -> `"4xx"`).
pub fn status_class(code: u16) -> String {
    format!("{}xx", code / 100)
}
