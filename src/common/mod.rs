pub mod body;

/// Ids arrive as path segments; anything that is not an integer simply
/// does not resolve to a record.
pub fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}
