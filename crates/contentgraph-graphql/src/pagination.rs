//! Cursor-based pagination over ordered child lists.
//!
//! A cursor identifies one position in the list by offset and content id.
//! Decoding trusts the offset while the child there still has the id,
//! otherwise the child is looked up by id. This keeps cursors usable when
//! siblings are inserted or removed between requests.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ContentGraphError;

/// Cursor data encoded in the cursor string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorData {
    /// Position of the edge in the full list.
    pub offset: usize,
    /// Content id of the edge's node.
    pub id: i64,
}

impl CursorData {
    pub fn new(offset: usize, id: i64) -> Self {
        Self { offset, id }
    }

    /// Encode cursor data to a base64 string.
    pub fn encode(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(json)
    }

    /// Decode cursor data from a base64 string.
    pub fn decode(cursor: &str) -> Option<Self> {
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(cursor)
            .ok()?;
        let json = String::from_utf8(bytes).ok()?;
        serde_json::from_str(&json).ok()
    }
}

/// Page size policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizing {
    /// Size used when `first` is absent.
    pub default_size: usize,
    /// Upper bound; larger `first` values are clamped.
    pub max_size: usize,
}

impl Default for PageSizing {
    fn default() -> Self {
        Self {
            default_size: 10,
            max_size: 100,
        }
    }
}

/// Paging arguments of a connection field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorArgs {
    pub after: Option<String>,
    pub first: Option<i64>,
}

impl CursorArgs {
    #[must_use]
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn first(mut self, first: i64) -> Self {
        self.first = Some(first);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Edge<T> {
    pub node: T,
    pub cursor: String,
}

/// One page of a list together with its position in the full list.
#[derive(Debug, Clone)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
    pub total_count: usize,
}

impl<T> Connection<T> {
    /// A connection over an empty list.
    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo::default(),
            total_count: 0,
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }
}

/// Selects the page of `items` described by `args`.
///
/// `id_of` yields the content id stored in each cursor.
///
/// # Errors
///
/// Returns [`ContentGraphError::InvalidArgument`] for a negative `first`
/// and [`ContentGraphError::InvalidCursor`] for an `after` cursor that does
/// not decode or names a child no longer in the list.
pub fn paginate<T, F>(
    items: Vec<T>,
    args: &CursorArgs,
    sizing: PageSizing,
    id_of: F,
) -> Result<Connection<T>, ContentGraphError>
where
    F: Fn(&T) -> i64,
{
    let page_size = match args.first {
        Some(first) if first < 0 => {
            return Err(ContentGraphError::InvalidArgument(format!(
                "'first' must not be negative, got {first}"
            )));
        }
        Some(first) => usize::try_from(first)
            .unwrap_or(usize::MAX)
            .min(sizing.max_size),
        None => sizing.default_size.min(sizing.max_size),
    };

    let start = match &args.after {
        Some(cursor) => position_after(&items, cursor, &id_of)?,
        None => 0,
    };

    let total_count = items.len();
    let end = start.saturating_add(page_size).min(total_count);

    let edges: Vec<Edge<T>> = items
        .into_iter()
        .enumerate()
        .skip(start)
        .take(end - start)
        .map(|(offset, node)| {
            let cursor = CursorData::new(offset, id_of(&node)).encode();
            Edge { node, cursor }
        })
        .collect();

    let page_info = PageInfo {
        has_next_page: end < total_count,
        has_previous_page: start > 0,
        start_cursor: edges.first().map(|edge| edge.cursor.clone()),
        end_cursor: edges.last().map(|edge| edge.cursor.clone()),
    };

    Ok(Connection {
        edges,
        page_info,
        total_count,
    })
}

/// Index of the first item after the one `cursor` points at.
fn position_after<T, F>(items: &[T], cursor: &str, id_of: &F) -> Result<usize, ContentGraphError>
where
    F: Fn(&T) -> i64,
{
    let data =
        CursorData::decode(cursor).ok_or_else(|| ContentGraphError::InvalidCursor(cursor.to_string()))?;

    if items.get(data.offset).is_some_and(|item| id_of(item) == data.id) {
        return Ok(data.offset + 1);
    }

    items
        .iter()
        .position(|item| id_of(item) == data.id)
        .map(|idx| idx + 1)
        .ok_or_else(|| ContentGraphError::InvalidCursor(cursor.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(count: i64) -> Vec<i64> {
        (1..=count).map(|i| i * 100).collect()
    }

    fn page(items: Vec<i64>, args: &CursorArgs) -> Connection<i64> {
        paginate(items, args, PageSizing::default(), |id| *id).unwrap()
    }

    #[test]
    fn test_cursor_encode_decode() {
        let cursor = CursorData::new(10, 4200);
        let decoded = CursorData::decode(&cursor.encode()).expect("Should decode");
        assert_eq!(decoded, cursor);
    }

    #[test]
    fn test_cursor_decode_invalid() {
        assert!(CursorData::decode("not-valid-base64!!!").is_none());
        assert!(CursorData::decode("").is_none());
        // valid base64, not cursor JSON
        assert!(CursorData::decode("aGVsbG8").is_none());
    }

    #[test]
    fn test_walks_twenty_five_items_in_pages_of_ten() {
        let first = page(ids(25), &CursorArgs::default());
        assert_eq!(first.edges.len(), 10);
        assert_eq!(first.total_count, 25);
        assert!(first.page_info.has_next_page);
        assert!(!first.page_info.has_previous_page);

        let after = first.page_info.end_cursor.clone().unwrap();
        let second = page(ids(25), &CursorArgs::default().after(after));
        assert_eq!(second.nodes().copied().collect::<Vec<_>>().first(), Some(&1100));
        assert_eq!(second.edges.len(), 10);
        assert!(second.page_info.has_next_page);
        assert!(second.page_info.has_previous_page);

        let after = second.page_info.end_cursor.clone().unwrap();
        let third = page(ids(25), &CursorArgs::default().after(after));
        assert_eq!(third.edges.len(), 5);
        assert!(!third.page_info.has_next_page);
        assert!(third.page_info.has_previous_page);
        assert_eq!(third.nodes().last(), Some(&2500));
    }

    #[test]
    fn test_first_is_clamped_to_max() {
        let sizing = PageSizing {
            default_size: 10,
            max_size: 20,
        };
        let conn = paginate(ids(50), &CursorArgs::default().first(500), sizing, |id| *id).unwrap();
        assert_eq!(conn.edges.len(), 20);
    }

    #[test]
    fn test_first_zero_returns_empty_page() {
        let conn = page(ids(3), &CursorArgs::default().first(0));
        assert!(conn.edges.is_empty());
        assert_eq!(conn.total_count, 3);
        assert!(conn.page_info.has_next_page);
        assert!(conn.page_info.start_cursor.is_none());
    }

    #[test]
    fn test_negative_first_is_rejected() {
        let err = paginate(ids(3), &CursorArgs::default().first(-1), PageSizing::default(), |id| *id)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_garbled_cursor_is_rejected() {
        let err = paginate(ids(3), &CursorArgs::default().after("%%%"), PageSizing::default(), |id| *id)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CURSOR");
    }

    #[test]
    fn test_cursor_survives_sibling_insert() {
        let first = page(ids(5), &CursorArgs::default().first(2));
        let after = first.page_info.end_cursor.clone().unwrap();

        // a new sibling appears before the cursor position
        let mut shifted = ids(5);
        shifted.insert(0, 50);
        let next = page(shifted, &CursorArgs::default().after(after).first(2));
        assert_eq!(next.nodes().copied().collect::<Vec<_>>(), vec![300, 400]);
    }

    #[test]
    fn test_cursor_for_removed_child_is_rejected() {
        let first = page(ids(5), &CursorArgs::default().first(2));
        let after = first.page_info.end_cursor.clone().unwrap();

        let remaining: Vec<i64> = ids(5).into_iter().filter(|id| *id != 200).collect();
        let err = paginate(remaining, &CursorArgs::default().after(after), PageSizing::default(), |id| *id)
            .unwrap_err();
        assert!(matches!(err, ContentGraphError::InvalidCursor(_)));
    }

    #[test]
    fn test_empty_list() {
        let conn = page(Vec::new(), &CursorArgs::default());
        assert_eq!(conn.total_count, 0);
        assert_eq!(conn.page_info, PageInfo::default());
    }
}
