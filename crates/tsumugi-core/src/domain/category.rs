//! Category entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::CategoryId;

/// Color indicator shown next to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    #[default]
    Gray,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl Indicator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::Gray => "gray",
            Indicator::Red => "red",
            Indicator::Orange => "orange",
            Indicator::Yellow => "yellow",
            Indicator::Green => "green",
            Indicator::Blue => "blue",
            Indicator::Purple => "purple",
        }
    }
}

/// A category with three independent orderings.
///
/// - `order_number` positions the category among non-archived ones.
/// - `favorite_order_number` positions it among favorites; `None` = not
///   a favorite.
/// - `archived_at` non-`None` = archived; archived categories are ordered
///   by this timestamp alone.
///
/// Invariant: a category is active or archived depending solely on
/// `archived_at`. Archiving clears both order fields, so an archived
/// category is never a favorite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub indicator: Indicator,
    pub order_number: Option<i64>,
    pub favorite_order_number: Option<i64>,
    pub archived_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Create an active, non-favorite category at the given position.
    pub fn new(id: CategoryId, title: impl Into<String>, indicator: Indicator, order: i64) -> Self {
        Self {
            id,
            title: title.into(),
            indicator,
            order_number: Some(order),
            favorite_order_number: None,
            archived_at: None,
        }
    }

    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite_order_number.is_some()
    }

    /// Archive: ordered by recency from now on, so both order fields go.
    pub fn archive(&mut self, at: DateTime<Utc>) {
        self.archived_at = Some(at);
        self.order_number = None;
        self.favorite_order_number = None;
    }

    /// Unarchive: re-enters the active list at the given (bottom) position,
    /// never at a remembered prior one.
    pub fn unarchive(&mut self, order: i64) {
        self.archived_at = None;
        self.order_number = Some(order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ulid::Ulid;

    fn category(order: i64) -> Category {
        Category::new(CategoryId::from_ulid(Ulid::new()), "Work", Indicator::Blue, order)
    }

    #[test]
    fn new_category_is_active_and_not_favorite() {
        let cat = category(1);
        assert!(!cat.is_archived());
        assert!(!cat.is_favorite());
        assert_eq!(cat.order_number, Some(1));
        assert_eq!(cat.favorite_order_number, None);
        assert_eq!(cat.archived_at, None);
    }

    #[test]
    fn archive_clears_both_order_fields() {
        let mut cat = category(2);
        cat.favorite_order_number = Some(3);

        let at = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        cat.archive(at);

        assert!(cat.is_archived());
        assert_eq!(cat.order_number, None);
        assert_eq!(cat.favorite_order_number, None);
        assert_eq!(cat.archived_at, Some(at));
    }

    #[test]
    fn unarchive_reenters_at_given_position() {
        let mut cat = category(2);
        cat.archive(Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap());
        cat.unarchive(7);

        assert!(!cat.is_archived());
        assert_eq!(cat.order_number, Some(7));
        // Favorite status is not restored.
        assert!(!cat.is_favorite());
    }

    #[test]
    fn indicator_serializes_lowercase() {
        let json = serde_json::to_string(&Indicator::Blue).unwrap();
        assert_eq!(json, "\"blue\"");
    }
}
