//! Order-key math for the three category orderings.
//!
//! Keys are plain integers. Insertions avoid touching unaffected siblings:
//! top-of-list takes `min - 1`, below-a-target takes `target + 1`. The
//! `target + 1` scheme can collide with the next sibling; the degradation
//! path is a sequential renumber of the whole active range (1, 2, 3, ...),
//! the same recovery an integer-position scheme always needs eventually.
//!
//! Favorite order is only ever read sorted, so gaps left by un-favoriting
//! are fine and no renumbering happens there.

/// Key for appending at the bottom: `max + 1`, or 1 for an empty list.
pub fn next_order(keys: impl IntoIterator<Item = i64>) -> i64 {
    keys.into_iter().max().map_or(1, |max| max + 1)
}

/// Key for inserting at the top: `min - 1`, or 1 for an empty list.
pub fn top_order(keys: impl IntoIterator<Item = i64>) -> i64 {
    keys.into_iter().min().map_or(1, |min| min - 1)
}

/// Key for inserting directly below a target.
pub fn below_order(target: i64) -> i64 {
    target + 1
}

/// True if any two keys are equal (insert-between ran out of room).
pub fn has_collision(keys: impl IntoIterator<Item = i64>) -> bool {
    let mut sorted: Vec<i64> = keys.into_iter().collect();
    sorted.sort_unstable();
    sorted.windows(2).any(|w| w[0] == w[1])
}

/// Sequential assignments 1..n for ids already in display order.
pub fn renumber<I: Copy>(ids_in_order: &[I]) -> Vec<(I, i64)> {
    ids_in_order
        .iter()
        .enumerate()
        .map(|(index, id)| (*id, index as i64 + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty(vec![], 1)]
    #[case::dense(vec![1, 2, 3], 4)]
    #[case::gapped(vec![-2, 7], 8)]
    fn next_order_appends_after_max(#[case] keys: Vec<i64>, #[case] expected: i64) {
        assert_eq!(next_order(keys), expected);
    }

    #[rstest]
    #[case::empty(vec![], 1)]
    #[case::dense(vec![1, 2, 3], 0)]
    #[case::already_negative(vec![-5, 1], -6)]
    fn top_order_goes_below_min(#[case] keys: Vec<i64>, #[case] expected: i64) {
        assert_eq!(top_order(keys), expected);
    }

    #[test]
    fn below_order_is_a_small_increment() {
        assert_eq!(below_order(3), 4);
    }

    #[rstest]
    #[case::no_dupes(vec![1, 2, 3], false)]
    #[case::dupe(vec![1, 2, 2], true)]
    #[case::empty(vec![], false)]
    fn collision_detection(#[case] keys: Vec<i64>, #[case] expected: bool) {
        assert_eq!(has_collision(keys), expected);
    }

    #[test]
    fn renumber_is_sequential_from_one() {
        let assigned = renumber(&["a", "b", "c"]);
        assert_eq!(assigned, vec![("a", 1), ("b", 2), ("c", 3)]);
    }

    #[test]
    fn repeated_top_insertion_keeps_walking_down() {
        // Matches the move-to-top behavior: each take of the top slot picks
        // a strictly smaller key, without disturbing existing ones.
        let mut keys = vec![1, 2];
        let t1 = top_order(keys.iter().copied());
        keys.push(t1);
        let t2 = top_order(keys.iter().copied());

        assert_eq!(t1, 0);
        assert_eq!(t2, -1);
    }
}
