use std::cmp::Ordering;
use std::collections::HashMap;
use crate::types::{AuthorRecord, AuthorStats, SortKey};

/// Ranks contributors: descending by `order_by`, then by the remaining keys
/// in `lines, commits, files` precedence, then by name ascending.
/// The result does not depend on the iteration order of `authors`.
pub fn rank_authors(authors: &HashMap<String, AuthorRecord>, order_by: SortKey) -> Vec<AuthorStats> {
    let mut rows: Vec<AuthorStats> = authors
        .iter()
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, record)| AuthorStats::from_record(name, record))
        .collect();
    rows.sort_by(|a, b| compare(a, b, order_by));
    rows
}

/// The primary key followed by the tie-break keys.
pub fn key_order(order_by: SortKey) -> [SortKey; 3] {
    let mut order = [order_by; 3];
    let rest = SortKey::PRECEDENCE.iter().filter(|&&k| k != order_by);
    for (slot, key) in order[1..].iter_mut().zip(rest) {
        *slot = *key;
    }
    order
}

pub fn compare(a: &AuthorStats, b: &AuthorStats, order_by: SortKey) -> Ordering {
    key_order(order_by)
        .iter()
        .fold(Ordering::Equal, |acc, &key| acc.then_with(|| b.key(key).cmp(&a.key(key))))
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(lines: usize, commits: usize, files: usize) -> AuthorRecord {
        AuthorRecord {
            lines,
            commits: (0..commits).map(|i| format!("c{i}")).collect(),
            files:   (0..files).map(|i| format!("f{i}")).collect(),
        }
    }

    fn names(rows: &[AuthorStats]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    fn stats(name: &str, lines: usize, commits: usize, files: usize) -> AuthorStats {
        AuthorStats { name: name.to_string(), lines, commits, files }
    }

    #[test]
    fn test_key_order_skips_primary() {
        assert_eq!(key_order(SortKey::Lines),   [SortKey::Lines, SortKey::Commits, SortKey::Files]);
        assert_eq!(key_order(SortKey::Commits), [SortKey::Commits, SortKey::Lines, SortKey::Files]);
        assert_eq!(key_order(SortKey::Files),   [SortKey::Files, SortKey::Lines, SortKey::Commits]);
    }

    #[test]
    fn test_commit_ties_break_on_lines_before_files() {
        let authors = HashMap::from([
            ("A".to_string(), record(10, 2, 1)),
            ("B".to_string(), record(5, 2, 3)),
        ]);
        let rows = rank_authors(&authors, SortKey::Commits);
        assert_eq!(names(&rows), vec!["A", "B"], "Tie on commits must break on lines (10 > 5)");
    }

    #[test]
    fn test_full_ties_break_on_name_ascending() {
        let authors = HashMap::from([
            ("zoe".to_string(),   record(4, 1, 1)),
            ("Adam".to_string(),  record(4, 1, 1)),
            ("alice".to_string(), record(4, 1, 1)),
        ]);
        let rows = rank_authors(&authors, SortKey::Lines);
        assert_eq!(names(&rows), vec!["Adam", "alice", "zoe"]);
    }

    #[test]
    fn test_descending_by_primary_key() {
        let authors = HashMap::from([
            ("few-lines".to_string(),  record(1, 9, 9)),
            ("many-lines".to_string(), record(99, 1, 1)),
        ]);
        assert_eq!(names(&rank_authors(&authors, SortKey::Lines)), vec!["many-lines", "few-lines"]);
        assert_eq!(names(&rank_authors(&authors, SortKey::Files)), vec!["few-lines", "many-lines"]);
    }

    #[test]
    fn test_files_ties_break_on_lines_then_commits() {
        let authors = HashMap::from([
            ("x".to_string(), record(3, 5, 2)),
            ("y".to_string(), record(3, 7, 2)),
            ("z".to_string(), record(8, 1, 2)),
        ]);
        assert_eq!(names(&rank_authors(&authors, SortKey::Files)), vec!["z", "y", "x"]);
    }

    #[test]
    fn test_empty_identity_never_ranked() {
        let authors = HashMap::from([
            ("".to_string(),     record(1000, 50, 50)),
            ("Jane".to_string(), record(1, 1, 1)),
        ]);
        let rows = rank_authors(&authors, SortKey::Lines);
        assert_eq!(names(&rows), vec!["Jane"]);
    }

    #[test]
    fn test_comparator_is_antisymmetric_and_transitive() {
        let pool = vec![
            stats("a", 1, 1, 1), stats("b", 1, 1, 1), stats("c", 2, 1, 1),
            stats("d", 1, 2, 1), stats("e", 1, 1, 2), stats("f", 2, 2, 2),
            stats("g", 0, 3, 0), stats("h", 2, 0, 3),
        ];
        for key in SortKey::PRECEDENCE {
            for x in &pool {
                for y in &pool {
                    let xy = compare(x, y, key);
                    assert_eq!(xy, compare(y, x, key).reverse(), "{} vs {} under {key}", x.name, y.name);
                    if x.name != y.name {
                        assert_ne!(xy, Ordering::Equal, "Distinct authors must never compare equal");
                    }
                    for z in &pool {
                        if xy == Ordering::Less && compare(y, z, key) == Ordering::Less {
                            assert_eq!(compare(x, z, key), Ordering::Less, "transitivity under {key}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_ranking_ignores_input_order() {
        let mut forward = HashMap::new();
        let mut backward = HashMap::new();
        let entries: Vec<(String, AuthorRecord)> = (0..20)
            .map(|i| (format!("author-{i:02}"), record(i % 3, i % 2, 1)))
            .collect();
        for (name, rec) in &entries {
            forward.insert(name.clone(), rec.clone());
        }
        for (name, rec) in entries.iter().rev() {
            backward.insert(name.clone(), rec.clone());
        }
        for key in SortKey::PRECEDENCE {
            assert_eq!(rank_authors(&forward, key), rank_authors(&backward, key));
        }
    }
}
