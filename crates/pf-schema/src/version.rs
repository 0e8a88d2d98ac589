//! Natural ordering for version strings (`v2 < v10`, `1.2.0 < 1.10.0`).

use std::cmp::Ordering;

/// Compare two version strings segment by segment.
///
/// A leading `v`/`V` is ignored. Segments are split on `.` and `-`; numeric
/// segments compare numerically, others lexically. Ties fall back to plain
/// string order so the ordering is total.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let strip = |s: &str| s.strip_prefix(['v', 'V']).unwrap_or(s).to_string();
    let (left, right) = (strip(a), strip(b));
    let mut left_parts = left.split(['.', '-']);
    let mut right_parts = right.split(['.', '-']);

    loop {
        match (left_parts.next(), right_parts.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(ln), Ok(rn)) => ln.cmp(&rn),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => l.cmp(r),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}
