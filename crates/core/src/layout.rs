//! Two-column composition of text blocks.

use unicode_width::UnicodeWidthStr;

/// Spaces between the widest left line and the right column.
const GUTTER: usize = 4;

/// Place `right` beside `left`.
///
/// Every line that has a right-hand part is padded to the widest left line
/// plus a four-space gutter. Left lines without a partner pass through
/// untouched. An empty (or blank) left block returns `right` as is.
///
/// # Examples
///
/// ```
/// use guess_core::layout::side_by_side;
///
/// let left = vec!["ab".to_string(), "abcd".to_string()];
/// let right = vec!["x".to_string()];
/// assert_eq!(side_by_side(&left, &right), vec!["ab      x", "abcd"]);
/// ```
#[must_use]
pub fn side_by_side(left: &[String], right: &[String]) -> Vec<String> {
    let width = left.iter().map(|l| l.width()).max().unwrap_or(0);
    if width == 0 {
        return right.to_vec();
    }

    (0..left.len().max(right.len()))
        .map(|i| match (left.get(i), right.get(i)) {
            (Some(l), None) => l.clone(),
            (l, Some(r)) => {
                let l = l.map_or("", String::as_str);
                format!("{l}{}{r}", " ".repeat(width + GUTTER - l.width()))
            }
            (None, None) => String::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(ls: &[&str]) -> Vec<String> {
        ls.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_left_returns_right() {
        let right = lines(&["one", "two"]);
        assert_eq!(side_by_side(&[], &right), right);
        assert_eq!(side_by_side(&lines(&["", ""]), &right), right);
    }

    #[test]
    fn test_empty_right_returns_left() {
        let left = lines(&["a", "bb"]);
        assert_eq!(side_by_side(&left, &[]), left);
    }

    #[test]
    fn test_right_longer_than_left() {
        let out = side_by_side(&lines(&["abc", "a"]), &lines(&["1", "2", "3"]));
        assert_eq!(out, vec!["abc    1", "a      2", "       3"]);
    }

    #[test]
    fn test_left_longer_than_right() {
        let out = side_by_side(&lines(&["a", "abcdef", "xy"]), &lines(&["1"]));
        assert_eq!(out, vec!["a         1", "abcdef", "xy"]);
    }

    #[test]
    fn test_right_column_starts_at_same_offset() {
        let out = side_by_side(
            &lines(&["UTC line", "a much longer zone line"]),
            &lines(&["cal 1", "cal 2"]),
        );
        let offset = "a much longer zone line".len() + GUTTER;
        assert!(out.iter().all(|l| l.find("cal").unwrap() == offset));
    }
}
