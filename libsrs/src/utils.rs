#[cfg(test)]
pub mod test;

/// Indents all lines of a string with `n` spaces.
pub fn indent<T: Into<String>>(s: T, n: usize) -> String {
    let s: String = s.into();
    let indent = " ".repeat(n);
    s.lines()
        .map(|l| format!("{}{}", indent, l))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats `part` out of `total` as a percentage with one decimal, like "87.5%".
pub fn percent(part: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_owned();
    }
    format!("{:.1}%", part as f64 * 100.0 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_every_line() {
        assert_eq!(indent("a\nb", 2), "  a\n  b");
    }

    #[test]
    fn percent_one_decimal() {
        assert_eq!(percent(1, 3), "33.3%");
        assert_eq!(percent(100, 100), "100.0%");
        assert_eq!(percent(7, 8), "87.5%");
        assert_eq!(percent(0, 0), "0.0%");
    }
}
