/// Non-empty fields of `line`, where every char of `delims` separates fields
/// and runs of separators count as one. Trailing line terminators are not
/// part of any field.
pub fn split_fields<'a>(line: &'a str, delims: &str) -> impl Iterator<Item = &'a str> {
    line.trim_end_matches(['\n', '\r'])
        .split(move |c: char| delims.contains(c))
        .filter(|f| !f.is_empty())
}

/// Finite number in `field`, or `None`.
#[inline]
pub fn parse_value(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_of_delimiters_collapse() {
        let got: Vec<&str> = split_fields("  a \t\tb  c\n", " \t").collect();
        assert_eq!(got, vec!["a", "b", "c"]);
        assert_eq!(split_fields("\r\n", " ").count(), 0);
    }

    #[test]
    fn custom_delimiters() {
        let got: Vec<&str> = split_fields("web-1,12.5;x", ",;").collect();
        assert_eq!(got, vec!["web-1", "12.5", "x"]);
    }

    #[test]
    fn parse_value_accepts_zero_and_rejects_junk() {
        assert_eq!(parse_value("0"), Some(0.0));
        assert_eq!(parse_value("-1.5e3"), Some(-1500.0));
        assert_eq!(parse_value("12abc"), None);
        assert_eq!(parse_value("nan"), None);
        assert_eq!(parse_value("inf"), None);
        assert_eq!(parse_value(""), None);
    }
}
