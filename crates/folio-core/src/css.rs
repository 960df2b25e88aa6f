#![forbid(unsafe_code)]

//! CSS value formatting.
//!
//! Inline style values are written as strings. Numbers are rounded to four
//! decimals so accumulated float noise (`3 * 0.1`) never leaks into a style
//! attribute, and negative zero is printed as `0`.

/// Format a number with at most four decimals and no trailing zeros.
#[must_use]
pub fn number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{value:.4}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[must_use]
pub fn px(value: f64) -> String {
    format!("{}px", number(value))
}

#[must_use]
pub fn seconds(value: f64) -> String {
    format!("{}s", number(value))
}

#[must_use]
pub fn deg(value: f64) -> String {
    format!("{}deg", number(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_have_no_fraction() {
        assert_eq!(number(123.0), "123");
        assert_eq!(px(0.0), "0px");
    }

    #[test]
    fn float_noise_is_rounded_away() {
        assert_eq!(seconds(3.0 * 0.1), "0.3s");
        assert_eq!(number(0.1 + 0.2), "0.3");
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        assert_eq!(deg(-0.0), "0deg");
        assert_eq!(deg(-0.00001), "0deg");
    }

    #[test]
    fn negatives_keep_sign() {
        assert_eq!(deg(-7.5), "-7.5deg");
    }

    #[test]
    fn non_finite_collapses_to_zero() {
        assert_eq!(number(f64::NAN), "0");
        assert_eq!(number(f64::INFINITY), "0");
    }
}
