/// Format `fixed / denominator` as a percentage rounded to two decimals.
///
/// A zero denominator yields `0%`. Trailing zeros are dropped, so one half
/// is `50%` and two thirds is `66.67%`.
pub fn format_fix_rate(fixed: u64, denominator: u64) -> String {
    if denominator == 0 {
        return "0%".to_string();
    }
    let pct = fixed as f64 / denominator as f64 * 100.0;
    let rounded = (pct * 100.0).round() / 100.0;
    format!("{}%", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_denominator() {
        assert_eq!(format_fix_rate(0, 0), "0%");
    }

    #[test]
    fn test_whole_percentages() {
        assert_eq!(format_fix_rate(1, 2), "50%");
        assert_eq!(format_fix_rate(3, 3), "100%");
        assert_eq!(format_fix_rate(0, 5), "0%");
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        assert_eq!(format_fix_rate(2, 3), "66.67%");
        assert_eq!(format_fix_rate(1, 3), "33.33%");
        assert_eq!(format_fix_rate(1, 8), "12.5%");
    }
}
