//! Text helpers shared by the fragment renderers

use std::borrow::Cow;

use glam::DVec3;

/// Format a number with the shortest representation that round-trips
pub fn fmt_num(value: f64) -> String {
    // -0 prints as "-0"
    format!("{}", value + 0.0)
}

/// Format a vector as a space separated `xyz` attribute value
pub fn fmt_vec(v: DVec3) -> String {
    format!("{} {} {}", fmt_num(v.x), fmt_num(v.y), fmt_num(v.z))
}

/// Escape a string for use inside a double-quoted attribute
pub fn attr(value: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(-0.2), "-0.2");
        assert_eq!(fmt_num(0.000001), "0.000001");
    }

    #[test]
    fn test_fmt_vec() {
        assert_eq!(fmt_vec(DVec3::new(0.0, -0.0, 0.4)), "0 0 0.4");
    }

    #[test]
    fn test_attr_escaping() {
        assert!(matches!(attr("base_link"), Cow::Borrowed("base_link")));
        assert_eq!(attr("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
        assert_eq!(attr("Steel & Brass"), "Steel &amp; Brass");
    }
}
