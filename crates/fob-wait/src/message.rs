//! Positional message templates.
//!
//! A template carries up to two placeholders, `%s` or `%d`. They are filled
//! strictly by position: the first one gets the selector, the second one the
//! time in whole milliseconds. Any further placeholders, and any other `%`
//! sequence, are copied through unchanged.

/// Fills `template` with `selector` and `millis`.
///
/// Never fails: a template with fewer placeholders simply gets fewer
/// substitutions, and one with none comes back as-is.
///
/// # Example
///
/// ```
/// use fob_wait::format_message;
///
/// let msg = format_message("Element %s found in %d milliseconds", ".weblogin", 15);
/// assert_eq!(msg, "Element .weblogin found in 15 milliseconds");
/// ```
pub fn format_message(template: &str, selector: &str, millis: u128) -> String {
    let millis = millis.to_string();
    let mut values = [selector, millis.as_str()].into_iter();
    let mut out = String::with_capacity(template.len() + selector.len() + millis.len());
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        let (head, tail) = rest.split_at(pos);
        out.push_str(head);

        let is_placeholder = matches!(tail.as_bytes().get(1), Some(b's' | b'd'));
        match (is_placeholder, is_placeholder.then(|| values.next()).flatten()) {
            (true, Some(value)) => {
                out.push_str(value);
                rest = &tail[2..];
            }
            _ => {
                out.push('%');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_both_placeholders_in_order() {
        assert_eq!(
            format_message("Element %s found in %d milliseconds", ".weblogin", 15),
            "Element .weblogin found in 15 milliseconds"
        );
    }

    #[test]
    fn placeholders_are_positional_not_typed() {
        // first slot is always the selector
        assert_eq!(format_message("%d then %s", "#a", 7), "#a then 7");
    }

    #[test]
    fn template_without_placeholders_is_unchanged() {
        assert_eq!(format_message("nothing to see", "#a", 7), "nothing to see");
    }

    #[test]
    fn single_placeholder_only_takes_selector() {
        assert_eq!(format_message("Missing <%s>", "#a", 7), "Missing <#a>");
    }

    #[test]
    fn extra_placeholders_are_left_alone() {
        assert_eq!(format_message("%s %d %s %d", "#a", 7), "#a 7 %s %d");
    }

    #[test]
    fn stray_percent_signs_are_copied() {
        assert_eq!(format_message("100% of <%s>%", "#a", 7), "100% of <#a>%");
        assert_eq!(format_message("%%s after %d", "#a", 7), "%#a after 7");
    }

    #[test]
    fn selector_containing_placeholder_is_not_rescanned() {
        assert_eq!(format_message("<%s> in %d", "%d", 3), "<%d> in 3");
    }
}
