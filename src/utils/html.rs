use ammonia;

/// Sanitizes admin-authored question markup.
///
/// Question text and options may carry light formatting (`<b>`, `<code>`, `<sup>`);
/// anything that could run in a student's browser (`<script>`, event handlers,
/// `javascript:` links) is removed. Plain text passes through unchanged apart
/// from HTML-significant characters, which come back entity-escaped.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scripts_keeps_formatting() {
        assert_eq!(
            clean_html("Is <b>O(log n)</b> fast?<script>alert(1)</script>"),
            "Is <b>O(log n)</b> fast?"
        );
    }

    #[test]
    fn plain_text_is_untouched() {
        let text = "Which data structure uses LIFO?";
        assert_eq!(clean_html(text), text);
    }
}
