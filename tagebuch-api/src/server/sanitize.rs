//! Post bodies may carry formatting markup, but nothing that can execute
//! script. Applied to the `body` field on create and update.

pub(crate) fn clean(body: &str) -> String {
    ammonia::clean(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_tags_are_stripped_with_their_contents() {
        assert_eq!(clean("<script>x</script>hello"), "hello");
    }

    #[test]
    fn formatting_markup_survives() {
        assert_eq!(
            clean("<b>bold</b> and <em>emphasis</em>"),
            "<b>bold</b> and <em>emphasis</em>"
        );
        assert_eq!(clean("<ul><li>one</li></ul>"), "<ul><li>one</li></ul>");
    }

    #[test]
    fn event_handler_attributes_are_stripped() {
        let cleaned = clean("<img src=\"x.png\" onerror=\"alert(1)\">");
        assert!(cleaned.contains("<img"));
        assert!(cleaned.contains("src=\"x.png\""));
        assert!(!cleaned.contains("onerror"));
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(clean("just words"), "just words");
    }
}
