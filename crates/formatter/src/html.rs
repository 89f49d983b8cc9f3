use scraper::{Html, Node};

/// Shown when a description is missing or has no text
pub const NO_DESCRIPTION: &str = "[no description available]";

/// Elements whose boundaries separate words
const BREAKING_ELEMENTS: &[&str] = &["br", "p", "div", "li", "ul", "ol", "hr"];

/// Strip markup from an HTML description down to one line of plain text.
///
/// Entities are decoded and whitespace runs (including line breaks) are
/// collapsed to single spaces. Returns [`NO_DESCRIPTION`] when nothing
/// is left.
pub fn clean_html(input: Option<&str>) -> String {
    let text = input.map(strip_tags).unwrap_or_default();
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        text
    }
}

fn strip_tags(input: &str) -> String {
    let fragment = Html::parse_fragment(input);
    let mut out = String::with_capacity(input.len());

    for node in fragment.tree.root().descendants() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) if BREAKING_ELEMENTS.contains(&element.name()) => {
                out.push(' ')
            }
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup() {
        assert_eq!(
            clean_html(Some("The third season of <i>One Punch Man</i>.")),
            "The third season of One Punch Man."
        );
        assert_eq!(clean_html(Some("<b>bold</b> and <a href=\"x\">link</a>")), "bold and link");
    }

    #[test]
    fn test_line_breaks_become_spaces() {
        assert_eq!(
            clean_html(Some("First line.<br><br>\nSecond line.<br/>Third.")),
            "First line. Second line. Third."
        );
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(
            clean_html(Some("Tom &amp; Jerry &quot;quoted&quot; &#8212; dash")),
            "Tom & Jerry \"quoted\" \u{2014} dash"
        );
    }

    #[test]
    fn test_empty_description_placeholder() {
        assert_eq!(clean_html(None), NO_DESCRIPTION);
        assert_eq!(clean_html(Some("")), NO_DESCRIPTION);
        assert_eq!(clean_html(Some("<br><i> </i>")), NO_DESCRIPTION);
    }
}
