//! A lenient HTML fragment parser.
//!
//! `quick-xml` does the tokenizing; a small tree builder turns the events
//! into owned nodes and applies the HTML rules templates rely on: case
//! folding of names, void elements, valueless attributes, raw text inside
//! `<script>` and `<style>`, and tolerance for unbalanced end tags and bare
//! ampersands. Implied end tags (`<p>` closing on `<div>` and so on) are not
//! inferred; templates are expected to be well nested.

use crate::error::{Location, MarkupError};
use crate::node::{Attributes, Element, Fragment, Node, is_void_element};
use log::warn;
use quick_xml::Reader;
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use quick_xml::events::{BytesStart, Event as XmlEvent};

fn configured_reader(input: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(input);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.allow_dangling_amp = true;
    reader
}

/// Parses markup into a fragment of top-level nodes.
pub fn parse_fragment(source: &str) -> Result<Fragment, MarkupError> {
    let mut builder = TreeBuilder::default();
    // Byte offset of the reader's input within `source`. Raw text elements
    // are cut out by hand and the reader restarts after their end tag.
    let mut offset = 0;
    let mut reader = configured_reader(source);

    loop {
        let pos = offset + reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|err| MarkupError::Syntax {
            source: err,
            location: Location::from_offset(source, pos),
        })?;
        match event {
            XmlEvent::Start(e) => {
                let mut element = element_from_start(&e)?;
                if element.is_void() {
                    builder.append(Node::Element(element));
                } else if element.is_raw_text() {
                    let content_start = offset + reader.buffer_position() as usize;
                    let rest = &source[content_start..];
                    let (text_end, resume) = raw_text_end(rest, &element.name);
                    if text_end > 0 {
                        element.children.push(Node::Text(rest[..text_end].to_string()));
                    }
                    builder.append(Node::Element(element));
                    offset = content_start + resume;
                    reader = configured_reader(&source[offset..]);
                } else {
                    builder.open(element);
                }
            }
            XmlEvent::Empty(e) => {
                builder.append(Node::Element(element_from_start(&e)?));
            }
            XmlEvent::End(e) => {
                let name = std::str::from_utf8(e.name().as_ref())?.to_ascii_lowercase();
                if !is_void_element(&name) {
                    builder.close(&name);
                }
            }
            XmlEvent::Text(e) => {
                // References arrive as separate events; a bare `&` stays literal.
                builder.text(std::str::from_utf8(&e)?);
            }
            XmlEvent::CData(e) => {
                builder.text(std::str::from_utf8(&e)?);
            }
            XmlEvent::GeneralRef(e) => {
                let reference = format!("&{};", std::str::from_utf8(&e)?);
                match unescape_with(&reference, resolve_html5_entity) {
                    Ok(text) => builder.text(&text),
                    Err(_) => builder.text(&reference),
                }
            }
            XmlEvent::Comment(e) => {
                builder.append(Node::Comment(std::str::from_utf8(&e)?.to_string()));
            }
            XmlEvent::Eof => break,
            _ => (),
        }
    }

    Ok(builder.finish())
}

/// Locates the end tag of a raw text element named `name` in `rest`, the
/// input following its start tag. Returns the length of the raw text and
/// the offset just past the end tag. Without an end tag the text runs to
/// the end of the input.
fn raw_text_end(rest: &str, name: &str) -> (usize, usize) {
    let mut from = 0;
    while let Some(found) = rest[from..].find("</") {
        let tag_start = from + found;
        let name_end = tag_start + 2 + name.len();
        let same_name = rest
            .get(tag_start + 2..name_end)
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name));
        if same_name {
            let tail = &rest[name_end..];
            let terminated = match tail.chars().next() {
                None | Some('>' | '/') => true,
                Some(c) => c.is_ascii_whitespace(),
            };
            if terminated {
                let resume = tail.find('>').map_or(rest.len(), |gt| name_end + gt + 1);
                return (tag_start, resume);
            }
        }
        from = tag_start + 2;
    }
    (rest.len(), rest.len())
}

/// Decodes character references in an attribute value. A value that does
/// not decode cleanly (a bare `&`, an unknown name) is kept as written.
fn decode_attribute(raw: &str) -> String {
    unescape_with(raw, resolve_html5_entity)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

fn element_from_start(e: &BytesStart) -> Result<Element, MarkupError> {
    let name = std::str::from_utf8(e.name().as_ref())?.to_ascii_lowercase();
    let mut attributes = Attributes::new();
    for attr in e.html_attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_ascii_lowercase();
        let raw_value = std::str::from_utf8(&attr.value)?;
        attributes.set(key, decode_attribute(raw_value));
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

/// Collects parser events into a node tree.
#[derive(Default)]
struct TreeBuilder {
    roots: Vec<Node>,
    open: Vec<Element>,
}

impl TreeBuilder {
    fn children_mut(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(el) => &mut el.children,
            None => &mut self.roots,
        }
    }

    fn append(&mut self, node: Node) {
        self.children_mut().push(node);
    }

    /// Appends text, merging with a preceding text node.
    fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let children = self.children_mut();
        if let Some(Node::Text(existing)) = children.last_mut() {
            existing.push_str(text);
        } else {
            children.push(Node::Text(text.to_string()));
        }
    }

    fn open(&mut self, element: Element) {
        self.open.push(element);
    }

    /// Closes the innermost open element named `name`, closing anything
    /// still open inside it. An end tag with no matching open element is
    /// dropped.
    fn close(&mut self, name: &str) {
        let Some(index) = self.open.iter().rposition(|el| el.name == name) else {
            warn!("Ignoring unmatched end tag </{}>", name);
            return;
        };
        while self.open.len() > index {
            self.close_innermost();
        }
    }

    fn close_innermost(&mut self) {
        if let Some(element) = self.open.pop() {
            self.append(Node::Element(element));
        }
    }

    fn finish(mut self) -> Fragment {
        while !self.open.is_empty() {
            self.close_innermost();
        }
        Fragment::new(self.roots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements_and_text() {
        let fragment = parse_fragment(r#"<div class="a"><span>Hi</span> there</div>"#).unwrap();
        assert_eq!(fragment.children.len(), 1);
        let div = fragment.children[0].as_element().unwrap();
        assert_eq!(div.name, "div");
        assert_eq!(div.get_attribute("class"), Some("a"));
        assert_eq!(div.children.len(), 2);
        assert_eq!(div.text_content(), "Hi there");
    }

    #[test]
    fn test_parse_lowercases_names() {
        let fragment = parse_fragment(r#"<DIV data-fly-test.showHeading="a.b"></DIV>"#).unwrap();
        let div = fragment.children[0].as_element().unwrap();
        assert_eq!(div.name, "div");
        assert_eq!(div.get_attribute("data-fly-test.showheading"), Some("a.b"));
    }

    #[test]
    fn test_parse_valueless_attribute() {
        let fragment = parse_fragment("<div data-fly-unwrap><b>x</b></div>").unwrap();
        let div = fragment.children[0].as_element().unwrap();
        assert_eq!(div.get_attribute("data-fly-unwrap"), Some(""));
    }

    #[test]
    fn test_parse_void_elements_without_end_tags() {
        let fragment = parse_fragment(r#"<p>a<br>b<img src="x.png"></p>"#).unwrap();
        let p = fragment.children[0].as_element().unwrap();
        assert_eq!(p.children.len(), 4);
        assert_eq!(p.children[1].as_element().unwrap().name, "br");
        assert_eq!(p.children[2].as_text(), Some("b"));
        assert_eq!(fragment.to_html(), r#"<p>a<br>b<img src="x.png"></p>"#);
    }

    #[test]
    fn test_parse_entities_in_text_and_attributes() {
        let fragment = parse_fragment(r#"<a title="A &amp; B">x &lt; y&nbsp;z</a>"#).unwrap();
        let a = fragment.children[0].as_element().unwrap();
        assert_eq!(a.get_attribute("title"), Some("A & B"));
        assert_eq!(a.children.len(), 1);
        assert_eq!(a.text_content(), "x < y\u{a0}z");
    }

    #[test]
    fn test_parse_named_entities_beyond_the_basic_set() {
        let fragment = parse_fragment("<p>&eacute;&euro;&rarr; &#233;&#x20AC;</p>").unwrap();
        assert_eq!(fragment.children[0].as_element().unwrap().text_content(), "é€→ é€");
        assert_eq!(fragment.to_html(), "<p>é€→ é€</p>");
    }

    #[test]
    fn test_parse_unknown_entity_is_kept_literally() {
        let fragment = parse_fragment("<p>&bogus;</p>").unwrap();
        assert_eq!(fragment.children[0].as_element().unwrap().text_content(), "&bogus;");
    }

    #[test]
    fn test_parse_bare_ampersand() {
        let fragment = parse_fragment(r#"<p title="Q&A">Terms & Conditions</p>"#).unwrap();
        let p = fragment.children[0].as_element().unwrap();
        assert_eq!(p.text_content(), "Terms & Conditions");
        assert_eq!(p.get_attribute("title"), Some("Q&A"));
        assert_eq!(
            fragment.to_html(),
            r#"<p title="Q&amp;A">Terms &amp; Conditions</p>"#
        );
    }

    #[test]
    fn test_parse_script_body_as_raw_text() {
        let markup = "<script>if (a < b) {}</script><p>${x}</p>";
        let fragment = parse_fragment(markup).unwrap();
        assert_eq!(fragment.children.len(), 2);
        let script = fragment.children[0].as_element().unwrap();
        assert_eq!(script.name, "script");
        assert_eq!(script.children, vec![Node::Text("if (a < b) {}".into())]);
        assert_eq!(fragment.children[1].as_element().unwrap().name, "p");
        assert_eq!(fragment.to_html(), markup);
    }

    #[test]
    fn test_parse_script_keeps_markup_like_text() {
        let markup = r#"<div><script type="module">let s = "<b>&amp;</b>"; a<b;</SCRIPT ><span>after</span></div>"#;
        let fragment = parse_fragment(markup).unwrap();
        let div = fragment.children[0].as_element().unwrap();
        assert_eq!(div.children.len(), 2);
        let script = div.children[0].as_element().unwrap();
        assert_eq!(script.get_attribute("type"), Some("module"));
        assert_eq!(script.text_content(), r#"let s = "<b>&amp;</b>"; a<b;"#);
        assert_eq!(div.children[1].as_element().unwrap().text_content(), "after");
    }

    #[test]
    fn test_parse_style_body_and_unterminated_script() {
        let fragment = parse_fragment("<style>p > a { color: red }</style><script>x < 1").unwrap();
        assert_eq!(
            fragment.to_html(),
            "<style>p > a { color: red }</style><script>x < 1</script>"
        );
        let empty = parse_fragment("<script></script>").unwrap();
        assert!(empty.children[0].as_element().unwrap().children.is_empty());
    }

    #[test]
    fn test_parse_unquoted_attribute_values() {
        let fragment = parse_fragment("<div class=foo data-fly-repeat=items><b>x</b></div>").unwrap();
        let div = fragment.children[0].as_element().unwrap();
        assert_eq!(div.get_attribute("class"), Some("foo"));
        assert_eq!(div.get_attribute("data-fly-repeat"), Some("items"));
        assert_eq!(div.children.len(), 1);
    }

    #[test]
    fn test_parse_keeps_comments_and_skips_doctype() {
        let fragment = parse_fragment("<!DOCTYPE html><!-- c --><p>x</p>").unwrap();
        assert_eq!(fragment.children.len(), 2);
        assert_eq!(fragment.children[0], Node::Comment(" c ".into()));
    }

    #[test]
    fn test_parse_unclosed_elements_are_closed_at_end() {
        let fragment = parse_fragment("<div><span>open").unwrap();
        assert_eq!(fragment.to_html(), "<div><span>open</span></div>");
    }

    #[test]
    fn test_parse_unmatched_end_tag_is_dropped() {
        let fragment = parse_fragment("<div>a</span>b</div>").unwrap();
        assert_eq!(fragment.to_html(), "<div>ab</div>");
    }

    #[test]
    fn test_parse_template_expressions_survive() {
        let fragment =
            parse_fragment(r#"<a href="${link.url}">${link.text} \${raw}</a>"#).unwrap();
        let a = fragment.children[0].as_element().unwrap();
        assert_eq!(a.get_attribute("href"), Some("${link.url}"));
        assert_eq!(a.text_content(), r"${link.text} \${raw}");
    }
}
