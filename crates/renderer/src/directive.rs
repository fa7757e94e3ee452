//! The `data-fly-*` attribute vocabulary.

use faintly_dom::Element;

pub const PREFIX: &str = "data-fly-";

pub const TEST: &str = "data-fly-test";
pub const NOT: &str = "data-fly-not";
pub const REPEAT: &str = "data-fly-repeat";
pub const ATTRIBUTES: &str = "data-fly-attributes";
pub const CONTENT: &str = "data-fly-content";
pub const INCLUDE: &str = "data-fly-include";
pub const UNWRAP: &str = "data-fly-unwrap";

/// The iteration variable used by an unqualified `data-fly-repeat`.
pub const DEFAULT_REPEAT_NAME: &str = "item";

/// A directive that may carry a `.<name>` qualifier, as found on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedDirective {
    /// Which directive matched (one of the constants above).
    pub base: &'static str,
    /// The full attribute name, e.g. `data-fly-test.showheading`.
    pub attribute: String,
    /// The first segment after the base name, if any.
    pub qualifier: Option<String>,
    pub expression: String,
}

/// Finds the first attribute, in source order, that is one of `bases`
/// either bare or followed by `.<qualifier>`.
pub fn find_qualified(element: &Element, bases: &[&'static str]) -> Option<QualifiedDirective> {
    element.attributes.iter().find_map(|attr| {
        bases.iter().find_map(|&base| {
            let rest = attr.name.strip_prefix(base)?;
            let qualifier = match rest {
                "" => None,
                _ => {
                    let rest = rest.strip_prefix('.')?;
                    rest.split('.').next().filter(|q| !q.is_empty()).map(str::to_string)
                }
            };
            Some(QualifiedDirective {
                base,
                attribute: attr.name.clone(),
                qualifier,
                expression: attr.value.clone(),
            })
        })
    })
}

/// True for attributes the engine consumes rather than renders.
pub fn is_directive(attribute: &str) -> bool {
    attribute.starts_with(PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_bare_and_qualified() {
        let el = Element::new("div")
            .with_attribute("class", "x")
            .with_attribute("data-fly-not.hidden", "flags.hide");
        let found = find_qualified(&el, &[TEST, NOT]).unwrap();
        assert_eq!(found.base, NOT);
        assert_eq!(found.attribute, "data-fly-not.hidden");
        assert_eq!(found.qualifier.as_deref(), Some("hidden"));
        assert_eq!(found.expression, "flags.hide");

        let el = Element::new("li").with_attribute("data-fly-repeat", "items");
        let found = find_qualified(&el, &[REPEAT]).unwrap();
        assert_eq!(found.qualifier, None);
    }

    #[test]
    fn test_first_attribute_in_source_order_wins() {
        let el = Element::new("div")
            .with_attribute("data-fly-not", "b")
            .with_attribute("data-fly-test", "a");
        assert_eq!(find_qualified(&el, &[TEST, NOT]).unwrap().base, NOT);
    }

    #[test]
    fn test_lookalike_names_do_not_match() {
        let el = Element::new("div")
            .with_attribute("data-fly-tester", "a")
            .with_attribute("data-fly-repeated", "b");
        assert!(find_qualified(&el, &[TEST, NOT]).is_none());
        assert!(find_qualified(&el, &[REPEAT]).is_none());
    }

    #[test]
    fn test_qualifier_takes_first_segment() {
        let el = Element::new("div").with_attribute("data-fly-repeat.card.extra", "cards");
        let found = find_qualified(&el, &[REPEAT]).unwrap();
        assert_eq!(found.qualifier.as_deref(), Some("card"));
    }
}
