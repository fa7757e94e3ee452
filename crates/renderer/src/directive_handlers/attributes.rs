use crate::directive::{ATTRIBUTES, is_directive};
use crate::stage::StageOutcome;
use faintly_dom::Element;
use faintly_expr::{Context, Value, resolve_expression, resolve_expressions};
use futures::future::join_all;
use log::warn;

/// `data-fly-attributes` plus interpolation of every other non-directive
/// attribute.
///
/// The interpolations and the directive expression resolve concurrently.
/// Values from the directive are applied last, so they win over an
/// interpolated attribute of the same name; an absent value removes the
/// attribute.
pub(crate) async fn handle_attributes(el: &mut Element, context: &mut Context) -> StageOutcome {
    let context: &Context = context;
    let expression = el.remove_attribute(ATTRIBUTES);

    let authored: Vec<(String, String)> = el
        .attributes
        .iter()
        .filter(|attr| !is_directive(&attr.name))
        .map(|attr| (attr.name.clone(), attr.value.clone()))
        .collect();

    let interpolations = join_all(
        authored
            .iter()
            .map(|(_, value)| resolve_expressions(value, context)),
    );
    let directive = async {
        match &expression {
            Some(expression) => resolve_expression(expression, context).await,
            None => None,
        }
    };
    let (interpolated, directive_value) = futures::join!(interpolations, directive);

    for ((name, _), result) in authored.iter().zip(interpolated) {
        if result.updated {
            el.set_attribute(name.as_str(), result.text);
        }
    }

    match directive_value {
        Some(Value::Map(values)) => {
            for (name, value) in values.iter() {
                let name = name.to_ascii_lowercase();
                if value.is_absent() {
                    el.remove_attribute(&name);
                } else {
                    el.set_attribute(name, value.to_string());
                }
            }
        }
        Some(other) => warn!(
            "{}=\"{}\" resolved to a {}, not a map; ignoring it",
            ATTRIBUTES,
            expression.as_deref().unwrap_or_default(),
            other.type_name()
        ),
        None => {}
    }

    StageOutcome::Continue
}
