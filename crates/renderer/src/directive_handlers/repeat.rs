use crate::directive::{DEFAULT_REPEAT_NAME, REPEAT, find_qualified};
use crate::stage::StageOutcome;
use crate::walker::Walker;
use faintly_dom::Element;
use faintly_expr::{Context, resolve_expression};
use faintly_template_core::TemplateError;
use log::{trace, warn};

/// `data-fly-repeat[.<name>]`.
///
/// Each entry renders a copy of the element (minus the directive) in its
/// own copy of the context, one after another in collection order. The
/// copies replace the element.
pub(crate) async fn handle_repeat(
    walker: &Walker<'_>,
    el: &mut Element,
    context: &mut Context,
) -> Result<StageOutcome, TemplateError> {
    let Some(directive) = find_qualified(el, &[REPEAT]) else {
        return Ok(StageOutcome::Continue);
    };
    el.remove_attribute(&directive.attribute);

    let Some(value) = resolve_expression(&directive.expression, context).await else {
        return Ok(StageOutcome::Removed);
    };
    let type_name = value.type_name();
    let Some(collection) = value.into_collection() else {
        warn!(
            "{}=\"{}\" resolved to a {}, not a collection; removing <{}>",
            directive.attribute, directive.expression, type_name, el.name
        );
        return Ok(StageOutcome::Removed);
    };
    if collection.is_empty() {
        return Ok(StageOutcome::Removed);
    }

    let name = directive
        .qualifier
        .map(|q| q.to_lowercase())
        .unwrap_or_else(|| DEFAULT_REPEAT_NAME.to_string());
    trace!("Repeating <{}> {} time(s) as '{}'", el.name, collection.len(), name);

    let mut rendered = Vec::new();
    for (index, (key, item)) in collection.into_entries().into_iter().enumerate() {
        let mut scope = context.clone();
        scope.insert(name.clone(), item);
        scope.insert(format!("{}Index", name), index);
        scope.insert(format!("{}Number", name), index + 1);
        scope.insert(format!("{}Key", name), key);
        rendered.extend(walker.render_element(el.clone(), &mut scope).await?);
    }
    Ok(StageOutcome::Replaced(rendered))
}
