use crate::directive::UNWRAP;
use crate::stage::StageOutcome;
use faintly_dom::Element;
use faintly_expr::{Context, resolve_expression};
use log::trace;

/// `data-fly-unwrap`: an empty value always unwraps; otherwise the marker
/// survives only if the expression is truthy. Marked elements are flattened
/// after the whole template has rendered.
pub(crate) async fn handle_unwrap(el: &mut Element, context: &mut Context) -> StageOutcome {
    let Some(expression) = el.get_attribute(UNWRAP).map(str::to_string) else {
        return StageOutcome::Continue;
    };

    if !expression.is_empty() {
        let unwrap = resolve_expression(&expression, context)
            .await
            .is_some_and(|v| v.is_truthy());
        trace!("{}=\"{}\" -> {}", UNWRAP, expression, unwrap);
        if !unwrap {
            el.remove_attribute(UNWRAP);
        }
    }
    StageOutcome::Continue
}
