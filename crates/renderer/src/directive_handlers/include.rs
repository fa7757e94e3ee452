use crate::directive::INCLUDE;
use crate::stage::StageOutcome;
use crate::walker::Walker;
use faintly_dom::Element;
use faintly_expr::{Context, resolve_expressions};
use faintly_template_core::TemplateError;
use log::debug;

/// `data-fly-include`: renders another fragment into the element.
///
/// A value starting with `/` addresses `<path>#<name>`; anything else names
/// a fragment in the current template file.
pub(crate) async fn handle_include(
    walker: &Walker<'_>,
    el: &mut Element,
    context: &mut Context,
) -> Result<StageOutcome, TemplateError> {
    let Some(raw) = el.remove_attribute(INCLUDE) else {
        return Ok(StageOutcome::Continue);
    };
    let target = resolve_expressions(&raw, context).await.text;

    let (path, name) = if target.starts_with('/') {
        let mut parts = target.split('#');
        (
            parts.next().unwrap_or_default().to_string(),
            parts.next().unwrap_or_default().to_string(),
        )
    } else {
        (context.template_path().unwrap_or_default().to_string(), target)
    };
    debug!("Including '{}#{}' into <{}>", path, name, el.name);

    let mut scope = context.clone();
    scope.set_template(path, name);
    el.children = walker
        .renderer
        .render_include(scope, walker.depth + 1)
        .await?;
    Ok(StageOutcome::Finalized)
}
