use crate::directive::CONTENT;
use crate::stage::StageOutcome;
use faintly_dom::{Element, Node};
use faintly_expr::{Context, Value, resolve_expression};
use std::sync::Arc;

/// `data-fly-content`: replaces the element's children with the resolved
/// value. The new children are final and are not walked.
pub(crate) async fn handle_content(el: &mut Element, context: &mut Context) -> StageOutcome {
    let Some(expression) = el.remove_attribute(CONTENT) else {
        return StageOutcome::Continue;
    };

    el.children = match resolve_expression(&expression, context).await {
        None => Vec::new(),
        Some(Value::List(items)) => Arc::unwrap_or_clone(items)
            .into_iter()
            .flat_map(into_nodes)
            .collect(),
        Some(value) => into_nodes(value),
    };
    StageOutcome::Finalized
}

fn into_nodes(value: Value) -> Vec<Node> {
    match value {
        Value::Node(node) => vec![Arc::unwrap_or_clone(node)],
        Value::Nodes(nodes) => Arc::unwrap_or_clone(nodes),
        other => vec![Node::Text(other.to_string())],
    }
}
