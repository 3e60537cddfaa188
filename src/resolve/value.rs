use super::{expr, walker};
use crate::client::{ModelScope, Session};
use crate::model::kind::{self, RelationshipKind};
use serde_json::Value;

const LOG_TARGET: &str = "     value";

/// The terminal output of a resolution: a decoded scalar and the identity of
/// the element that produced it (a literal, or the innermost resolved
/// operand of an operator expression).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedValue {
    pub value_id: String,
    pub value: Value,
}

impl ResolvedValue {
    /// The scalar rendered for display: strings bare, numbers as written,
    /// absent values empty.
    #[must_use]
    pub fn display_value(&self) -> String {
        render_scalar(&self.value)
    }
}

/// Render a wire scalar for display.
#[must_use]
pub fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Resolve the value of a feature by identity.
///
/// Walks the feature's `FeatureValue` relationships in declared order. For
/// the first one carrying a related element, the pointed-to value element is
/// decoded by kind: any `Literal*` is terminal; an `OperatorExpression` is
/// delegated to [`expr::decode_operator_expression`] and its result is
/// final (a decode failure there ends the whole resolution); any other kind
/// is skipped in favor of the next `FeatureValue` relationship. Every fetch
/// failure inside the chain degrades to `None`; nothing propagates past
/// this boundary, because one unresolvable feature must not abort a batch.
pub async fn resolve_feature_value(session: &Session, scope: &ModelScope, feature_id: &str) -> Option<ResolvedValue> {
    log::debug!(target: LOG_TARGET, "resolving value of feature {feature_id}");

    let feature = session.element(scope, feature_id).await?;

    for relationship in walker::relationships_of(session, scope, &feature, Some(RelationshipKind::FeatureValue)).await {
        let Some(target) = relationship.owned_related_elements.first() else {
            log::debug!(target: LOG_TARGET, "feature value {} carries no related element", relationship.id);
            continue;
        };

        let Some(value_element) = session.element(scope, &target.id).await else {
            continue;
        };

        if kind::is_literal(&value_element.kind) {
            log::debug!(
                target: LOG_TARGET,
                "feature {feature_id} resolved to {} ({})",
                value_element.id,
                value_element.kind
            );
            return Some(ResolvedValue {
                value_id: value_element.id,
                value: value_element.value.unwrap_or(Value::Null),
            });
        }

        if value_element.kind == kind::OPERATOR_EXPRESSION {
            let decoded = expr::decode_operator_expression(session, scope, &value_element).await?;
            return Some(ResolvedValue {
                value_id: decoded.id,
                value: decoded.value.unwrap_or(Value::Null),
            });
        }

        log::debug!(
            target: LOG_TARGET,
            "skipping unsupported value element of type {} for feature {feature_id}",
            value_element.kind
        );
    }

    None
}

/// Resolve one feature into the `name=value` form of the query surface.
///
/// The element itself must be a literal or operator expression; its owner
/// supplies the name, falling back to `Unknown Owner` when the owner is
/// missing or unnamed.
pub async fn describe_feature_value(session: &Session, scope: &ModelScope, element_id: &str) -> Option<String> {
    let element = session.element(scope, element_id).await?;

    let value = if kind::is_literal(&element.kind) {
        element.value.clone().unwrap_or(Value::Null)
    } else if element.kind == kind::OPERATOR_EXPRESSION {
        let decoded = expr::decode_operator_expression(session, scope, &element).await?;
        decoded.value.unwrap_or(Value::Null)
    } else {
        log::warn!(
            target: LOG_TARGET,
            "element {element_id} of type {} does not carry a resolvable value",
            element.kind
        );
        return None;
    };

    let owner_name = match element.owner.as_ref() {
        Some(owner_ref) => session
            .element(scope, &owner_ref.id)
            .await
            .and_then(|owner| owner.name)
            .unwrap_or_else(|| String::from("Unknown Owner")),
        None => String::from("Unknown Owner"),
    };

    let description = format!("{owner_name}={}", render_scalar(&value));
    log::info!(target: LOG_TARGET, "feature value: {description}");
    Some(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_render_for_display() {
        assert_eq!(render_scalar(&json!("ok")), "ok");
        assert_eq!(render_scalar(&json!(42)), "42");
        assert_eq!(render_scalar(&json!(2.5)), "2.5");
        assert_eq!(render_scalar(&Value::Null), "");
        assert_eq!(render_scalar(&json!(true)), "true");
    }
}
