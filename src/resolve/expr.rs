use crate::client::{ModelScope, Session};
use crate::model::Element;
use crate::model::kind::{OPERAND_PARAMETER, RelationshipKind};

const LOG_TARGET: &str = "      expr";

/// Decode a single-operand operator expression down to its literal.
///
/// This is a fixed-shape walk, not a general expression evaluator: the
/// expression must carry a `ParameterMembership` whose `memberName` is `x`;
/// the referenced parameter feature's *first* owned relationship is its
/// value edge; that edge's `memberElement` is the final literal. Expressions
/// using other parameter names or multiple operands are outside this
/// boundary and decode to `None`, as does any fetch failure along the chain.
pub async fn decode_operator_expression(session: &Session, scope: &ModelScope, op_expr: &Element) -> Option<Element> {
    log::debug!(target: LOG_TARGET, "decoding operator expression {}", op_expr.id);

    for stub in &op_expr.owned_relationships {
        let relationship = session.element(scope, &stub.id).await?;

        if !RelationshipKind::ParameterMembership.matches(&relationship.kind)
            || relationship.member_name.as_deref() != Some(OPERAND_PARAMETER)
        {
            continue;
        }

        let parameter = session.element(scope, &relationship.member_element.as_ref()?.id).await?;
        let value_edge = parameter.owned_relationships.first()?;
        let feature_value = session.element(scope, &value_edge.id).await?;
        let target = feature_value.member_element.as_ref()?;
        return session.element(scope, &target.id).await;
    }

    log::debug!(target: LOG_TARGET, "expression {} has no '{OPERAND_PARAMETER}' parameter", op_expr.id);
    None
}
