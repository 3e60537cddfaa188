use crate::client::{ModelScope, Session};
use crate::model::Element;
use crate::model::kind::RelationshipKind;

const LOG_TARGET: &str = "    walker";

/// Enumerate an element's owned relationships as full relationship bodies,
/// in the element's declared order, optionally filtered by kind.
///
/// A fetch failure for an individual relationship is skipped with a
/// diagnostic; one bad edge must not suppress the rest of the list. Where
/// "the" relationship of a kind is expected, the first yielded match is
/// authoritative.
pub async fn relationships_of(
    session: &Session,
    scope: &ModelScope,
    element: &Element,
    filter: Option<RelationshipKind>,
) -> Vec<Element> {
    let mut relationships = Vec::new();

    for stub in &element.owned_relationships {
        let Some(relationship) = session.element(scope, &stub.id).await else {
            log::debug!(
                target: LOG_TARGET,
                "skipping unresolvable relationship {} of element {}",
                stub.id,
                element.id
            );
            continue;
        };

        if let Some(kind) = filter {
            if !kind.matches(&relationship.kind) {
                log::debug!(target: LOG_TARGET, "skipping relationship of type {}", relationship.kind);
                continue;
            }
        }

        relationships.push(relationship);
    }

    relationships
}
