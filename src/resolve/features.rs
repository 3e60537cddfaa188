use super::value;
use crate::client::{ModelScope, Session};
use crate::model::{Element, kind};
use futures::future::join_all;
use indicatif::ProgressBar;
use serde::Serialize;

const LOG_TARGET: &str = "  features";

/// One row of the flat record set projected out of a batch resolution.
/// Unresolvable value fields stay blank; the row itself always survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureRow {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub name: String,
    pub value: String,
    pub value_id: String,
    pub owner: String,
}

/// Resolve a batch of feature elements into rows.
///
/// Only `AttributeUsage` elements produce rows; everything else is skipped
/// with a diagnostic. Feature resolutions are independent of each other, so
/// they run concurrently; `join_all` preserves the input order in the
/// aggregated output.
pub async fn collect_feature_rows(
    session: &Session,
    scope: &ModelScope,
    features: &[Element],
    progress: &ProgressBar,
) -> Vec<FeatureRow> {
    let attribute_usages: Vec<&Element> = features
        .iter()
        .filter(|element| {
            if element.kind == kind::ATTRIBUTE_USAGE {
                true
            } else {
                log::debug!(
                    target: LOG_TARGET,
                    "skipping element {} of type {}",
                    element.id,
                    element.kind
                );
                false
            }
        })
        .collect();

    progress.set_length(attribute_usages.len() as u64);

    join_all(
        attribute_usages
            .into_iter()
            .map(|element| feature_row(session, scope, element, progress)),
    )
    .await
}

async fn feature_row(session: &Session, scope: &ModelScope, element: &Element, progress: &ProgressBar) -> FeatureRow {
    log::debug!(target: LOG_TARGET, "processing {} - {}", element.kind, element.id);

    let owner = match element.owner.as_ref() {
        Some(owner_ref) => session
            .element(scope, &owner_ref.id)
            .await
            .and_then(|owner| owner.declared_name)
            .unwrap_or_default(),
        None => String::new(),
    };

    let resolved = value::resolve_feature_value(session, scope, &element.id).await;
    progress.inc(1);

    let (value, value_id) = match resolved {
        Some(resolved) => (resolved.display_value(), resolved.value_id),
        None => (String::new(), String::new()),
    };

    FeatureRow {
        id: element.id.clone(),
        kind: element.kind.clone(),
        name: element.name.clone().unwrap_or_default(),
        value,
        value_id,
        owner,
    }
}
