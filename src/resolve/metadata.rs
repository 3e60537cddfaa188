use crate::Result;
use crate::client::{ModelScope, QueryInput, Session};
use crate::model::kind;
use std::collections::BTreeMap;

const LOG_TARGET: &str = "  metadata";

/// Field projection for the metadata definition query.
const METADATA_SELECT: [&str; 5] = ["declaredName", "declaredShortName", "@id", "@type", "owner"];

/// Resolve metadata definition identities from their declared short names.
///
/// One server-side query fetches all `MetadataDefinition` elements; the
/// requested short names are correlated client-side. Unknown short names map
/// to `None`, not an error. The query itself failing is a hard error, since
/// the domain pipeline cannot proceed without it.
pub async fn metadata_ids_by_short_name(
    session: &Session,
    scope: &ModelScope,
    short_names: &[String],
) -> Result<BTreeMap<String, Option<String>>> {
    let definitions = session
        .query(
            scope,
            &QueryInput::property_equals("@type", kind::METADATA_DEFINITION).with_select(&METADATA_SELECT),
        )
        .await?;

    log::debug!(target: LOG_TARGET, "query matched {} metadata definition(s)", definitions.len());

    let mut id_map = BTreeMap::new();
    for short_name in short_names {
        let matched = definitions
            .iter()
            .find(|definition| definition.declared_short_name.as_deref() == Some(short_name))
            .map(|definition| definition.id.clone());

        if matched.is_none() {
            log::debug!(target: LOG_TARGET, "no metadata definition with short name '{short_name}'");
        }

        let _ = id_map.insert(short_name.clone(), matched);
    }

    Ok(id_map)
}

/// Collect the identities annotated by each metadata definition in `id_map`.
///
/// One server-side query fetches all `MetadataUsage` elements; each usage's
/// `metadataDefinition` reference is compared against the map entries. On a
/// match the usage's `annotatedElement` identities are collected (the store
/// emits a single object or a list there); when the set is absent the
/// usage's own identity stands in. The result carries one entry per input
/// key, possibly empty.
pub async fn annotated_element_ids(
    session: &Session,
    scope: &ModelScope,
    id_map: &BTreeMap<String, Option<String>>,
) -> Result<BTreeMap<String, Vec<String>>> {
    let usages = session
        .query(scope, &QueryInput::property_equals("@type", kind::METADATA_USAGE))
        .await?;

    log::debug!(target: LOG_TARGET, "query matched {} metadata usage(s)", usages.len());

    let mut results: BTreeMap<String, Vec<String>> = id_map.keys().map(|key| (key.clone(), Vec::new())).collect();

    for usage in &usages {
        let usage_definition = usage.metadata_definition.as_ref().map(|reference| reference.id.as_str());

        for (key, definition_id) in id_map {
            let Some(definition_id) = definition_id else {
                continue;
            };

            if usage_definition != Some(definition_id.as_str()) {
                continue;
            }

            log::debug!(target: LOG_TARGET, "usage {} matches metadata definition for '{key}'", usage.id);

            let Some(ids) = results.get_mut(key) else {
                continue;
            };

            if usage.annotated_elements.is_empty() {
                ids.push(usage.id.clone());
            } else {
                ids.extend(usage.annotated_elements.iter().map(|annotated| annotated.id.clone()));
            }
        }
    }

    Ok(results)
}
