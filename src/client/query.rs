use super::{ModelScope, Session};
use crate::Result;
use crate::model::kind::RelationshipKind;
use crate::model::{Element, shape};
use ohno::{IntoAppError, bail};
use serde::Serialize;
use serde_json::Value;

const LOG_TARGET: &str = "     query";

/// A server-side query document: one primitive equality constraint, with an
/// optional field projection. This is the whole query language the engine
/// needs; anything richer is out of scope.
#[derive(Debug, Clone, Serialize)]
pub struct QueryInput {
    #[serde(rename = "@type")]
    kind: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    select: Option<Vec<&'static str>>,

    #[serde(rename = "where")]
    constraint: PrimitiveConstraint,
}

#[derive(Debug, Clone, Serialize)]
struct PrimitiveConstraint {
    #[serde(rename = "@type")]
    kind: &'static str,
    inverse: bool,
    operator: &'static str,
    property: String,
    value: Vec<String>,
}

impl QueryInput {
    /// Match all elements whose `property` equals `value`.
    #[must_use]
    pub fn property_equals(property: &str, value: &str) -> Self {
        Self {
            kind: "Query",
            select: None,
            constraint: PrimitiveConstraint {
                kind: "PrimitiveConstraint",
                inverse: false,
                operator: "=",
                property: property.to_string(),
                value: vec![value.to_string()],
            },
        }
    }

    /// Restrict the response to the given fields.
    #[must_use]
    pub fn with_select(mut self, fields: &[&'static str]) -> Self {
        self.select = Some(fields.to_vec());
        self
    }

    fn describe(&self) -> String {
        format!("{} = {:?}", self.constraint.property, self.constraint.value)
    }
}

impl Session {
    /// Run one server-side query against a commit and decode the matches.
    ///
    /// Unlike single-element fetches, a failed query is a hard error: the
    /// callers of this surface cannot proceed without the result set.
    /// Individual matches that fail to decode are skipped with a diagnostic.
    pub async fn query(&self, scope: &ModelScope, input: &QueryInput) -> Result<Vec<Element>> {
        let url = scope.query_url();
        log::debug!(target: LOG_TARGET, "posting query {} to {url}", input.describe());

        let response = self.client().post(&url).json(input).send().await.into_app_err("query request failed")?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_else(|_| String::from("<unable to read body>"));
            bail!("query for {} failed with HTTP {status}: {details}", input.describe());
        }

        let body: Value = response.json().await.into_app_err("could not parse query response")?;
        let Value::Array(items) = body else {
            bail!("expected a list of query results for {}", input.describe());
        };

        log::debug!(target: LOG_TARGET, "query {} matched {} item(s)", input.describe(), items.len());
        Ok(items.into_iter().filter_map(decode_query_element).collect())
    }

    /// All elements of a given `@type` in the commit.
    pub async fn elements_by_kind(&self, scope: &ModelScope, kind: &str) -> Result<Vec<Element>> {
        self.query(scope, &QueryInput::property_equals("@type", kind)).await
    }

    /// All elements whose `declaredName` equals `name`, plus every element of
    /// the same kind as a direct match that redefines a feature of that name.
    ///
    /// The redefinition sweep is an exhaustive cross-comparison: for each
    /// direct match it queries all same-kind elements and walks each one's
    /// owned relationships looking for a `Redefinition` whose target carries
    /// the requested name. Per-candidate fetch failures are skipped with a
    /// diagnostic; only the primary query is a hard error.
    pub async fn elements_by_name(&self, scope: &ModelScope, name: &str) -> Result<Vec<Element>> {
        let mut matches = self.query(scope, &QueryInput::property_equals("declaredName", name)).await?;

        let mut additional = Vec::new();
        for element in &matches {
            log::debug!(
                target: LOG_TARGET,
                "found element {} ({})",
                element.declared_name.as_deref().unwrap_or("Unknown"),
                element.id
            );

            let same_kind = match self.elements_by_kind(scope, &element.kind).await {
                Ok(elements) => elements,
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "could not query elements of kind {}: {e}", element.kind);
                    continue;
                }
            };

            for candidate in &same_kind {
                if candidate.id == element.id {
                    continue;
                }

                for stub in &candidate.owned_relationships {
                    let Some(relationship) = self.element(scope, &stub.id).await else {
                        continue;
                    };

                    if !RelationshipKind::Redefinition.matches(&relationship.kind) {
                        continue;
                    }

                    let Some(redefined) = relationship.redefined_feature.as_ref() else {
                        log::debug!(target: LOG_TARGET, "redefinition {} carries no target feature", relationship.id);
                        continue;
                    };

                    let Some(redefined_element) = self.element(scope, &redefined.id).await else {
                        continue;
                    };

                    if redefined_element.declared_name.as_deref() == Some(name) {
                        log::debug!(
                            target: LOG_TARGET,
                            "element {} redefines '{name}', adding it to the result set",
                            candidate.id
                        );
                        additional.push(candidate.clone());
                    }
                }
            }
        }

        matches.extend(additional);
        Ok(matches)
    }
}

fn decode_query_element(item: Value) -> Option<Element> {
    let map = shape::normalize(item)?;
    match serde_json::from_value::<Element>(Value::Object(map)) {
        Ok(element) => Some(element),
        Err(e) => {
            log::warn!(target: LOG_TARGET, "skipping undecodable query result: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_documents_serialize_to_the_wire_shape() {
        let input = QueryInput::property_equals("@type", "MetadataDefinition");
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "@type": "Query",
                "where": {
                    "@type": "PrimitiveConstraint",
                    "inverse": false,
                    "operator": "=",
                    "property": "@type",
                    "value": ["MetadataDefinition"],
                },
            })
        );
    }

    #[test]
    fn select_projection_is_included_when_requested() {
        let input = QueryInput::property_equals("@type", "MetadataDefinition")
            .with_select(&["declaredName", "declaredShortName", "@id", "@type", "owner"]);
        let document = serde_json::to_value(&input).unwrap();
        assert_eq!(
            document["select"],
            json!(["declaredName", "declaredShortName", "@id", "@type", "owner"])
        );
    }
}
