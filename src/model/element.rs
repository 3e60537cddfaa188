use super::shape;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A weak reference to an element: identity only, no ownership. Materializing
/// it requires a follow-up fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ref {
    #[serde(rename = "@id")]
    pub id: String,
}

impl Ref {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Decode a reference from whatever shape the store used for it.
    ///
    /// `ownedFeature` entries arrive as either `{"@id": ...}` objects or bare
    /// id strings, and stubs are occasionally list-wrapped like everything
    /// else. Anything undecodable yields `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(id) => Some(Self::new(id)),
            Value::Object(map) => map.get("@id").and_then(Value::as_str).map(Self::new),
            Value::Array(_) => {
                shape::normalize(value.clone()).and_then(|map| map.get("@id").and_then(Value::as_str).map(Self::new))
            }
            _ => None,
        }
    }
}

/// One node (or relationship body) of the model graph.
///
/// The store serves both elements and relationships from the same
/// `/elements/{id}` endpoint with one open-ended document shape, so a single
/// record covers both; relationship payload fields are simply absent on
/// plain elements. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    #[serde(rename = "@id")]
    pub id: String,

    /// Element kind tag (`AttributeUsage`, `FeatureValue`, `LiteralInteger`,
    /// ...). Empty when the store omitted `@type`.
    #[serde(rename = "@type", default)]
    pub kind: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "declaredName", default)]
    pub declared_name: Option<String>,

    #[serde(rename = "declaredShortName", default)]
    pub declared_short_name: Option<String>,

    /// Owned relationship stubs, in the element's declared order.
    #[serde(rename = "ownedRelationship", default, deserialize_with = "ref_seq")]
    pub owned_relationships: Vec<Ref>,

    #[serde(rename = "ownedFeature", default, deserialize_with = "ref_seq")]
    pub owned_features: Vec<Ref>,

    #[serde(rename = "ownedElement", default, deserialize_with = "ref_seq")]
    pub owned_elements: Vec<Ref>,

    /// Back-reference to the enclosing element.
    #[serde(default, deserialize_with = "ref_opt")]
    pub owner: Option<Ref>,

    /// Literal payload, preserved as the store returned it (string, number, ...).
    #[serde(default)]
    pub value: Option<Value>,

    // Relationship payload fields.
    #[serde(rename = "ownedRelatedElement", default, deserialize_with = "ref_seq")]
    pub owned_related_elements: Vec<Ref>,

    #[serde(rename = "redefinedFeature", default, deserialize_with = "ref_opt")]
    pub redefined_feature: Option<Ref>,

    #[serde(rename = "memberName", default)]
    pub member_name: Option<String>,

    #[serde(rename = "memberElement", default, deserialize_with = "ref_opt")]
    pub member_element: Option<Ref>,

    #[serde(rename = "metadataDefinition", default, deserialize_with = "ref_opt")]
    pub metadata_definition: Option<Ref>,

    /// Elements annotated by this usage. The store emits a single object or
    /// a list here depending on multiplicity.
    #[serde(rename = "annotatedElement", default, deserialize_with = "ref_seq")]
    pub annotated_elements: Vec<Ref>,
}

/// Deserialize a reference set from a list, a single object, a bare string,
/// or nothing at all. Undecodable entries are dropped rather than failing
/// the whole element.
fn ref_seq<'de, D>(deserializer: D) -> Result<Vec<Ref>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter_map(Ref::from_value).collect(),
        Some(single) => Ref::from_value(&single).into_iter().collect(),
    })
}

fn ref_opt<'de, D>(deserializer: D) -> Result<Option<Ref>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Ref::from_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_a_minimal_element() {
        let element: Element = serde_json::from_value(json!({"@id": "e1"})).unwrap();
        assert_eq!(element.id, "e1");
        assert_eq!(element.kind, "");
        assert!(element.owned_relationships.is_empty());
        assert!(element.owner.is_none());
    }

    #[test]
    fn missing_id_is_a_decode_error() {
        assert!(serde_json::from_value::<Element>(json!({"@type": "AttributeUsage"})).is_err());
    }

    #[test]
    fn decodes_stub_shapes() {
        let element: Element = serde_json::from_value(json!({
            "@id": "e1",
            "@type": "PartUsage",
            "ownedFeature": [{"@id": "f1"}, "f2", [{"@id": "f3"}], 17],
            "owner": {"@id": "p1"},
        }))
        .unwrap();

        assert_eq!(
            element.owned_features,
            vec![Ref::new("f1"), Ref::new("f2"), Ref::new("f3")]
        );
        assert_eq!(element.owner, Some(Ref::new("p1")));
    }

    #[test]
    fn annotated_element_accepts_single_object_or_list() {
        let single: Element = serde_json::from_value(json!({
            "@id": "u1",
            "annotatedElement": {"@id": "a1"},
        }))
        .unwrap();
        assert_eq!(single.annotated_elements, vec![Ref::new("a1")]);

        let many: Element = serde_json::from_value(json!({
            "@id": "u2",
            "annotatedElement": [{"@id": "a1"}, {"@id": "a2"}],
        }))
        .unwrap();
        assert_eq!(many.annotated_elements, vec![Ref::new("a1"), Ref::new("a2")]);
    }

    #[test]
    fn relationship_payload_fields_decode() {
        let relationship: Element = serde_json::from_value(json!({
            "@id": "r1",
            "@type": "ParameterMembership",
            "memberName": "x",
            "memberElement": {"@id": "m1"},
        }))
        .unwrap();

        assert_eq!(relationship.member_name.as_deref(), Some("x"));
        assert_eq!(relationship.member_element, Some(Ref::new("m1")));
    }

    #[test]
    fn literal_value_is_preserved_raw() {
        let literal: Element = serde_json::from_value(json!({
            "@id": "l1",
            "@type": "LiteralInteger",
            "value": 42,
        }))
        .unwrap();

        assert_eq!(literal.value, Some(json!(42)));
    }
}
