use super::{ModelScope, Session};
use crate::model::{Element, shape};
use serde_json::Value;

const LOG_TARGET: &str = "  elements";

impl Session {
    /// Fetch one element by identity.
    ///
    /// Exactly one network round trip per call, and deliberately no caching:
    /// callers needing performance layer caching above this contract, never
    /// inside it. Every failure mode (transport, non-2xx status, unparseable
    /// or undecodable body) is soft: logged and converted to `None`, so a
    /// single unresolvable element never aborts an enclosing walk. The store
    /// sometimes wraps a single logical element in a list; the first entry
    /// is taken.
    pub async fn element(&self, scope: &ModelScope, id: &str) -> Option<Element> {
        if id.is_empty() {
            log::warn!(target: LOG_TARGET, "requested an element with an empty id");
            return None;
        }

        let url = scope.element_url(id);
        log::debug!(target: LOG_TARGET, "querying element: {url}");

        let response = match self.client().get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "could not retrieve element {id}: {e}");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            log::warn!(target: LOG_TARGET, "could not retrieve element {id}: HTTP {status}");
            return None;
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "could not parse body for element {id}: {e}");
                return None;
            }
        };

        if body.is_array() {
            log::debug!(target: LOG_TARGET, "store returned a list for element {id}, using the first entry");
        }

        let map = shape::normalize(body)?;
        match serde_json::from_value::<Element>(Value::Object(map)) {
            Ok(element) => Some(element),
            Err(e) => {
                log::warn!(target: LOG_TARGET, "could not decode element {id}: {e}");
                None
            }
        }
    }

    /// Fetch a batch of elements sequentially, skipping unresolvable ids.
    ///
    /// One bad id must not suppress the rest of the batch; each skip leaves
    /// a diagnostic behind.
    pub async fn elements(&self, scope: &ModelScope, ids: impl IntoIterator<Item = impl AsRef<str>>) -> Vec<Element> {
        let mut elements = Vec::new();
        for id in ids {
            let id = id.as_ref();
            match self.element(scope, id).await {
                Some(element) => elements.push(element),
                None => log::debug!(target: LOG_TARGET, "skipping unresolvable element {id}"),
            }
        }

        elements
    }

    /// Fetch the owned elements of `element_id` whose `@type` matches `kind`.
    pub async fn owned_elements_of_kind(&self, scope: &ModelScope, element_id: &str, kind: &str) -> Vec<Element> {
        let Some(parent) = self.element(scope, element_id).await else {
            log::warn!(
                target: LOG_TARGET,
                "unable to fetch element '{element_id}' in commit '{}' of project '{}'",
                scope.commit(),
                scope.project()
            );
            return Vec::new();
        };

        let mut matching = Vec::new();
        for stub in &parent.owned_elements {
            if let Some(owned) = self.element(scope, &stub.id).await {
                if owned.kind == kind {
                    matching.push(owned);
                }
            }
        }

        matching
    }
}
