//! Catalog documents.
//!
//! A catalog document is one JSON object per cataloged application. The
//! document keeps the object exactly as received (key order, unknown keys,
//! explicit `null`s) and the rules edit it in place, so a rewrite only differs
//! where a rule moved or filled a field.
//!
//! The typed views below describe the regions the rules touch. Every document
//! is checked against them when it is read, which is where a non-boolean flag
//! or a non-object `platform` is rejected.

use crate::rules::MethodScope;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value, json};

pub const INSTALL_METHODS: &str = "install_methods";
pub const PLATFORM: &str = "platform";
pub const HOSTING: &str = "hosting";
pub const UI: &str = "ui";
pub const DEPLOYMENT: &str = "deployment";
pub const SAAS: &str = "saas";

/// One cataloged application, as an insertion-ordered JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogDocument {
    fields: Map<String, Value>,
}

impl CatalogDocument {
    /// Accept `value` if it is an object matching [`DocumentView`].
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        DocumentView::deserialize(&value)?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(serde_json::Error::custom(
                "catalog document must be a JSON object",
            )),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Typed reading of the rule-relevant regions.
    pub fn view(&self) -> Result<DocumentView, serde_json::Error> {
        DocumentView::deserialize(&Value::Object(self.fields.clone()))
    }

    pub fn install_method_count(&self) -> usize {
        self.fields
            .get(INSTALL_METHODS)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Legacy top-level deployment flags, if present and not `null`.
    pub fn top_level_deployment(&self) -> Option<DeploymentFlags> {
        let value = self.fields.get(DEPLOYMENT)?;
        DeploymentFlags::deserialize(value).ok()
    }

    /// Install-method objects the scope selects, in document order.
    pub(crate) fn methods_mut(
        &mut self,
        scope: MethodScope,
    ) -> impl Iterator<Item = &mut Map<String, Value>> {
        let limit = match scope {
            MethodScope::First => 1,
            MethodScope::All => usize::MAX,
        };
        self.fields
            .get_mut(INSTALL_METHODS)
            .and_then(Value::as_array_mut)
            .into_iter()
            .flat_map(move |methods| methods.iter_mut().take(limit))
            .filter_map(Value::as_object_mut)
    }
}

impl Serialize for CatalogDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CatalogDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(D::Error::custom)
    }
}

/// Typed view of a document. Keys the rules do not read are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocumentView {
    #[serde(default)]
    pub install_methods: Option<Vec<InstallMethodView>>,
    #[serde(default)]
    pub deployment: Option<DeploymentFlags>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InstallMethodView {
    #[serde(default)]
    pub platform: Option<PlatformView>,
    #[serde(default)]
    pub hosting: Option<HostingFlags>,
    #[serde(default)]
    pub ui: Option<UiFlags>,
    #[serde(default)]
    pub deployment: Option<DeploymentFlags>,
}

/// The legacy shape nests `hosting`, `ui` and `deployment` here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlatformView {
    #[serde(default)]
    pub hosting: Option<HostingFlags>,
    #[serde(default)]
    pub ui: Option<UiFlags>,
    #[serde(default)]
    pub deployment: Option<DeploymentFlags>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HostingFlags {
    #[serde(default)]
    pub self_hosted: Option<bool>,
    #[serde(default)]
    pub saas: Option<bool>,
    #[serde(default)]
    pub managed_cloud: Option<bool>,
}

/// User-interface flags (`cli`, `web_ui`, ...); the set is open.
pub type UiFlags = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentFlags {
    #[serde(default)]
    pub script: Option<bool>,
    #[serde(default)]
    pub docker: Option<bool>,
    #[serde(default)]
    pub docker_compose: Option<bool>,
    #[serde(default)]
    pub helm: Option<bool>,
    #[serde(default)]
    pub kubernetes: Option<bool>,
    #[serde(default)]
    pub terraform: Option<bool>,
}

impl DeploymentFlags {
    /// The six-flag object: every known flag present, absent ones `false`,
    /// unknown keys dropped.
    pub fn normalized(&self) -> Value {
        json!({
            "script": self.script.unwrap_or(false),
            "docker": self.docker.unwrap_or(false),
            "docker_compose": self.docker_compose.unwrap_or(false),
            "helm": self.helm.unwrap_or(false),
            "kubernetes": self.kubernetes.unwrap_or(false),
            "terraform": self.terraform.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_round_trips_key_order_and_nulls() {
        let source = r#"{"slug":"gitea","install_methods":[{"type":"default","platform":{"arch":"amd64","os":["linux"]},"ui":null}],"name":"Gitea","tags":["git"]}"#;
        let doc: CatalogDocument = serde_json::from_str(source).expect("document parses");

        let keys: Vec<&str> = doc.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, ["slug", "install_methods", "name", "tags"]);
        assert_eq!(serde_json::to_string(&doc).expect("serializes"), source);
        assert_eq!(doc.install_method_count(), 1);
    }

    #[test]
    fn view_reads_legacy_platform_fields() {
        let doc: CatalogDocument = serde_json::from_value(json!({
            "install_methods": [{
                "platform": {
                    "hosting": { "self_hosted": true },
                    "ui": { "web_ui": true },
                    "deployment": { "docker": true }
                }
            }]
        }))
        .expect("document parses");

        let view = doc.view().expect("view");
        let methods = view.install_methods.expect("install methods");
        let platform = methods[0].platform.as_ref().expect("platform");
        assert_eq!(platform.hosting.as_ref().and_then(|h| h.self_hosted), Some(true));
        assert_eq!(platform.ui.as_ref().map(|ui| ui["web_ui"].clone()), Some(json!(true)));
        assert_eq!(platform.deployment.as_ref().and_then(|d| d.docker), Some(true));
    }

    #[test]
    fn normalized_deployment_fills_missing_flags_in_fixed_order() {
        let source: DeploymentFlags =
            serde_json::from_value(json!({ "docker": true, "nix": true })).expect("flags parse");

        let normalized = source.normalized();
        assert_eq!(
            serde_json::to_string(&normalized).expect("serializes"),
            r#"{"script":false,"docker":true,"docker_compose":false,"helm":false,"kubernetes":false,"terraform":false}"#
        );
    }

    #[test]
    fn top_level_deployment_ignores_null() {
        let doc: CatalogDocument =
            serde_json::from_value(json!({ "deployment": null })).expect("document parses");
        assert_eq!(doc.top_level_deployment(), None);
        assert_eq!(doc.install_method_count(), 0);
    }

    #[test]
    fn malformed_shapes_are_rejected() {
        for bad in [
            json!({ "install_methods": [{ "hosting": { "saas": "maybe" } }] }),
            json!({ "install_methods": [{ "platform": "linux" }] }),
            json!({ "install_methods": ["docker"] }),
            json!([]),
        ] {
            assert!(
                serde_json::from_value::<CatalogDocument>(bad.clone()).is_err(),
                "accepted {bad}"
            );
        }
    }
}
