//! Template merge engine.
//!
//! Turns an IDE template plus a list of selected servers into the document
//! written to that IDE's configuration file:
//!
//! 1. Clone the IDE's template (the registry copy is never touched)
//! 2. Locate the servers container (`mcpServers`, then `servers`)
//! 3. Replace its contents with one fragment per successfully built server,
//!    in selection order
//!
//! Servers that cannot be built (unknown key, missing secret) are left out
//! and reported in [`BuiltDocument::skipped`]; the rest of the document is
//! still produced. Every other top-level field of the template is kept in
//! place.

pub mod template;

pub use template::Template;

use crate::builders::{BuilderSet, PresetInputs};
use crate::core::SetupError;
use crate::prompt::Prompter;
use crate::registry::Registry;
use crate::utils::fs::to_pretty_json;
use serde_json::{Map, Value};

/// A server left out of a document, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedServer {
    pub key: String,
    pub reason: String,
}

/// The merged document for one IDE.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltDocument {
    /// The full file contents
    pub document: Value,
    /// Servers present in the servers container, in selection order
    pub servers: Vec<String>,
    /// Servers that were selected but could not be built
    pub skipped: Vec<SkippedServer>,
}

/// Builds IDE documents for one run.
///
/// Owns the run's [`BuilderSet`], so inputs captured while building the first
/// IDE's document are reused for every later IDE.
pub struct MergeEngine<'a> {
    registry: &'a Registry,
    builders: BuilderSet,
}

impl<'a> MergeEngine<'a> {
    /// Engine over `registry`; builders draw on `presets`.
    pub fn new(registry: &'a Registry, presets: PresetInputs) -> Self {
        Self {
            registry,
            builders: BuilderSet::new(presets),
        }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Build the document for `ide_key` containing `server_keys`.
    ///
    /// # Errors
    ///
    /// - [`SetupError::UnknownIde`] if the IDE is not registered
    /// - [`SetupError::UnrecognizedTemplateShape`] if its template has no
    ///   servers container
    /// - [`SetupError::Serialization`] if a fragment cannot be converted
    ///
    /// Per-server failures are not errors; they end up in `skipped`.
    pub async fn build_document(
        &mut self,
        ide_key: &str,
        server_keys: &[String],
        prompter: &mut dyn Prompter,
    ) -> Result<BuiltDocument, SetupError> {
        let registry = self.registry;
        let ide = registry.ide(ide_key)?;

        let mut document = ide.template.clone();
        let container_key = Template::new(&document).servers_key().ok_or_else(|| {
            SetupError::UnrecognizedTemplateShape {
                ide: ide_key.to_string(),
            }
        })?;

        let mut container = Map::new();
        let mut servers = Vec::new();
        let mut skipped = Vec::new();

        for server_key in server_keys {
            if container.contains_key(server_key) {
                continue;
            }

            let fragment = match registry.server(server_key) {
                Ok(entry) => match self.builders.builder(entry) {
                    Ok(builder) => builder.produce_fragment(ide, prompter).await,
                    Err(e) => Err(e),
                },
                Err(e) => Err(e),
            };

            match fragment {
                Ok(fragment) => {
                    container.insert(server_key.clone(), fragment.to_value()?);
                    servers.push(server_key.clone());
                }
                Err(e) => {
                    tracing::warn!("Skipping {} for {}: {}", server_key, ide_key, e);
                    skipped.push(SkippedServer {
                        key: server_key.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if let Some(root) = document.as_object_mut() {
            root.insert(container_key.to_string(), Value::Object(container));
        }

        Ok(BuiltDocument {
            document,
            servers,
            skipped,
        })
    }
}

/// Render a document as file text (2-space indentation, trailing newline).
pub fn render_document(document: &Value) -> Result<String, SetupError> {
    to_pretty_json(document).map_err(|e| SetupError::Serialization {
        message: format!("{e:#}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{IdeEntry, ServerEntry};
    use crate::test_utils::ScriptedPrompter;
    use serde_json::json;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_selection_gives_empty_container() {
        let registry = Registry::builtin();
        let mut engine = MergeEngine::new(&registry, PresetInputs::new());
        let mut prompter = ScriptedPrompter::new();

        for ide in registry.ides() {
            let built = engine.build_document(&ide.key, &[], &mut prompter).await.unwrap();
            let container = built.document[ide.servers_key().unwrap()].as_object().unwrap();
            assert!(container.is_empty());
            assert!(built.servers.is_empty());
        }
    }

    #[tokio::test]
    async fn test_static_servers_match_registry() {
        let registry = Registry::builtin();
        let mut engine = MergeEngine::new(&registry, PresetInputs::new());
        let mut prompter = ScriptedPrompter::new();

        for key in ["playwright", "shadcn-mcp", "browsermcp", "memory"] {
            let built =
                engine.build_document("claude", &keys(&[key]), &mut prompter).await.unwrap();
            let container = built.document["mcpServers"].as_object().unwrap();
            assert_eq!(container.len(), 1);

            let entry = registry.server(key).unwrap();
            assert_eq!(container[key]["command"], json!(entry.command));
            assert_eq!(container[key]["args"], json!(entry.args));
        }
    }

    #[tokio::test]
    async fn test_cursor_playwright_document() {
        let registry = Registry::builtin();
        let mut engine = MergeEngine::new(&registry, PresetInputs::new());
        let mut prompter = ScriptedPrompter::new();

        let built =
            engine.build_document("cursor", &keys(&["playwright"]), &mut prompter).await.unwrap();
        assert_eq!(
            built.document,
            json!({"mcpServers": {"playwright": {
                "command": "npx",
                "args": ["@playwright/mcp@latest"],
                "type": "stdio"
            }}})
        );
        assert_eq!(
            serde_json::to_string(&built.document).unwrap(),
            concat!(
                r#"{"mcpServers":{"playwright":{"command":"npx","#,
                r#""args":["@playwright/mcp@latest"],"type":"stdio"}}}"#
            )
        );
    }

    #[tokio::test]
    async fn test_servers_are_additive_in_selection_order() {
        let registry = Registry::builtin();
        let mut engine = MergeEngine::new(&registry, PresetInputs::new());
        let mut prompter = ScriptedPrompter::new();

        let built = engine
            .build_document("copilot", &keys(&["memory", "playwright", "memory"]), &mut prompter)
            .await
            .unwrap();
        let order: Vec<_> =
            built.document["servers"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(order, vec!["memory", "playwright"]);
        assert_eq!(built.servers, order);
    }

    #[tokio::test]
    async fn test_unknown_keys() {
        let registry = Registry::builtin();
        let mut engine = MergeEngine::new(&registry, PresetInputs::new());
        let mut prompter = ScriptedPrompter::new();

        let err = engine.build_document("not-a-real-ide", &[], &mut prompter).await.unwrap_err();
        assert!(matches!(err, SetupError::UnknownIde { .. }));

        let built = engine
            .build_document("claude", &keys(&["nope", "memory"]), &mut prompter)
            .await
            .unwrap();
        assert_eq!(built.servers, vec!["memory"]);
        assert_eq!(built.skipped[0].key, "nope");
    }

    #[tokio::test]
    async fn test_unrecognized_template() {
        let registry = Registry::new(
            vec![IdeEntry::new("odd", "Odd", "", "odd.json", json!({ "tools": {} }))],
            vec![ServerEntry::new("memory", "Memory", "npx", &["mem"])],
        );
        let mut engine = MergeEngine::new(&registry, PresetInputs::new());
        let mut prompter = ScriptedPrompter::new();

        let err =
            engine.build_document("odd", &keys(&["memory"]), &mut prompter).await.unwrap_err();
        assert_eq!(
            err,
            SetupError::UnrecognizedTemplateShape {
                ide: "odd".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_extra_template_fields_preserved() {
        let template = json!({
            "version": 2,
            "mcpServers": { "name": { "command": "COMMAND" } },
            "inputs": [{ "id": "token" }]
        });
        let registry = Registry::new(
            vec![IdeEntry::new("custom", "Custom", "", "custom.json", template.clone())],
            vec![ServerEntry::new("memory", "Memory", "npx", &["mem"])],
        );
        let mut engine = MergeEngine::new(&registry, PresetInputs::new());
        let mut prompter = ScriptedPrompter::new();

        let built =
            engine.build_document("custom", &keys(&["memory"]), &mut prompter).await.unwrap();
        let fields: Vec<_> = built.document.as_object().unwrap().keys().cloned().collect();
        assert_eq!(fields, vec!["version", "mcpServers", "inputs"]);
        assert_eq!(built.document["inputs"], template["inputs"]);
        assert_eq!(registry.ide("custom").unwrap().template, template);
    }

    #[test]
    fn test_render_document() {
        let text = render_document(&json!({ "servers": {} })).unwrap();
        assert_eq!(text, "{\n  \"servers\": {}\n}\n");
    }
}
