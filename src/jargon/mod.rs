//! Jargon templates: boilerplate that user code is inserted into.

mod defaults;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::TemplateError;

/// Marks where user code goes inside a template.
pub const PLACEHOLDER: &str = "INSERT_HERE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JargonTemplate {
    pub id: String,
    pub text: String,
    /// If user code already contains this, it is a whole program and is sent as is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl JargonTemplate {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        key: Option<String>,
    ) -> Result<Self, TemplateError> {
        let text = text.into();
        match text.matches(PLACEHOLDER).count() {
            0 => Err(TemplateError::MissingPlaceholder),
            1 => Ok(Self {
                id: id.into(),
                text,
                key: key.filter(|k| !k.trim().is_empty()),
            }),
            n => Err(TemplateError::MultiplePlaceholders(n)),
        }
    }
}

/// Bundled default templates overlaid with the user's own.
#[derive(Debug, Clone, Default)]
pub struct JargonStore {
    user: BTreeMap<String, JargonTemplate>,
    disabled: BTreeSet<String>,
}

impl JargonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from persisted overrides. Entries that fail validation are dropped.
    pub fn with_overrides(
        user: BTreeMap<String, JargonTemplate>,
        disabled: BTreeSet<String>,
    ) -> Self {
        let user = user
            .into_iter()
            .filter(|(id, t)| {
                let ok = t.text.matches(PLACEHOLDER).count() == 1;
                if !ok {
                    tracing::warn!(id = %id, "ignoring saved jargon without a single placeholder");
                }
                ok
            })
            .collect();
        Self { user, disabled }
    }

    pub fn get(&self, id: &str) -> Option<JargonTemplate> {
        if let Some(t) = self.user.get(id) {
            return Some(t.clone());
        }
        if self.disabled.contains(id) {
            return None;
        }
        default_for(id)
    }

    pub fn has(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn set(&mut self, template: JargonTemplate) {
        self.disabled.remove(&template.id);
        self.user.insert(template.id.clone(), template);
    }

    /// Drops the user template, or hides the default one. Returns false if
    /// the language had no jargon to begin with.
    pub fn remove(&mut self, id: &str) -> bool {
        let had_user = self.user.remove(id).is_some();
        if default_for(id).is_some() {
            let newly = self.disabled.insert(id.to_string());
            return had_user || newly;
        }
        had_user
    }

    pub fn user_templates(&self) -> &BTreeMap<String, JargonTemplate> {
        &self.user
    }

    pub fn disabled(&self) -> &BTreeSet<String> {
        &self.disabled
    }
}

fn default_for(id: &str) -> Option<JargonTemplate> {
    defaults::DEFAULTS
        .iter()
        .find(|d| d.ids.contains(&id))
        .map(|d| JargonTemplate {
            id: id.to_string(),
            text: d.text.to_string(),
            key: Some(d.key.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_default_has_one_placeholder() {
        for d in defaults::DEFAULTS {
            assert_eq!(d.text.matches(PLACEHOLDER).count(), 1, "{:?}", d.ids);
            // the wrapped program itself must count as complete
            assert!(d.text.contains(d.key), "{:?}", d.ids);
        }
    }

    #[test]
    fn absent_is_normal() {
        assert!(JargonStore::new().get("python").is_none());
    }

    #[test]
    fn csharp_default_prints_an_expression() {
        let t = JargonStore::new().get("csharp.net").unwrap();
        assert_eq!(t.text, "System.Console.WriteLine(INSERT_HERE);");
    }

    #[test]
    fn csharp_key_only_matches_printing_statements() {
        let t = JargonStore::new().get("csharp.net").unwrap();
        assert!(crate::composer::needs_wrapping("Console.ReadLine()", &t));
        assert!(crate::composer::needs_wrapping("System.Console.In.ReadToEnd()", &t));
        assert!(!crate::composer::needs_wrapping("Console.WriteLine(1 + 1);", &t));
    }

    #[test]
    fn user_template_shadows_default_and_remove_hides_both() {
        let mut store = JargonStore::new();
        let mine = JargonTemplate::new("rust", "fn main() { INSERT_HERE; }", None).unwrap();
        store.set(mine.clone());
        assert_eq!(store.get("rust"), Some(mine));

        assert!(store.remove("rust"));
        assert!(store.get("rust").is_none());
        assert!(!store.remove("rust"));
        assert!(store.disabled().contains("rust"));
    }

    #[test]
    fn remove_without_any_jargon_reports_false() {
        assert!(!JargonStore::new().remove("python"));
    }

    #[test]
    fn validation_counts_placeholders() {
        assert_eq!(
            JargonTemplate::new("x", "nothing", None),
            Err(TemplateError::MissingPlaceholder)
        );
        assert_eq!(
            JargonTemplate::new("x", "INSERT_HERE INSERT_HERE", None),
            Err(TemplateError::MultiplePlaceholders(2))
        );
        let t = JargonTemplate::new("x", "(INSERT_HERE)", Some("  ".into())).unwrap();
        assert_eq!(t.key, None);
    }

    #[test]
    fn invalid_saved_templates_are_dropped() {
        let mut user = BTreeMap::new();
        user.insert(
            "lua".to_string(),
            JargonTemplate { id: "lua".into(), text: "broken".into(), key: None },
        );
        let store = JargonStore::with_overrides(user, BTreeSet::new());
        assert!(store.get("lua").is_none());
    }
}
