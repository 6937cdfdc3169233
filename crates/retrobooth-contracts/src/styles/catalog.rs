use indexmap::IndexMap;
use serde::Serialize;

use super::presets::BUILTIN_STYLES;

/// Shown while a start/switch call is outstanding for a style without its own messages.
pub const DEFAULT_PROGRESS_MESSAGES: &[&str] = &[
    "ANALYZING FEATURES...",
    "TRAVERSING TIMELINES...",
    "ADJUSTING QUANTUM FILTERS...",
    "RENDERING REALITY...",
    "GENERATING PIXELS...",
    "APPLYING ARTISTIC STYLE...",
    "FINALIZING MASTERPIECE...",
];

#[derive(Debug, Clone, Copy)]
pub(crate) struct StyleSeed {
    pub id: &'static str,
    pub label: &'static str,
    pub directive: &'static str,
    pub accent: (&'static str, &'static str),
    pub era: &'static str,
    pub progress_messages: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleDescriptor {
    pub id: String,
    pub label: String,
    /// Instruction sent to the generation backend together with the source image.
    pub directive: String,
    /// Gradient endpoints used when presenting the style.
    pub accent: (String, String),
    pub era: String,
    pub progress_messages: Vec<String>,
}

impl StyleDescriptor {
    fn from_seed(seed: &StyleSeed) -> Self {
        Self {
            id: seed.id.to_string(),
            label: seed.label.to_string(),
            directive: seed.directive.to_string(),
            accent: (seed.accent.0.to_string(), seed.accent.1.to_string()),
            era: seed.era.to_string(),
            progress_messages: seed
                .progress_messages
                .iter()
                .map(|item| (*item).to_string())
                .collect(),
        }
    }
}

/// Read-only id -> style lookup. Ordered; the first entry is the fallback for unknown ids.
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    styles: IndexMap<String, StyleDescriptor>,
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::new(None)
    }
}

impl StyleCatalog {
    /// An empty or missing table falls back to the built-in presets so `lookup` stays total.
    pub fn new(styles: Option<IndexMap<String, StyleDescriptor>>) -> Self {
        Self {
            styles: styles
                .filter(|map| !map.is_empty())
                .unwrap_or_else(builtin_styles),
        }
    }

    pub fn get(&self, id: &str) -> Option<&StyleDescriptor> {
        self.styles.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.styles.contains_key(id)
    }

    pub fn default_style(&self) -> &StyleDescriptor {
        // Non-empty by construction.
        &self.styles[0]
    }

    pub fn lookup(&self, id: Option<&str>) -> &StyleDescriptor {
        id.and_then(|value| self.get(value.trim()))
            .unwrap_or_else(|| self.default_style())
    }

    pub fn enumerate(&self) -> impl Iterator<Item = &StyleDescriptor> {
        self.styles.values()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn progress_message(&self, id: Option<&str>, tick: usize) -> &str {
        let style = self.lookup(id);
        if style.progress_messages.is_empty() {
            return DEFAULT_PROGRESS_MESSAGES[tick % DEFAULT_PROGRESS_MESSAGES.len()];
        }
        style.progress_messages[tick % style.progress_messages.len()].as_str()
    }
}

fn builtin_styles() -> IndexMap<String, StyleDescriptor> {
    BUILTIN_STYLES
        .iter()
        .map(|seed| (seed.id.to_string(), StyleDescriptor::from_seed(seed)))
        .collect()
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::{StyleCatalog, StyleDescriptor, DEFAULT_PROGRESS_MESSAGES};

    fn bare_style(id: &str) -> StyleDescriptor {
        StyleDescriptor {
            id: id.to_string(),
            label: id.to_uppercase(),
            directive: format!("Render {id}."),
            accent: ("gray-100".to_string(), "gray-900".to_string()),
            era: "2000".to_string(),
            progress_messages: Vec::new(),
        }
    }

    #[test]
    fn builtin_catalog_starts_with_eighties_mall() {
        let catalog = StyleCatalog::default();
        assert_eq!(catalog.default_style().id, "80s");
        assert_eq!(catalog.len(), 29);
        assert!(catalog.contains("astronaut"));
    }

    #[test]
    fn lookup_resolves_known_ids_and_trims_whitespace() {
        let catalog = StyleCatalog::default();
        assert_eq!(catalog.lookup(Some("noir")).label, "Film Noir");
        assert_eq!(catalog.lookup(Some(" 90s ")).id, "90s");
    }

    #[test]
    fn lookup_unknown_or_absent_id_falls_back_to_first_entry() {
        let catalog = StyleCatalog::default();
        assert_eq!(catalog.lookup(Some("disco-inferno")).id, "80s");
        assert_eq!(catalog.lookup(None).id, "80s");
        assert_eq!(catalog.lookup(Some("")).id, "80s");
    }

    #[test]
    fn enumerate_preserves_table_order() {
        let mut styles = IndexMap::new();
        for id in ["z", "a", "m"] {
            styles.insert(id.to_string(), bare_style(id));
        }
        let catalog = StyleCatalog::new(Some(styles));
        let ids: Vec<&str> = catalog.enumerate().map(|style| style.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
        assert_eq!(catalog.lookup(Some("missing")).id, "z");
    }

    #[test]
    fn empty_table_falls_back_to_builtin_presets() {
        let catalog = StyleCatalog::new(Some(IndexMap::new()));
        assert!(!catalog.is_empty());
        assert_eq!(catalog.default_style().id, "80s");
    }

    #[test]
    fn progress_messages_cycle_and_default_when_style_has_none() {
        let mut styles = IndexMap::new();
        styles.insert("plain".to_string(), bare_style("plain"));
        let catalog = StyleCatalog::new(Some(styles));
        assert_eq!(catalog.progress_message(Some("plain"), 0), DEFAULT_PROGRESS_MESSAGES[0]);
        assert_eq!(
            catalog.progress_message(Some("plain"), DEFAULT_PROGRESS_MESSAGES.len()),
            DEFAULT_PROGRESS_MESSAGES[0]
        );

        let builtin = StyleCatalog::default();
        let messages = &builtin.lookup(Some("80s")).progress_messages;
        assert_eq!(builtin.progress_message(Some("80s"), 0), "TEASING YOUR HAIR...");
        assert_eq!(
            builtin.progress_message(Some("80s"), messages.len() + 1),
            messages[1]
        );
    }
}
