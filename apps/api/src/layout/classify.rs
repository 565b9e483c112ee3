//! Tag-membership classification of document nodes.
//!
//! The front end renders every block with a fixed set of class names. The paginator never
//! inspects content, only these tags, and anything it does not recognise falls through to the
//! most conservative treatment (a plain block, or a single atom).

use serde::{Deserialize, Serialize};

use crate::models::Node;

/// How a child of a section takes part in packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionChild {
    /// Experience/project/education item or free section content: split atom by atom.
    Body,
    Title,
    Divider,
    /// Anything else: placed whole.
    Plain,
}

/// Class-name sets used to classify nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSets {
    pub section: Vec<String>,
    pub title: Vec<String>,
    pub divider: Vec<String>,
    pub items: Vec<String>,
    pub content: Vec<String>,
    pub atoms: Vec<String>,
}

impl Default for TagSets {
    fn default() -> Self {
        fn owned(tags: &[&str]) -> Vec<String> {
            tags.iter().map(|t| t.to_string()).collect()
        }

        TagSets {
            section: owned(&["resume-section"]),
            title: owned(&["section-title"]),
            divider: owned(&["section-divider"]),
            items: owned(&["experience-item", "project-item", "education-item"]),
            content: owned(&["section-content"]),
            atoms: owned(&["item-header", "text-line"]),
        }
    }
}

impl TagSets {
    pub fn is_section(&self, node: &Node) -> bool {
        node.has_any_class(&self.section)
    }

    pub fn is_atom(&self, node: &Node) -> bool {
        node.has_any_class(&self.atoms)
    }

    pub fn is_divider(&self, node: &Node) -> bool {
        node.has_any_class(&self.divider)
    }

    /// Classifies a direct child of a section. Item/content membership wins over title and
    /// divider tags when a node carries several.
    pub fn section_child(&self, node: &Node) -> SectionChild {
        if node.has_any_class(&self.items) || node.has_any_class(&self.content) {
            SectionChild::Body
        } else if node.has_any_class(&self.title) {
            SectionChild::Title
        } else if self.is_divider(node) {
            SectionChild::Divider
        } else {
            SectionChild::Plain
        }
    }
}
