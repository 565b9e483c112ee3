//! Document tree handed to the paginator by the editor front end.
//!
//! Nodes mirror rendered blocks: a class list used for classification, box geometry for the
//! height oracle, and the ordered children. Ids are generated on import when the client omits
//! them, so every atom stays traceable through the page partition.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Vertical box geometry of a block, in CSS pixels.
///
/// `line_height` and `font_size` are inherited by descendants that leave them unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockStyle {
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

/// A block in the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub style: BlockStyle,
    /// Fixed content height (dividers, avatars, pre-measured blocks).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Pre-computed count of wrapped text lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn has_any_class(&self, classes: &[String]) -> bool {
        classes.iter().any(|c| self.has_class(c))
    }

    /// Copy of this node without its children: same id, classes and geometry.
    pub fn shallow_clone(&self) -> Node {
        Node {
            id: self.id,
            classes: self.classes.clone(),
            style: self.style.clone(),
            height: self.height,
            lines: self.lines,
            text: self.text.clone(),
            children: Vec::new(),
        }
    }

    /// Copies `line_height` and `font_size` down to descendants that leave them unset, so a
    /// node measured on its own renders as it would inside its ancestors.
    pub fn propagate_text_style(&mut self) {
        let (line_height, font_size) = (self.style.line_height, self.style.font_size);
        for child in &mut self.children {
            if child.style.line_height.is_none() {
                child.style.line_height = line_height;
            }
            if child.style.font_size.is_none() {
                child.style.font_size = font_size;
            }
            child.propagate_text_style();
        }
    }

    /// Sets `line_height` on this node and every descendant.
    pub fn apply_line_height(&mut self, line_height: f64) {
        self.style.line_height = Some(line_height);
        for child in &mut self.children {
            child.apply_line_height(line_height);
        }
    }
}

#[cfg(test)]
impl Node {
    pub fn block(classes: &[&str]) -> Node {
        Node {
            id: Uuid::new_v4(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            style: BlockStyle::default(),
            height: None,
            lines: None,
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_height(mut self, height: f64) -> Node {
        self.height = Some(height);
        self
    }

    pub fn with_lines(mut self, lines: u32) -> Node {
        self.lines = Some(lines);
        self
    }

    pub fn with_text(mut self, text: &str) -> Node {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_margins(mut self, top: f64, bottom: f64) -> Node {
        self.style.margin_top = top;
        self.style.margin_bottom = bottom;
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Node {
        self.children = children;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_fills_defaults_and_generates_ids() {
        let value = json!({
            "classes": ["resume-section"],
            "children": [
                { "classes": ["section-title"], "height": 24.0, "style": { "marginBottom": 6.0 } },
                { "classes": ["section-divider"], "height": 1.0 }
            ]
        });
        let node: Node = serde_json::from_value(value).expect("valid document");

        assert!(node.has_class("resume-section"));
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].style.margin_bottom, 6.0);
        assert_eq!(node.children[0].style.margin_top, 0.0);
        assert_eq!(node.children[0].style.line_height, None);
        assert_ne!(node.id, node.children[0].id);
        assert_ne!(node.children[0].id, node.children[1].id);
    }

    #[test]
    fn test_explicit_id_is_kept() {
        let id = Uuid::new_v4();
        let node: Node = serde_json::from_value(json!({ "id": id, "lines": 3 })).unwrap();
        assert_eq!(node.id, id);
        assert_eq!(node.lines, Some(3));
        assert!(node.classes.is_empty());
    }

    #[test]
    fn test_shallow_clone_drops_children_only() {
        let node = Node::block(&["experience-item"])
            .with_margins(4.0, 8.0)
            .with_children(vec![Node::block(&["text-line"]).with_lines(1)]);
        let shallow = node.shallow_clone();

        assert_eq!(shallow.id, node.id);
        assert_eq!(shallow.classes, node.classes);
        assert_eq!(shallow.style, node.style);
        assert!(shallow.children.is_empty());
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn test_apply_line_height_reaches_descendants() {
        let mut node = Node::block(&["section-content"]).with_children(vec![Node::block(&[])
            .with_children(vec![Node::block(&["text-line"]).with_lines(2)])]);
        node.apply_line_height(1.55);

        assert_eq!(node.style.line_height, Some(1.55));
        assert_eq!(node.children[0].style.line_height, Some(1.55));
        assert_eq!(node.children[0].children[0].style.line_height, Some(1.55));
    }

    #[test]
    fn test_propagate_text_style_fills_unset_values_only() {
        let mut section = Node::block(&["resume-section"]).with_children(vec![
            Node::block(&["experience-item"])
                .with_children(vec![Node::block(&["text-line"]).with_lines(1)]),
            Node::block(&["section-title"]).with_lines(1),
        ]);
        section.style.font_size = Some(13.0);
        section.style.line_height = Some(1.5);
        section.children[1].style.font_size = Some(18.0);
        section.propagate_text_style();

        let line = &section.children[0].children[0];
        assert_eq!(line.style.font_size, Some(13.0));
        assert_eq!(line.style.line_height, Some(1.5));
        assert_eq!(section.children[1].style.font_size, Some(18.0));
        assert_eq!(section.children[1].style.line_height, Some(1.5));
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let node = Node::block(&["text-line"]).with_lines(1);
        let value = serde_json::to_value(&node).unwrap();
        assert!(value.get("children").is_none());
        assert!(value.get("height").is_none());
        assert_eq!(value["lines"], 1);
        assert!(value["style"].get("lineHeight").is_none());
    }
}
