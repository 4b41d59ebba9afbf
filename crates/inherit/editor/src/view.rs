//! View models for the authoring surfaces.
//!
//! Inherited protection is injected here, before rendering, instead of
//! patching the rendered markup.

use inherit_types::{ContentId, ContentItem, PROTECT_CHILDREN_FIELD};
use serde::{Deserialize, Serialize};

/// State label added to list rows whose protection comes from an ancestor.
pub const INHERITED_STATE_LABEL: &str = "Password protected by parent";

/// The visibility section of the single-item edit view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityPanel {
    pub label: String,
    /// Whether the control for changing visibility is offered.
    pub editable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<InheritedNotice>,
}

/// "Password protected by parent post" notice, linking to the ancestor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InheritedNotice {
    pub source: ContentId,
    pub text: String,
    pub link_text: String,
    pub edit_url: String,
}

/// The "protect children" checkbox.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectChildrenField {
    pub name: String,
    pub label: String,
    pub checked: bool,
}

impl ProtectChildrenField {
    pub fn new(checked: bool) -> Self {
        Self {
            name: PROTECT_CHILDREN_FIELD.to_string(),
            label: "Password protect all child posts".to_string(),
            checked,
        }
    }
}

/// Single-item edit view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditScreen {
    pub item_id: ContentId,
    pub visibility: VisibilityPanel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protect_children: Option<ProtectChildrenField>,
}

impl EditScreen {
    /// The view as the host would render it for `item` on its own.
    pub fn for_item(item: &ContentItem) -> Self {
        Self {
            item_id: item.id,
            visibility: VisibilityPanel {
                label: item.visibility.label().to_string(),
                editable: true,
                notice: None,
            },
            protect_children: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRow {
    pub item_id: ContentId,
    /// Nesting level; 0 for top-level rows.
    pub depth: usize,
    pub title: String,
    pub states: Vec<String>,
}

impl ListRow {
    pub fn new(item_id: ContentId, depth: usize, title: impl Into<String>) -> Self {
        Self {
            item_id,
            depth,
            title: title.into(),
            states: Vec::new(),
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.states.push(state.into());
        self
    }

    pub fn has_inherited_state(&self) -> bool {
        self.states.iter().any(|state| state == INHERITED_STATE_LABEL)
    }
}

/// List view of content items.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListView {
    pub rows: Vec<ListRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use inherit_types::Visibility;

    #[test]
    fn edit_screen_starts_from_own_visibility() {
        let item = ContentItem::new(ContentId(4), "page");
        let screen = EditScreen::for_item(&item);
        assert_eq!(screen.visibility.label, Visibility::Public.label());
        assert!(screen.visibility.editable);
        assert!(screen.protect_children.is_none());
    }

    #[test]
    fn edit_screen_serializes_without_empty_sections() {
        let item = ContentItem::new(ContentId(4), "page");
        let json = serde_json::to_value(EditScreen::for_item(&item)).unwrap();
        assert_eq!(json["item_id"], 4);
        assert_eq!(json["visibility"]["label"], "Public");
        assert!(json["visibility"].get("notice").is_none());
        assert!(json.get("protect_children").is_none());
    }
}
