use serde::{Deserialize, Serialize};

use inherit_types::ContentId;

/// Configuration for the authoring surfaces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Content kinds that always offer "protect children", with or without
    /// children of their own (default: ["page"])
    #[serde(default = "default_supported_kinds")]
    pub supported_kinds: Vec<String>,

    /// Edit-view URL for an item; `{id}` is replaced by the item id
    #[serde(default = "default_edit_link_template")]
    pub edit_link_template: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            supported_kinds: default_supported_kinds(),
            edit_link_template: default_edit_link_template(),
        }
    }
}

impl EditorConfig {
    pub fn edit_link(&self, id: ContentId) -> String {
        self.edit_link_template.replace("{id}", &id.to_string())
    }
}

fn default_supported_kinds() -> Vec<String> {
    vec!["page".to_string()]
}

fn default_edit_link_template() -> String {
    "/admin/post.php?post={id}&action=edit".to_string()
}
