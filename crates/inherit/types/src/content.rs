use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a content item in the host graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContentId(pub u64);

impl ContentId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visibility state as exposed by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    PasswordProtected,
    Private,
}

impl Visibility {
    /// Label the authoring surfaces show for this state.
    pub fn label(&self) -> &'static str {
        match self {
            Visibility::Public => "Public",
            Visibility::PasswordProtected => "Password protected",
            Visibility::Private => "Private",
        }
    }
}

/// A content item as read from the host graph.
///
/// `inherit_enabled` is stored as item metadata; graph providers surface it
/// here so resolution needs a single lookup per ancestor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub parent: Option<ContentId>,
    pub kind: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub inherit_enabled: bool,
    #[serde(default)]
    pub visibility: Visibility,
}

impl ContentItem {
    pub fn new(id: ContentId, kind: impl Into<String>) -> Self {
        Self {
            id,
            parent: None,
            kind: kind.into(),
            password: String::new(),
            inherit_enabled: false,
            visibility: Visibility::Public,
        }
    }

    pub fn with_parent(mut self, parent: ContentId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the item's own password. A non-empty password makes it protected.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self.visibility = if self.password.is_empty() {
            Visibility::Public
        } else {
            Visibility::PasswordProtected
        };
        self
    }

    pub fn with_inherit(mut self, enabled: bool) -> Self {
        self.inherit_enabled = enabled;
        self
    }

    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }

    /// True when this item extends its password to its descendants.
    ///
    /// The flag is inert on an item without a password of its own.
    pub fn protects_children(&self) -> bool {
        self.inherit_enabled && self.has_password()
    }
}

/// Ancestors of one item, immediate parent first, root last.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestorChain(pub Vec<ContentId>);

impl AncestorChain {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentId> {
        self.0.iter()
    }
}

impl From<Vec<ContentId>> for AncestorChain {
    fn from(ids: Vec<ContentId>) -> Self {
        Self(ids)
    }
}

/// Outcome of resolving inherited protection for one item.
#[derive(Clone, PartialEq, Eq)]
pub enum ProtectionVerdict {
    /// No ancestor extends protection to this item.
    None,
    /// The nearest qualifying ancestor and the password it requires.
    Inherited { source: ContentId, password: String },
}

impl ProtectionVerdict {
    pub fn is_none(&self) -> bool {
        matches!(self, ProtectionVerdict::None)
    }

    pub fn is_inherited(&self) -> bool {
        !self.is_none()
    }

    /// The protecting ancestor, if any.
    pub fn source(&self) -> Option<ContentId> {
        match self {
            ProtectionVerdict::None => None,
            ProtectionVerdict::Inherited { source, .. } => Some(*source),
        }
    }

    pub fn password(&self) -> Option<&str> {
        match self {
            ProtectionVerdict::None => None,
            ProtectionVerdict::Inherited { password, .. } => Some(password),
        }
    }
}

// Passwords stay out of logs.
impl fmt::Debug for ProtectionVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtectionVerdict::None => f.write_str("None"),
            ProtectionVerdict::Inherited { source, .. } => f
                .debug_struct("Inherited")
                .field("source", source)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}
