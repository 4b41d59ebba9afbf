//! Metadata keys and flag encoding.

/// Current metadata key holding the "protect children" flag.
pub const INHERIT_META_KEY: &str = "protect_children";

/// Key used by installs that predate the current storage format.
pub const LEGACY_INHERIT_META_KEY: &str = "_protect_children";

/// Value the legacy key carried when enabled.
pub const LEGACY_ENABLED_VALUE: &str = "on";

pub const FLAG_ENABLED_VALUE: &str = "1";
pub const FLAG_DISABLED_VALUE: &str = "";

/// Form field the classic editing surface submits.
pub const PROTECT_CHILDREN_FIELD: &str = "protect_children";

/// Host capability that grants content editing.
pub const EDIT_CONTENT_CAPABILITY: &str = "edit_posts";

/// Interpret a stored or submitted flag value.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "on" | "true" | "yes"
    )
}

/// Encode a flag for storage.
pub fn flag_value(enabled: bool) -> &'static str {
    if enabled {
        FLAG_ENABLED_VALUE
    } else {
        FLAG_DISABLED_VALUE
    }
}
