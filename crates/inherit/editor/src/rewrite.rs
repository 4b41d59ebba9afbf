use inherit_resolver::AncestryResolver;
use inherit_types::{ContentId, ContentItem, RequestContext, Visibility};
use tracing::{debug, warn};

use crate::config::EditorConfig;
use crate::eligibility::Eligibility;
use crate::error::EditorError;
use crate::view::{
    EditScreen, InheritedNotice, ListView, ProtectChildrenField, INHERITED_STATE_LABEL,
};

/// Result of rewriting the edit view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// Visibility was rewritten to show protection inherited from `source`.
    Inherited { source: ContentId },
    NotInherited,
    Ineligible,
    /// Background refresh; the view was left untouched.
    SkippedBackground,
    /// Preparation failed; the view was left untouched.
    Failed,
}

struct EditPlan {
    field: Option<ProtectChildrenField>,
    notice: Option<InheritedNotice>,
}

/// Injects inherited protection into authoring view models.
///
/// Every change is computed first and applied only once computation has
/// succeeded, so a failure leaves the view exactly as the host built it.
/// Applying to an already rewritten view changes nothing.
pub struct DisplayRewriter {
    resolver: AncestryResolver,
    eligibility: Eligibility,
    config: EditorConfig,
}

impl DisplayRewriter {
    pub fn new(resolver: AncestryResolver, eligibility: Eligibility, config: EditorConfig) -> Self {
        Self {
            resolver,
            eligibility,
            config,
        }
    }

    /// Rewrite the single-item edit view.
    ///
    /// For an eligible item under a protecting ancestor the visibility label
    /// becomes "Password protected", the visibility control is withdrawn and
    /// a notice links to the ancestor's edit view.
    pub fn rewrite_edit_screen(
        &self,
        screen: &mut EditScreen,
        request: &RequestContext,
    ) -> RewriteOutcome {
        if request.kind.ajax {
            return RewriteOutcome::SkippedBackground;
        }

        let plan = match self.plan_edit_screen(screen.item_id) {
            Ok(Some(plan)) => plan,
            Ok(None) => return RewriteOutcome::Ineligible,
            Err(err) => {
                warn!(item_id = %screen.item_id, error = %err, "Edit view left unannotated");
                return RewriteOutcome::Failed;
            }
        };

        screen.protect_children = plan.field;
        let Some(notice) = plan.notice else {
            return RewriteOutcome::NotInherited;
        };

        let source = notice.source;
        screen.visibility.label = Visibility::PasswordProtected.label().to_string();
        screen.visibility.editable = false;
        screen.visibility.notice = Some(notice);
        debug!(
            item_id = %screen.item_id,
            ancestor_id = %source,
            "Edit view shows inherited protection"
        );
        RewriteOutcome::Inherited { source }
    }

    /// Annotate nested list rows whose protection is inherited. Returns the
    /// number of rows newly annotated.
    pub fn annotate_list(&self, list: &mut ListView, request: &RequestContext) -> usize {
        if request.kind.ajax {
            return 0;
        }

        let pending: Vec<usize> = list
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.depth > 0 && !row.has_inherited_state())
            .filter(|(_, row)| self.resolver.resolve_protection(row.item_id).is_inherited())
            .map(|(index, _)| index)
            .collect();

        for index in &pending {
            list.rows[*index]
                .states
                .push(INHERITED_STATE_LABEL.to_string());
        }
        pending.len()
    }

    /// The "protect children" checkbox for `item`, offered only on eligible
    /// items that carry a password of their own.
    pub fn protect_children_field(&self, item: &ContentItem) -> Option<ProtectChildrenField> {
        (item.has_password() && self.eligibility.is_eligible(item))
            .then(|| ProtectChildrenField::new(item.inherit_enabled))
    }

    fn plan_edit_screen(&self, id: ContentId) -> Result<Option<EditPlan>, EditorError> {
        let item = self
            .resolver
            .graph()
            .get_item(id)?
            .ok_or(EditorError::NotFound(id))?;

        if !self.eligibility.is_eligible(&item) {
            return Ok(None);
        }

        let field = item
            .has_password()
            .then(|| ProtectChildrenField::new(item.inherit_enabled));
        let notice = self
            .resolver
            .resolve_protection(id)
            .source()
            .map(|source| self.notice(source));

        Ok(Some(EditPlan { field, notice }))
    }

    fn notice(&self, source: ContentId) -> InheritedNotice {
        InheritedNotice {
            source,
            text: "Password protected by".to_string(),
            link_text: "parent post".to_string(),
            edit_url: self.config.edit_link(source),
        }
    }
}
