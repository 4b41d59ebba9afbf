//! End-to-end behaviour through the host hook entry points.

use std::sync::Arc;

use inherit_editor::{EditScreen, ListRow, ListView, RewriteOutcome, SaveOutcome};
use inherit_host::{HostCollaborators, InheritConfig, InheritanceHooks};
use inherit_types::{
    Actor, ContentGraph, ContentId, ContentItem, InMemoryHost, MetaStore, RequestContext,
    EDIT_CONTENT_CAPABILITY, INHERIT_META_KEY, LEGACY_INHERIT_META_KEY, PROTECT_CHILDREN_FIELD,
};

const ROOT: ContentId = ContentId(1);
const CHILD: ContentId = ContentId(2);
const GRANDCHILD: ContentId = ContentId(3);

fn page(id: ContentId) -> ContentItem {
    ContentItem::new(id, "page")
}

/// R ("abc123", inherit as given) -> C1 -> C2
fn tree(inherit: bool) -> (Arc<InMemoryHost>, InheritanceHooks) {
    let host = Arc::new(InMemoryHost::new());
    host.insert(page(ROOT).with_password("abc123").with_inherit(inherit)).unwrap();
    host.insert(page(CHILD).with_parent(ROOT)).unwrap();
    host.insert(page(GRANDCHILD).with_parent(CHILD)).unwrap();

    let hooks = InheritanceHooks::new(
        HostCollaborators::in_memory(host.clone()),
        InheritConfig::default(),
    );
    (host, hooks)
}

fn editor() -> Actor {
    Actor::new("editor").with_capability(EDIT_CONTENT_CAPABILITY)
}

#[test]
fn credential_for_root_opens_the_whole_subtree() {
    let (_host, hooks) = tree(true);
    let anonymous = RequestContext::anonymous();

    assert!(hooks.on_render(GRANDCHILD, &anonymous, false));
    assert!(hooks.challenge_required(GRANDCHILD, &anonymous).unwrap());

    let issued = hooks.on_password_submit(ROOT, "abc123").unwrap();
    let request = RequestContext::anonymous().with_credential(issued.name, issued.value);

    assert!(!hooks.on_render(GRANDCHILD, &request, false));
    assert!(!hooks.on_render(CHILD, &request, false));
    assert!(!hooks.challenge_required(ROOT, &request).unwrap());
}

#[test]
fn disabled_inheritance_leaves_children_to_their_own_password() {
    let (host, hooks) = tree(false);
    let anonymous = RequestContext::anonymous();

    assert!(!hooks.on_render(CHILD, &anonymous, false));
    assert!(!hooks.challenge_required(CHILD, &anonymous).unwrap());
    assert!(hooks.challenge_required(ROOT, &anonymous).unwrap());

    host.insert(page(CHILD).with_parent(ROOT).with_password("own")).unwrap();
    assert!(hooks.challenge_required(CHILD, &anonymous).unwrap());
}

#[test]
fn invalid_credential_never_grants_access() {
    let (_host, hooks) = tree(true);
    for credential in ["", "abc123", "$inherit-sha256$00$00"] {
        let request = RequestContext::anonymous().with_credential("postpass", credential);
        assert!(hooks.on_render(GRANDCHILD, &request, false));
    }

    let mut tampered = hooks.on_password_submit(ROOT, "abc123").unwrap().value;
    let last = tampered.pop().unwrap();
    tampered.push(if last == '0' { '1' } else { '0' });
    let request = RequestContext::anonymous().with_credential("postpass", tampered);
    assert!(hooks.on_render(GRANDCHILD, &request, false));
}

#[test]
fn editor_enabling_flag_protects_existing_children() {
    let (host, hooks) = tree(false);
    let save = RequestContext::for_actor(editor()).with_field(PROTECT_CHILDREN_FIELD, "on");

    assert_eq!(hooks.on_save(ROOT, &save), SaveOutcome::Written(true));
    assert_eq!(hooks.on_save(ROOT, &save), SaveOutcome::Unchanged(true));
    assert!(host.get_item(ROOT).unwrap().unwrap().inherit_enabled);
    assert!(hooks.on_render(GRANDCHILD, &RequestContext::anonymous(), false));

    // The child's own stored protection is unchanged.
    let child = host.get_item(CHILD).unwrap().unwrap();
    assert!(!child.has_password());
}

#[test]
fn structured_editor_save_is_deferred_then_applied() {
    let (host, hooks) = tree(false);

    let SaveOutcome::Deferred(deferred) = hooks.on_save(ROOT, &RequestContext::for_actor(editor()))
    else {
        panic!("bodyless save should be deferred");
    };
    assert_eq!(host.get_meta(ROOT, INHERIT_META_KEY).unwrap(), None);

    assert_eq!(
        hooks.on_structured_save_complete(deferred, Some(true)),
        SaveOutcome::Written(true)
    );
    assert!(hooks.on_render(CHILD, &RequestContext::anonymous(), false));
}

#[test]
fn bodyless_save_without_capability_never_protects_subtree() {
    let (host, hooks) = tree(false);
    let visitor = RequestContext::for_actor(Actor::new("visitor"));

    assert!(matches!(
        hooks.on_save(ROOT, &visitor.clone().autosave()),
        SaveOutcome::Skipped(_)
    ));
    assert!(matches!(hooks.on_save(ROOT, &visitor), SaveOutcome::Skipped(_)));
    assert_eq!(host.get_meta(ROOT, INHERIT_META_KEY).unwrap(), None);
    assert!(!hooks.on_render(CHILD, &RequestContext::anonymous(), false));
}

#[test]
fn edit_screen_of_descendant_points_at_protecting_root() {
    let (host, hooks) = tree(true);
    let mut screen = EditScreen::for_item(&host.get_item(GRANDCHILD).unwrap().unwrap());

    let outcome = hooks.on_render_edit_screen(&mut screen, &RequestContext::for_actor(editor()));
    assert_eq!(outcome, RewriteOutcome::Inherited { source: ROOT });
    assert_eq!(screen.visibility.label, "Password protected");
    assert!(!screen.visibility.editable);
    assert_eq!(
        screen.visibility.notice.as_ref().map(|n| n.edit_url.as_str()),
        Some("/admin/post.php?post=1&action=edit")
    );
}

#[test]
fn list_view_marks_inherited_rows() {
    let (_host, hooks) = tree(true);
    let mut list = ListView {
        rows: vec![
            ListRow::new(ROOT, 0, "Root"),
            ListRow::new(CHILD, 1, "Child"),
            ListRow::new(GRANDCHILD, 2, "Grandchild"),
        ],
    };

    assert_eq!(hooks.on_render_list(&mut list, &RequestContext::anonymous()), 2);
    assert!(!list.rows[0].has_inherited_state());
    assert!(list.rows[1].has_inherited_state());
    assert!(list.rows[2].has_inherited_state());
}

#[test]
fn upgrade_migrates_legacy_flag_and_activates_inheritance() {
    let (host, hooks) = tree(false);
    host.set_meta(ROOT, LEGACY_INHERIT_META_KEY, "on").unwrap();
    assert!(!hooks.on_render(CHILD, &RequestContext::anonymous(), false));

    let report = hooks.on_load().unwrap().expect("first load migrates");
    assert_eq!(report.migrated, 1);
    assert_eq!(host.get_meta(ROOT, LEGACY_INHERIT_META_KEY).unwrap(), None);
    assert!(hooks.on_render(CHILD, &RequestContext::anonymous(), false));

    assert!(hooks.on_load().unwrap().is_none());
}

#[test]
fn flag_meta_is_guarded() {
    let (_host, hooks) = tree(true);
    assert!(hooks.is_protected_meta(INHERIT_META_KEY, false));
    assert_eq!(hooks.can_edit_meta(INHERIT_META_KEY, Some(&editor())), Some(true));
    assert_eq!(
        hooks.can_edit_meta(INHERIT_META_KEY, Some(&Actor::new("viewer"))),
        Some(false)
    );
    assert_eq!(hooks.meta_registration().value_type, "boolean");
}
