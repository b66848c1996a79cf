//! Structural invariants of the dockable tree under sequences of factory operations.

use std::collections::HashMap;

use dockyard::{DockOperation, DockOperationMask, Factory, NodeId};
use dockyard_test_utils::fixtures;

fn assert_valid(factory: &Factory, root: NodeId) {
    if let Err(e) = factory.tree().validate(root) {
        panic!("invalid tree: {}", e);
    }
}

/// Every attached dockable appears in exactly one list of exactly one owner.
fn assert_exclusive_membership(factory: &Factory) {
    let mut seen: HashMap<NodeId, usize> = HashMap::new();
    for (_, dockable) in factory.tree().iter() {
        for child in dockable.children() {
            *seen.entry(child).or_default() += 1;
        }
    }
    for (node, count) in seen {
        assert_eq!(count, 1, "{} is listed {} times", node, count);
    }
    for (node, dockable) in factory.tree().iter() {
        if let Some(owner) = dockable.owner() {
            let holder = factory.dockable(owner).unwrap();
            assert!(
                holder.children().contains(&node),
                "{} claims owner {} which does not list it",
                node,
                owner
            );
        }
    }
}

#[test]
fn test_fixture_layout_is_valid() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);

    assert_valid(&factory, layout.root);
    assert_exclusive_membership(&factory);
    assert_eq!(factory.dockable(layout.main).unwrap().owner(), Some(layout.root));
    assert_eq!(factory.dockable(layout.explorer).unwrap().owner(), Some(layout.left));

    // init_layout focuses the deepest active leaf.
    let root = factory.dockable(layout.root).unwrap().dock().unwrap();
    assert_eq!(root.focused(), Some(layout.explorer));
    assert!(factory.dockable(layout.left).unwrap().dock().unwrap().is_active());
}

#[test]
fn test_invariants_hold_after_every_operation() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);

    assert!(factory.move_dockable(layout.left, layout.documents, layout.search, None));
    assert_valid(&factory, layout.root);
    assert_exclusive_membership(&factory);
    assert_eq!(factory.dockable(layout.search).unwrap().owner(), Some(layout.documents));

    assert!(factory.swap_dockable(layout.readme, layout.explorer));
    assert_valid(&factory, layout.root);
    assert_exclusive_membership(&factory);
    assert_eq!(factory.dockable(layout.readme).unwrap().owner(), Some(layout.left));
    assert_eq!(factory.dockable(layout.explorer).unwrap().owner(), Some(layout.documents));

    assert!(factory.split_to_dock(layout.documents, layout.main_rs, DockOperation::Right));
    assert_valid(&factory, layout.root);
    assert_exclusive_membership(&factory);

    assert!(factory.pin_dockable(layout.readme));
    assert_valid(&factory, layout.root);
    assert_exclusive_membership(&factory);

    assert!(factory.float_dockable(layout.search, None).is_some());
    assert_valid(&factory, layout.root);
    assert_exclusive_membership(&factory);

    assert!(factory.close_dockable(layout.explorer));
    assert_valid(&factory, layout.root);
    assert_exclusive_membership(&factory);
    assert!(!factory.tree().contains(layout.explorer));
}

#[test]
fn test_emptied_dock_collapses() {
    let mut factory = Factory::new();
    let layout = fixtures::tool_layout(&mut factory);

    assert!(factory.remove_dockable(layout.tool1, true));
    assert!(factory.tree().contains(layout.tools));
    assert!(factory.remove_dockable(layout.tool2, true));

    assert!(!factory.tree().contains(layout.tools));
    let root = factory.dockable(layout.root).unwrap().dock().unwrap();
    assert!(root.visible().is_empty());
    assert_eq!(root.active(), None);
    assert_valid(&factory, layout.root);
}

#[test]
fn test_remove_without_collapse_keeps_dock() {
    let mut factory = Factory::new();
    let layout = fixtures::tool_layout(&mut factory);

    factory.remove_dockable(layout.tool1, false);
    factory.remove_dockable(layout.tool2, false);

    assert!(factory.tree().contains(layout.tools));
    // Removed dockables are detached, not destroyed.
    assert!(factory.tree().contains(layout.tool1));
    assert_eq!(factory.dockable(layout.tool1).unwrap().owner(), None);
    assert_valid(&factory, layout.root);
}

#[test]
fn test_single_child_proportional_is_unwrapped() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);

    assert!(factory.close_dockable(layout.explorer));
    assert!(factory.close_dockable(layout.search));

    assert!(!factory.tree().contains(layout.left));
    assert!(!factory.tree().contains(layout.main));
    let root = factory.dockable(layout.root).unwrap().dock().unwrap();
    assert_eq!(root.visible(), &[layout.documents]);
    assert_eq!(factory.dockable(layout.documents).unwrap().owner(), Some(layout.root));
    assert_valid(&factory, layout.root);
    assert_exclusive_membership(&factory);
}

#[test]
fn test_add_rejects_attached_and_cyclic_nodes() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    let len = factory.tree().len();

    // Already attached.
    assert!(!factory.add_dockable(layout.documents, layout.explorer));
    // Would make `main` its own ancestor.
    assert!(!factory.add_dockable(layout.left, layout.main));

    // Leaves hold nothing.
    let doc = factory.create_document("Notes", "notes.md");
    assert!(!factory.add_dockable(layout.readme, doc));

    assert_eq!(factory.tree().len(), len + 1);
    assert_valid(&factory, layout.root);
}

#[test]
fn test_insert_clamps_index() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    let first = factory.create_document("First", "first.md");
    let last = factory.create_document("Last", "last.md");

    assert!(factory.insert_dockable(layout.documents, 0, first));
    assert!(factory.insert_dockable(layout.documents, 99, last));

    let docs = factory.dockable(layout.documents).unwrap().dock().unwrap();
    assert_eq!(
        docs.visible(),
        &[first, layout.readme, layout.main_rs, last]
    );
}

#[test]
fn test_move_within_dock_reorders() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);

    assert!(factory.move_dockable(layout.documents, layout.documents, layout.readme, Some(1)));
    let docs = factory.dockable(layout.documents).unwrap().dock().unwrap();
    assert_eq!(docs.visible(), &[layout.main_rs, layout.readme]);

    // The source dock must be the actual owner.
    assert!(!factory.move_dockable(layout.left, layout.documents, layout.readme, None));
}

#[test]
fn test_move_respects_target_allowed_operations() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    factory
        .dockable_mut(layout.documents)
        .unwrap()
        .dock_mut()
        .unwrap()
        .allowed_operations = DockOperationMask::SPLIT;

    assert!(!factory.move_dockable(layout.left, layout.documents, layout.search, None));
    assert_eq!(factory.dockable(layout.search).unwrap().owner(), Some(layout.left));
    assert_eq!(
        factory.dockable(layout.documents).unwrap().dock().unwrap().visible(),
        &[layout.readme, layout.main_rs]
    );

    // Reordering inside the dock is not a fill.
    assert!(factory.move_dockable(layout.documents, layout.documents, layout.readme, None));
    assert_eq!(
        factory.dockable(layout.documents).unwrap().dock().unwrap().visible(),
        &[layout.main_rs, layout.readme]
    );
    assert_valid(&factory, layout.root);
}

#[test]
fn test_swap_across_roots_keeps_focus_in_each_tree() {
    let mut factory = Factory::new();
    let layout = fixtures::tool_layout(&mut factory);
    factory.float_dockable(layout.tool2, None).unwrap();
    assert!(factory.set_active_dockable(layout.tool1));
    assert_eq!(
        factory.dockable(layout.root).unwrap().dock().unwrap().focused(),
        Some(layout.tool1)
    );

    assert!(factory.swap_dockable(layout.tool1, layout.tool2));

    let window_root = factory.find_root(layout.tool1).unwrap();
    assert_ne!(window_root, layout.root);
    assert_eq!(factory.find_root(layout.tool2), Some(layout.root));
    for root in [layout.root, window_root] {
        if let Some(focused) = factory.dockable(root).unwrap().dock().unwrap().focused() {
            assert_eq!(factory.find_root(focused), Some(root));
        }
        assert_valid(&factory, root);
    }
    assert_exclusive_membership(&factory);
}

#[test]
fn test_find_by_id_searches_below_root() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);

    assert_eq!(factory.find_by_id(layout.root, "MainRs"), Some(layout.main_rs));
    assert_eq!(factory.find_by_id(layout.root, "Root"), None);
    assert_eq!(factory.find_root(layout.search), Some(layout.root));
    assert_eq!(factory.tree().content_count(layout.main), 2);
}
