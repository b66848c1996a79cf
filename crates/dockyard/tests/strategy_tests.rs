//! Drop strategies: tree shapes after each operation and validation failures.

use std::cell::Cell;
use std::rc::Rc;

use dockyard::strategy::strategy_for;
use dockyard::{
    Alignment, DockError, DockOperation, DockOperationMask, DockSettings, DockStrategy, Factory,
    FillStrategy, KindTag, Orientation, SplitStrategy, WindowStrategy,
};
use dockyard_core::geometry::Rect;
use dockyard_test_utils::{MockHosts, fixtures};

#[test]
fn test_split_left_wraps_target() {
    let mut factory = Factory::new();
    let layout = fixtures::tool_layout(&mut factory);

    assert!(factory.split_to_dock(layout.tools, layout.tool2, DockOperation::Left));

    let root = factory.dockable(layout.root).unwrap().dock().unwrap();
    assert_eq!(root.visible().len(), 1);
    let split = root.visible()[0];
    let split_node = factory.dockable(split).unwrap();
    assert_eq!(split_node.tag(), KindTag::ProportionalDock);
    assert_eq!(split_node.orientation(), Some(Orientation::Horizontal));

    let children = split_node.dock().unwrap().visible().to_vec();
    assert_eq!(children.len(), 3);
    let holder = factory.dockable(children[0]).unwrap();
    assert_eq!(holder.tag(), KindTag::ToolDock);
    assert_eq!(holder.tab_host().unwrap().alignment, Alignment::Left);
    assert_eq!(holder.dock().unwrap().visible(), &[layout.tool2]);
    assert!(factory.dockable(children[1]).unwrap().is_splitter());
    assert_eq!(children[2], layout.tools);
    assert_eq!(
        factory.dockable(layout.tools).unwrap().dock().unwrap().visible(),
        &[layout.tool1]
    );

    assert_eq!(holder.proportion(), 0.5);
    assert_eq!(factory.dockable(layout.tools).unwrap().proportion(), 0.5);
    assert_eq!(split_node.dock().unwrap().active(), Some(children[0]));

    let focused = factory.dockable(layout.root).unwrap().dock().unwrap().focused();
    assert_eq!(focused, Some(layout.tool2));
    assert!(factory.tree().validate(layout.root).is_ok());
}

#[test]
fn test_split_bottom_puts_holder_after_target() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);

    assert!(factory.split_to_dock_with(layout.documents, layout.main_rs, DockOperation::Bottom, 0.3));

    let holder = factory.dockable(layout.main_rs).unwrap().owner().unwrap();
    let split = factory.dockable(holder).unwrap().owner().unwrap();
    let split_node = factory.dockable(split).unwrap();
    assert_eq!(split_node.orientation(), Some(Orientation::Vertical));
    let children = split_node.dock().unwrap().visible();
    assert_eq!(children[0], layout.documents);
    assert_eq!(children[2], holder);
    assert_eq!(factory.dockable(holder).unwrap().tag(), KindTag::DocumentDock);
    assert_eq!(factory.dockable(holder).unwrap().proportion(), 0.3);

    // The new split took the target's place and share in the outer split.
    assert_eq!(split_node.owner(), Some(layout.main));
    assert_eq!(split_node.proportion(), 0.75);
    assert!(factory.tree().validate(layout.root).is_ok());
}

#[test]
fn test_split_a_dock_source_moves_it_whole() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);

    assert!(factory.split_to_dock(layout.documents, layout.left, DockOperation::Right));

    let owner = factory.dockable(layout.left).unwrap().owner().unwrap();
    let split = factory.dockable(owner).unwrap();
    assert_eq!(split.dock().unwrap().visible()[2], layout.left);
    assert_eq!(
        factory.dockable(layout.left).unwrap().dock().unwrap().visible(),
        &[layout.explorer, layout.search]
    );
    // `main` lost its left child and was unwrapped into the new split.
    assert!(!factory.tree().contains(layout.main));
    assert!(factory.tree().validate(layout.root).is_ok());
}

#[test]
fn test_split_dock_out_of_its_own_parent_leaves_no_stray_splitter() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);

    assert!(factory.split_to_dock(layout.main, layout.documents, DockOperation::Left));

    // `main` kept only the left tools and was unwrapped into the new split.
    assert!(!factory.tree().contains(layout.main));
    let split = factory.dockable(layout.documents).unwrap().owner().unwrap();
    let children = factory.dockable(split).unwrap().dock().unwrap().visible().to_vec();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0], layout.documents);
    assert!(factory.dockable(children[1]).unwrap().is_splitter());
    assert_eq!(children[2], layout.left);
    assert_eq!(factory.dockable(layout.left).unwrap().proportion(), 0.5);

    for (_, node) in factory.tree().iter() {
        if node.tag() != KindTag::ProportionalDock {
            continue;
        }
        let visible = node.dock().unwrap().visible();
        let splitter_at = |i: usize| factory.dockable(visible[i]).unwrap().is_splitter();
        assert!(!splitter_at(0));
        assert!(!splitter_at(visible.len() - 1));
    }
    assert!(factory.tree().validate(layout.root).is_ok());
}

#[test]
fn test_fill_moves_leaf_and_collapses_source() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    assert!(factory.split_to_dock(layout.documents, layout.main_rs, DockOperation::Right));
    let holder = factory.dockable(layout.main_rs).unwrap().owner().unwrap();

    assert!(FillStrategy.execute(&mut factory, layout.readme, Some(layout.documents), holder, true));

    assert_eq!(factory.dockable(layout.readme).unwrap().owner(), Some(holder));
    let docs = factory.dockable(holder).unwrap().dock().unwrap();
    assert_eq!(docs.visible(), &[layout.main_rs, layout.readme]);
    assert_eq!(docs.active(), Some(layout.readme));
    assert!(!factory.tree().contains(layout.documents));
    assert!(factory.tree().validate(layout.root).is_ok());
}

#[test]
fn test_fill_merges_tab_hosts() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    assert!(factory.split_to_dock(layout.documents, layout.main_rs, DockOperation::Right));
    let holder = factory.dockable(layout.main_rs).unwrap().owner().unwrap();
    let holder_owner = factory.dockable(holder).unwrap().owner();

    assert!(FillStrategy.execute(&mut factory, holder, holder_owner, layout.documents, true));

    let docs = factory.dockable(layout.documents).unwrap().dock().unwrap();
    assert_eq!(docs.visible(), &[layout.readme, layout.main_rs]);
    assert_eq!(docs.active(), Some(layout.main_rs));
    assert!(!factory.tree().contains(holder));
    assert!(factory.tree().validate(layout.root).is_ok());
}

#[test]
fn test_fill_rejects_kind_mismatch_unless_allowed() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    let fill = FillStrategy;

    assert_eq!(
        fill.validate(&factory, layout.explorer, Some(layout.left), layout.documents),
        Err(DockError::KindMismatch)
    );
    assert_eq!(
        fill.validate(&factory, layout.explorer, Some(layout.left), layout.main),
        Err(DockError::NotATabHost)
    );

    let mut factory = Factory::with_settings(DockSettings::default().allow_cross_kind_fill(true));
    let layout = fixtures::ide_layout(&mut factory);
    assert!(FillStrategy.execute(&mut factory, layout.explorer, Some(layout.left), layout.documents, true));
    assert_eq!(factory.dockable(layout.explorer).unwrap().owner(), Some(layout.documents));
}

#[test]
fn test_fill_rejects_empty_tab_host() {
    let mut factory = Factory::with_settings(DockSettings::default().event_history_limit(32));
    let layout = fixtures::ide_layout(&mut factory);
    let empty = factory.create_document_dock("Empty");
    assert!(factory.add_dockable(layout.main, empty));
    let before = factory.events().history().count();

    assert_eq!(
        FillStrategy.validate(&factory, empty, Some(layout.main), layout.documents),
        Err(DockError::EmptySource)
    );
    assert!(!FillStrategy.execute(&mut factory, empty, Some(layout.main), layout.documents, true));
    assert_eq!(factory.events().history().count(), before);
    assert_eq!(factory.dockable(empty).unwrap().owner(), Some(layout.main));
}

#[test]
fn test_fill_into_own_owner_is_rejected() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);

    assert_eq!(
        FillStrategy.validate(&factory, layout.readme, Some(layout.documents), layout.documents),
        Err(DockError::AlreadyInTarget)
    );
}

#[test]
fn test_common_validation_failures() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    let left = SplitStrategy::new(DockOperation::Left);

    assert_eq!(
        left.validate(&factory, layout.documents, Some(layout.main), layout.documents),
        Err(DockError::SelfDrop)
    );
    assert_eq!(
        left.validate(&factory, layout.main, Some(layout.root), layout.documents),
        Err(DockError::TargetInsideSource)
    );
    assert_eq!(
        left.validate(&factory, layout.readme, Some(layout.left), layout.documents),
        Err(DockError::OwnerMismatch)
    );
    assert_eq!(
        left.validate(&factory, layout.readme, Some(layout.documents), layout.explorer),
        Err(DockError::TargetNotDock)
    );
    assert_eq!(
        left.validate(&factory, layout.readme, Some(layout.documents), layout.root),
        Err(DockError::SplitRoot)
    );

    let splitter = factory.dockable(layout.main).unwrap().dock().unwrap().visible()[1];
    assert_eq!(
        left.validate(&factory, splitter, Some(layout.main), layout.documents),
        Err(DockError::Immovable)
    );
}

#[test]
fn test_allowed_operations_mask_is_honored() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    factory
        .dockable_mut(layout.left)
        .unwrap()
        .dock_mut()
        .unwrap()
        .allowed_operations = DockOperationMask::FILL;

    let left = SplitStrategy::new(DockOperation::Left);
    assert_eq!(
        left.validate(&factory, layout.readme, Some(layout.documents), layout.left),
        Err(DockError::OperationNotAllowed(DockOperation::Left))
    );
    // Fill still passes the mask; it fails later on the kind check.
    assert_eq!(
        FillStrategy.validate(&factory, layout.readme, Some(layout.documents), layout.left),
        Err(DockError::KindMismatch)
    );
}

#[test]
fn test_split_only_child_is_rejected() {
    let mut factory = Factory::new();
    let layout = fixtures::tool_layout(&mut factory);
    factory.remove_dockable(layout.tool2, false);

    assert_eq!(
        SplitStrategy::new(DockOperation::Top).validate(
            &factory,
            layout.tool1,
            Some(layout.tools),
            layout.tools
        ),
        Err(DockError::SplitOnlyChild)
    );
}

#[test]
fn test_dry_run_does_not_mutate() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    let before = factory.export_layout(layout.root).unwrap();
    let events = Rc::new(Cell::new(0));
    let counter = Rc::clone(&events);
    factory.subscribe(move |_| counter.set(counter.get() + 1));

    for op in [
        DockOperation::Left,
        DockOperation::Right,
        DockOperation::Top,
        DockOperation::Bottom,
        DockOperation::Window,
    ] {
        assert!(
            strategy_for(op).execute(&mut factory, layout.readme, Some(layout.documents), layout.documents, false),
            "{:?} should be possible",
            op
        );
    }

    assert_eq!(factory.export_layout(layout.root).unwrap(), before);
    assert_eq!(events.get(), 0);
    assert!(factory.tree().windows().next().is_none());
}

#[test]
fn test_none_operation_always_rejects() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);

    let mut none = strategy_for(DockOperation::None);
    assert_eq!(
        none.validate(&factory, layout.readme, Some(layout.documents), layout.documents),
        Err(DockError::Rejected)
    );
    assert!(!none.execute(&mut factory, layout.readme, Some(layout.documents), layout.left, true));
    assert!(!factory.split_to_dock(layout.documents, layout.readme, DockOperation::Fill));
}

#[test]
fn test_float_leaf_into_window() {
    let mut factory = Factory::new();
    let hosts = MockHosts::new();
    hosts.install(&mut factory);
    let layout = fixtures::ide_layout(&mut factory);

    let window = factory.float_dockable(layout.explorer, None).unwrap();

    let w = factory.window(window).unwrap();
    assert_eq!(w.owner(), Some(layout.root));
    assert_eq!(w.title, "Explorer");
    assert_eq!(w.bounds(), Rect::new(32.0, 32.0, 300.0, 400.0));
    assert!(w.has_host());
    assert_eq!(hosts.count_presents(), 1);

    let window_root = w.layout().unwrap();
    let window_root_node = factory.dockable(window_root).unwrap();
    assert!(window_root_node.is_root());
    let holder = window_root_node.dock().unwrap().visible()[0];
    assert_eq!(factory.dockable(holder).unwrap().tag(), KindTag::ToolDock);
    assert_eq!(factory.dockable(layout.explorer).unwrap().owner(), Some(holder));

    assert_eq!(factory.find_root(layout.explorer), Some(window_root));
    assert_eq!(factory.tree().host_root(layout.explorer), Some(layout.root));
    let anchored = factory.dockable(layout.root).unwrap().root_state().unwrap().windows();
    assert_eq!(anchored, &[window]);
    assert!(factory.tree().validate(layout.root).is_ok());
}

#[test]
fn test_float_dock_keeps_it_whole() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    let placement = Rect::new(400.0, 200.0, 250.0, 300.0);

    let mut strategy = WindowStrategy::new(Some(placement));
    assert!(strategy.execute(&mut factory, layout.left, Some(layout.main), layout.main, true));
    let window = strategy.created_window().unwrap();

    let w = factory.window(window).unwrap();
    assert_eq!(w.bounds(), placement);
    let window_root = factory.dockable(w.layout().unwrap()).unwrap();
    assert_eq!(window_root.dock().unwrap().visible(), &[layout.left]);

    // `main` unwrapped to its remaining child.
    let root = factory.dockable(layout.root).unwrap().dock().unwrap();
    assert_eq!(root.visible(), &[layout.documents]);
    assert!(factory.tree().validate(layout.root).is_ok());
}

#[test]
fn test_float_respects_can_float() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    let d = factory.dockable_mut(layout.readme).unwrap();
    let flags = d.flags() - dockyard::DockableFlags::CAN_FLOAT;
    d.set_flags(flags);

    assert_eq!(
        WindowStrategy::new(None).validate(&factory, layout.readme, Some(layout.documents), layout.documents),
        Err(DockError::CannotFloat)
    );
    assert!(factory.float_dockable(layout.readme, None).is_none());
}

#[test]
fn test_closing_emptied_window_layout_discards_window() {
    let mut factory = Factory::new();
    let hosts = MockHosts::new();
    hosts.install(&mut factory);
    let layout = fixtures::tool_layout(&mut factory);

    let window = factory.float_dockable(layout.tool2, None).unwrap();
    assert!(factory.close_dockable(layout.tool2));

    assert!(factory.window(window).is_none());
    assert_eq!(hosts.count_exits(), 1);
    assert!(factory.dockable(layout.root).unwrap().root_state().unwrap().windows().is_empty());
    assert!(factory.tree().validate(layout.root).is_ok());
}
