//! Floating windows and their host adapters.

use dockyard::{DockEvent, DockSettings, Factory, WindowId};
use dockyard_core::geometry::Rect;
use dockyard_core::math::Vec2;
use dockyard_test_utils::{HostCall, MockHosts, fixtures};

fn float_at(factory: &mut Factory, node: dockyard::NodeId, bounds: Rect) -> WindowId {
    factory.float_dockable(node, Some(bounds)).unwrap()
}

#[test]
fn test_present_pushes_geometry_to_host() {
    let mut factory = Factory::new();
    let hosts = MockHosts::new();
    hosts.install(&mut factory);
    let layout = fixtures::tool_layout(&mut factory);

    let window = float_at(&mut factory, layout.tool2, Rect::new(50.0, 60.0, 320.0, 240.0));

    let calls = hosts.calls();
    assert!(calls.contains(&HostCall::SetPosition { x: 50.0, y: 60.0 }));
    assert!(calls.contains(&HostCall::SetSize {
        width: 320.0,
        height: 240.0
    }));
    assert!(calls.contains(&HostCall::SetTitle("Tool 2".to_string())));
    assert_eq!(calls.last(), Some(&HostCall::Present { is_dialog: false }));
    assert_eq!(hosts.created(), 1);

    // Presenting again reuses the host.
    assert!(factory.present_window(window, true));
    assert_eq!(hosts.created(), 1);
    assert_eq!(hosts.calls().last(), Some(&HostCall::Present { is_dialog: true }));
}

#[test]
fn test_show_and_exit_windows() {
    let mut factory = Factory::new();
    let hosts = MockHosts::new();
    hosts.install(&mut factory);
    let layout = fixtures::ide_layout(&mut factory);
    factory.float_dockable(layout.explorer, None).unwrap();
    factory.float_dockable(layout.readme, None).unwrap();
    hosts.clear_calls();

    assert!(factory.exit_windows(layout.root));
    assert_eq!(hosts.count_exits(), 2);
    assert!(factory.show_windows(layout.root));
    assert_eq!(hosts.count_presents(), 2);

    // Only roots own windows.
    assert!(!factory.show_windows(layout.documents));
}

#[test]
fn test_save_window_reads_live_geometry() {
    let mut factory = Factory::new();
    let hosts = MockHosts::new();
    hosts.install(&mut factory);
    let layout = fixtures::tool_layout(&mut factory);
    let window = factory.float_dockable(layout.tool1, None).unwrap();

    hosts.set_live_geometry((200.0, 150.0), (640.0, 480.0));
    assert!(factory.save_window(window));
    assert_eq!(
        factory.window(window).unwrap().bounds(),
        Rect::new(200.0, 150.0, 640.0, 480.0)
    );

    // Exiting saves first.
    hosts.set_live_geometry((10.0, 20.0), (300.0, 200.0));
    assert!(factory.exit_window(window));
    assert_eq!(
        factory.window(window).unwrap().bounds(),
        Rect::new(10.0, 20.0, 300.0, 200.0)
    );
}

#[test]
fn test_window_without_host() {
    let mut factory = Factory::new();
    let layout = fixtures::tool_layout(&mut factory);
    let window = factory.float_dockable(layout.tool1, None).unwrap();

    assert!(!factory.window(window).unwrap().has_host());
    assert!(!factory.save_window(window));
    assert!(!factory.exit_window(window));
    // Still presentable: the model updates, nothing is shown.
    assert!(factory.present_window(window, false));
}

#[test]
fn test_window_offset_follows_source_window() {
    let mut factory = Factory::new();
    let layout = fixtures::tool_layout(&mut factory);
    let first = float_at(&mut factory, layout.tools, Rect::new(100.0, 100.0, 400.0, 300.0));

    // Floating out of a floating window offsets from that window.
    let second = factory.float_dockable(layout.tool2, None).unwrap();

    let bounds = factory.window(second).unwrap().bounds();
    assert_eq!(bounds.position(), Vec2::new(132.0, 132.0));
    // Both are anchored on the main root.
    assert_eq!(factory.window(first).unwrap().owner(), Some(layout.root));
    assert_eq!(factory.window(second).unwrap().owner(), Some(layout.root));
    assert!(factory.tree().validate(layout.root).is_ok());
}

#[test]
fn test_drag_window_with_magnetism() {
    let mut factory = Factory::with_settings(DockSettings::default().window_magnetism(true, 16.0));
    let hosts = MockHosts::new();
    hosts.install(&mut factory);
    let layout = fixtures::tool_layout(&mut factory);
    float_at(&mut factory, layout.tool1, Rect::new(0.0, 0.0, 100.0, 100.0));
    let moving = float_at(&mut factory, layout.tool2, Rect::new(300.0, 0.0, 100.0, 100.0));

    assert!(factory.begin_window_drag(moving));
    assert!(factory.window(moving).unwrap().is_dragging());

    // Raw position (110, 5) snaps onto the sibling's right edge.
    let position = factory.window_drag(moving, Vec2::new(-190.0, 5.0)).unwrap();
    assert_eq!(position, Vec2::new(100.0, 5.0));
    assert_eq!(hosts.last_position(), Some((100.0, 5.0)));

    // Far from any edge the raw position is kept.
    let position = factory.window_drag(moving, Vec2::new(200.0, 0.0)).unwrap();
    assert_eq!(position, Vec2::new(310.0, 5.0));

    assert!(factory.end_window_drag(moving));
    assert!(!factory.end_window_drag(moving));
    assert!(factory.window_drag(moving, Vec2::ONE).is_none());
}

#[test]
fn test_drag_window_without_magnetism() {
    let mut factory = Factory::new();
    let layout = fixtures::tool_layout(&mut factory);
    float_at(&mut factory, layout.tool1, Rect::new(0.0, 0.0, 100.0, 100.0));
    let moving = float_at(&mut factory, layout.tool2, Rect::new(300.0, 0.0, 100.0, 100.0));

    factory.begin_window_drag(moving);
    let position = factory.window_drag(moving, Vec2::new(-190.0, 5.0)).unwrap();
    assert_eq!(position, Vec2::new(110.0, 5.0));
}

#[test]
fn test_window_drag_begin_is_cancelable() {
    let mut factory = Factory::with_settings(DockSettings::default().event_history_limit(16));
    let layout = fixtures::tool_layout(&mut factory);
    let window = factory.float_dockable(layout.tool1, None).unwrap();
    factory.subscribe(|event| {
        if matches!(event, DockEvent::WindowMoveDragBegin { .. }) {
            event.cancel();
        }
    });

    assert!(!factory.begin_window_drag(window));
    assert!(!factory.window(window).unwrap().is_dragging());
    assert!(
        !factory
            .events()
            .history()
            .any(|e| matches!(e, DockEvent::WindowMoveDrag { .. }))
    );
}

#[test]
fn test_add_and_remove_window() {
    let mut factory = Factory::new();
    let layout = fixtures::tool_layout(&mut factory);
    let window = factory.create_dock_window("Scratch", Rect::new(0.0, 0.0, 200.0, 200.0));
    let scratch_root = factory.create_root_dock("ScratchRoot");

    assert!(factory.set_window_layout(window, scratch_root));
    assert!(!factory.set_window_layout(window, scratch_root));
    assert!(factory.add_window(layout.root, window));
    assert!(!factory.add_window(layout.root, window));
    assert_eq!(
        factory.dockable(layout.root).unwrap().root_state().unwrap().windows(),
        &[window]
    );
    assert!(factory.tree().validate(layout.root).is_ok());

    assert!(factory.remove_window(window));
    assert_eq!(factory.window(window).unwrap().owner(), None);
    assert!(factory.dockable(layout.root).unwrap().root_state().unwrap().windows().is_empty());
    assert!(!factory.remove_window(window));
}
