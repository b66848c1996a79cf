//! The vetoable close protocol: close hooks, cancelable events and async handlers.

use std::cell::Cell;
use std::rc::Rc;

use dockyard::factory::DockableClosingHandler;
use dockyard::{CloseTarget, DockEvent, DockSettings, Dockable, Factory};
use dockyard_test_utils::{MockHosts, fixtures};
use futures_lite::future::BoxedLocal;

fn veto_ids(ids: &'static [&'static str]) -> DockableClosingHandler {
    Rc::new(move |d: &Dockable| -> BoxedLocal<bool> {
        let cancel = ids.iter().any(|id| *id == d.id());
        Box::pin(async move { cancel })
    })
}

#[test]
fn test_close_hook_vetoes_close() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    factory
        .dockable_mut(layout.readme)
        .unwrap()
        .set_on_close(Some(Rc::new(|_: &Dockable| false)));

    assert!(!factory.close_dockable(layout.readme));
    assert_eq!(factory.dockable(layout.readme).unwrap().owner(), Some(layout.documents));

    factory.dockable_mut(layout.readme).unwrap().set_on_close(None);
    assert!(factory.close_dockable(layout.readme));
    assert!(!factory.tree().contains(layout.readme));
}

#[test]
fn test_close_layout_is_atomic_under_veto() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    let before = factory.export_layout(layout.root).unwrap();
    let len = factory.tree().len();
    factory
        .dockable_mut(layout.main_rs)
        .unwrap()
        .set_on_close(Some(Rc::new(|_: &Dockable| false)));

    assert!(!factory.close_layout(layout.root));
    assert_eq!(factory.tree().len(), len);
    assert_eq!(factory.export_layout(layout.root).unwrap(), before);

    factory.dockable_mut(layout.main_rs).unwrap().set_on_close(None);
    assert!(factory.close_layout(layout.root));
    assert_eq!(factory.tree().len(), 1);
    let root = factory.dockable(layout.root).unwrap().dock().unwrap();
    assert!(root.visible().is_empty());
    assert_eq!(root.focused(), None);
    assert!(factory.tree().validate(layout.root).is_ok());
}

#[test]
fn test_close_layout_discards_windows() {
    let mut factory = Factory::new();
    let hosts = MockHosts::new();
    hosts.install(&mut factory);
    let layout = fixtures::ide_layout(&mut factory);
    let window = factory.float_dockable(layout.search, None).unwrap();

    assert!(factory.close_layout(layout.root));
    assert!(factory.window(window).is_none());
    assert!(!factory.tree().contains(layout.search));
    assert_eq!(hosts.count_exits(), 1);
}

#[test]
fn test_subscriber_can_cancel_close() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    let readme = layout.readme;
    factory.subscribe(move |event| {
        if let DockEvent::DockableClosing { dockable, .. } = event
            && *dockable == readme
        {
            event.cancel();
        }
    });

    assert!(!factory.close_dockable(layout.readme));
    assert!(factory.tree().contains(layout.readme));
    assert!(factory.close_dockable(layout.main_rs));
}

#[test]
fn test_closed_event_reports_id() {
    let mut factory = Factory::with_settings(DockSettings::default().event_history_limit(64));
    let layout = fixtures::ide_layout(&mut factory);

    assert!(factory.close_dockable(layout.readme));
    let closed = factory
        .events()
        .history()
        .find_map(|e| match e {
            DockEvent::DockableClosed { id, .. } => Some(id.clone()),
            _ => None,
        });
    assert_eq!(closed.as_deref(), Some("Readme"));
}

#[test]
fn test_async_handler_vetoes() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    factory.set_dockable_closing_async(Some(veto_ids(&["Readme"])));

    assert!(!pollster::block_on(factory.close_dockable_async(layout.readme)));
    assert!(factory.tree().contains(layout.readme));
    assert!(pollster::block_on(factory.close_dockable_async(layout.main_rs)));
    assert!(!factory.tree().contains(layout.main_rs));
}

#[test]
fn test_async_handler_runs_only_after_sync_vetoes_pass() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    factory.set_dockable_closing_async(Some(Rc::new(move |_: &Dockable| -> BoxedLocal<bool> {
        counter.set(counter.get() + 1);
        Box::pin(async { false })
    })));
    factory
        .dockable_mut(layout.readme)
        .unwrap()
        .set_on_close(Some(Rc::new(|_: &Dockable| false)));

    assert!(!factory.close_dockable(layout.readme));
    assert_eq!(calls.get(), 0);
    assert!(factory.close_dockable(layout.main_rs));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_factory_usable_while_close_is_pending() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    factory.set_dockable_closing_async(Some(veto_ids(&[])));

    let ticket = factory.request_close(layout.readme).unwrap();
    assert!(ticket.is_pending());
    assert_eq!(ticket.target(), CloseTarget::Dockable(layout.readme));

    assert!(factory.set_active_dockable(layout.main_rs));

    let decision = pollster::block_on(ticket.resolve());
    assert!(!decision.is_cancelled());
    assert!(factory.complete_close(decision));
    assert!(!factory.tree().contains(layout.readme));
}

#[test]
fn test_stale_decision_is_ignored() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);

    let decision = factory.request_close(layout.readme).unwrap().resolve_blocking();
    assert!(factory.close_dockable(layout.readme));

    assert!(!factory.complete_close(decision));
}

#[test]
fn test_request_close_rejects_uncloseable() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    let d = factory.dockable_mut(layout.readme).unwrap();
    let flags = d.flags() - dockyard::DockableFlags::CAN_CLOSE;
    d.set_flags(flags);

    assert!(factory.request_close(layout.readme).is_none());

    // Window layouts close with their window.
    let window = factory.float_dockable(layout.explorer, None).unwrap();
    let window_root = factory.window(window).unwrap().layout().unwrap();
    assert!(factory.request_close(window_root).is_none());
}

#[test]
fn test_window_close_runs_layout_hooks() {
    let mut factory = Factory::new();
    let hosts = MockHosts::new();
    hosts.install(&mut factory);
    let layout = fixtures::ide_layout(&mut factory);
    let window = factory.float_dockable(layout.explorer, None).unwrap();
    factory
        .dockable_mut(layout.explorer)
        .unwrap()
        .set_on_close(Some(Rc::new(|_: &Dockable| false)));

    assert!(!factory.close_window(window));
    assert!(factory.window(window).is_some());

    factory.dockable_mut(layout.explorer).unwrap().set_on_close(None);
    assert!(pollster::block_on(factory.close_window_async(window)));
    assert!(factory.window(window).is_none());
    assert!(!factory.tree().contains(layout.explorer));
    assert_eq!(hosts.count_exits(), 1);
    assert!(factory.tree().validate(layout.root).is_ok());
}

#[test]
fn test_bulk_closes() {
    let mut factory = Factory::new();
    let layout = fixtures::ide_layout(&mut factory);
    let a = factory.create_document("A", "a.rs");
    let b = factory.create_document("B", "b.rs");
    factory.add_dockable(layout.documents, a);
    factory.add_dockable(layout.documents, b);
    // [Readme, MainRs, A, B]

    assert_eq!(factory.close_right_dockables(layout.main_rs), 2);
    assert_eq!(factory.close_left_dockables(layout.main_rs), 1);
    let docs = factory.dockable(layout.documents).unwrap().dock().unwrap();
    assert_eq!(docs.visible(), &[layout.main_rs]);

    let c = factory.create_document("C", "c.rs");
    factory.add_dockable(layout.documents, c);
    assert_eq!(factory.close_other_dockables(c), 1);
    assert_eq!(factory.close_all_dockables(c), 1);
    // The emptied document dock collapsed away with its last tab.
    assert!(!factory.tree().contains(layout.documents));
    assert!(factory.tree().validate(layout.root).is_ok());
}
