//! Mock host windows that record every call for verification in tests.

use std::sync::Arc;

use dockyard::{Factory, HostWindow};
use parking_lot::Mutex;

/// Records a host window call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Present { is_dialog: bool },
    Exit,
    SetPosition { x: f32, y: f32 },
    SetSize { width: f32, height: f32 },
    SetTitle(String),
    SetTopmost(bool),
}

#[derive(Debug, Default)]
struct HostState {
    calls: Vec<HostCall>,
    position: (f32, f32),
    size: (f32, f32),
    created: usize,
}

/// Shared log behind every host created by one recorder.
///
/// Hosts are boxed and owned by the factory, so the log is shared through an
/// `Arc<Mutex<_>>` that the test keeps a handle to.
#[derive(Debug, Clone, Default)]
pub struct MockHosts {
    state: Arc<Mutex<HostState>>,
}

impl MockHosts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host that records into this log.
    pub fn host(&self) -> Box<dyn HostWindow> {
        self.state.lock().created += 1;
        Box::new(MockHostWindow {
            state: Arc::clone(&self.state),
        })
    }

    /// Register as the default host constructor of `factory`.
    pub fn install(&self, factory: &mut Factory) {
        let hosts = self.clone();
        factory
            .host_window_locator_mut()
            .set_default(move || hosts.host());
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.state.lock().calls.clone()
    }

    pub fn created(&self) -> usize {
        self.state.lock().created
    }

    pub fn count_presents(&self) -> usize {
        self.count(|c| matches!(c, HostCall::Present { .. }))
    }

    pub fn count_exits(&self) -> usize {
        self.count(|c| matches!(c, HostCall::Exit))
    }

    /// Last position pushed to any host.
    pub fn last_position(&self) -> Option<(f32, f32)> {
        self.state.lock().calls.iter().rev().find_map(|c| match c {
            HostCall::SetPosition { x, y } => Some((*x, *y)),
            _ => None,
        })
    }

    /// Simulate the user moving or resizing the native window.
    pub fn set_live_geometry(&self, position: (f32, f32), size: (f32, f32)) {
        let mut state = self.state.lock();
        state.position = position;
        state.size = size;
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn count(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|c| pred(c)).count()
    }
}

/// A host window that records calls instead of opening anything.
#[derive(Debug)]
pub struct MockHostWindow {
    state: Arc<Mutex<HostState>>,
}

impl MockHostWindow {
    fn record(&self, call: HostCall) {
        self.state.lock().calls.push(call);
    }
}

impl HostWindow for MockHostWindow {
    fn present(&mut self, is_dialog: bool) {
        self.record(HostCall::Present { is_dialog });
    }

    fn exit(&mut self) {
        self.record(HostCall::Exit);
    }

    fn set_position(&mut self, x: f32, y: f32) {
        let mut state = self.state.lock();
        state.position = (x, y);
        state.calls.push(HostCall::SetPosition { x, y });
    }

    fn position(&self) -> (f32, f32) {
        self.state.lock().position
    }

    fn set_size(&mut self, width: f32, height: f32) {
        let mut state = self.state.lock();
        state.size = (width, height);
        state.calls.push(HostCall::SetSize { width, height });
    }

    fn size(&self) -> (f32, f32) {
        self.state.lock().size
    }

    fn set_title(&mut self, title: &str) {
        self.record(HostCall::SetTitle(title.to_string()));
    }

    fn set_topmost(&mut self, topmost: bool) {
        self.record(HostCall::SetTopmost(topmost));
    }
}
