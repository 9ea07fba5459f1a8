#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use ember2d::{QuadVertex, RenderBackend, Renderer2D};

/// One recorded backend invocation, in call order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum BackendCall {
    Clear([f32; 4]),
    CreateTexture { width: u32, height: u32 },
    BindTexture { slot: u32, native_id: u32 },
    Submit { vertex_count: usize },
    Present,
    Resize { width: u32, height: u32 },
}

#[derive(Debug, Default)]
pub(crate) struct BackendLog {
    pub(crate) calls: Vec<BackendCall>,
    /// Full vertex data of every submit, in submission order.
    pub(crate) submissions: Vec<Vec<QuadVertex>>,
}

impl BackendLog {
    pub(crate) fn submit_count(&self) -> usize {
        self.submissions.len()
    }

    /// The `(slot, native_id)` pairs bound since the start, in call order.
    pub(crate) fn binds(&self) -> Vec<(u32, u32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::BindTexture { slot, native_id } => Some((*slot, *native_id)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn texture_creations(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, BackendCall::CreateTexture { .. }))
            .count()
    }
}

/// Fake backend that records every call instead of touching a GPU.
pub(crate) struct RecordingBackend {
    log: Rc<RefCell<BackendLog>>,
    next_id: u32,
}

impl RenderBackend for RecordingBackend {
    fn clear(&mut self, color: [f32; 4]) {
        self.log.borrow_mut().calls.push(BackendCall::Clear(color));
    }

    fn create_texture(&mut self, width: u32, height: u32, _pixels: &[u8]) -> u32 {
        self.next_id += 1;
        self.log
            .borrow_mut()
            .calls
            .push(BackendCall::CreateTexture { width, height });
        self.next_id
    }

    fn bind_texture(&mut self, slot: u32, native_id: u32) {
        self.log
            .borrow_mut()
            .calls
            .push(BackendCall::BindTexture { slot, native_id });
    }

    fn submit(&mut self, vertices: &[QuadVertex]) {
        let mut log = self.log.borrow_mut();
        log.calls.push(BackendCall::Submit {
            vertex_count: vertices.len(),
        });
        log.submissions.push(vertices.to_vec());
    }

    fn present(&mut self) {
        self.log.borrow_mut().calls.push(BackendCall::Present);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.log
            .borrow_mut()
            .calls
            .push(BackendCall::Resize { width, height });
    }
}

/// A renderer over a recording backend plus a handle to its call log.
pub(crate) fn recording_renderer() -> (Renderer2D, Rc<RefCell<BackendLog>>) {
    let log = Rc::new(RefCell::new(BackendLog::default()));
    let backend = RecordingBackend {
        log: log.clone(),
        next_id: 0,
    };
    (Renderer2D::new(Box::new(backend)), log)
}
