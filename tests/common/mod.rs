//! Shared test infrastructure for chroma-fx integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{mpsc, Arc};

use chroma_fx::chroma::protocol::{DeviceId, DeviceInfo, DeviceType, EffectHandle, Guid, ResultCode};
use chroma_fx::native::NativeSdk;
use parking_lot::Mutex;

// ============================================================================
// Logging
// ============================================================================

pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

// ============================================================================
// Mock SDK
// ============================================================================

/// One recorded `create_effect` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCall {
    pub device_type: DeviceType,
    pub effect: i32,
    pub param: Option<Vec<u8>>,
}

/// Holds one `create_effect` call for a given effect code until released.
struct Gate {
    effect: i32,
    entered: mpsc::Sender<()>,
    release: mpsc::Receiver<()>,
}

/// Recording SDK double.
///
/// Hands out sequential handles and records every effect creation in
/// completion order. Calls fail with whatever codes were queued via
/// [`MockSdk::fail_next`] and [`MockSdk::fail_next_uninit`].
#[derive(Default)]
pub struct MockSdk {
    calls: Mutex<Vec<CreateCall>>,
    failures: Mutex<VecDeque<ResultCode>>,
    uninit_failures: Mutex<VecDeque<ResultCode>>,
    gate: Mutex<Option<Gate>>,
    connected: Mutex<Vec<(DeviceId, DeviceType)>>,
    next_handle: AtomicU32,
    pub init_calls: AtomicU32,
    pub uninit_calls: AtomicU32,
}

impl MockSdk {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fail the next `create_effect` call with `code`.
    pub fn fail_next(&self, code: ResultCode) {
        self.failures.lock().push_back(code);
    }

    /// Fail the next `uninit` call with `code`.
    pub fn fail_next_uninit(&self, code: ResultCode) {
        self.uninit_failures.lock().push_back(code);
    }

    /// Block the next `create_effect` call for `effect` until the returned
    /// sender fires. The receiver signals once that call is in flight.
    pub fn gate_next(&self, effect: i32) -> (mpsc::Receiver<()>, mpsc::Sender<()>) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        *self.gate.lock() = Some(Gate {
            effect,
            entered: entered_tx,
            release: release_rx,
        });
        (entered_rx, release_tx)
    }

    /// Report `id` as a connected device of `device_type`.
    pub fn connect(&self, id: DeviceId, device_type: DeviceType) {
        self.connected.lock().push((id, device_type));
    }

    pub fn calls(&self) -> Vec<CreateCall> {
        self.calls.lock().clone()
    }

    pub fn last_call(&self) -> Option<CreateCall> {
        self.calls.lock().last().cloned()
    }

    pub fn init_count(&self) -> u32 {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn uninit_count(&self) -> u32 {
        self.uninit_calls.load(Ordering::SeqCst)
    }

    /// The handle the `n`th successful creation returned (1-based).
    pub fn handle(n: u32) -> EffectHandle {
        EffectHandle(Guid::new(n, 0, 0, [0; 8]))
    }
}

impl NativeSdk for MockSdk {
    fn init(&self) -> ResultCode {
        let _ = self.init_calls.fetch_add(1, Ordering::SeqCst);
        ResultCode::SUCCESS
    }

    fn uninit(&self) -> ResultCode {
        let _ = self.uninit_calls.fetch_add(1, Ordering::SeqCst);
        self.uninit_failures
            .lock()
            .pop_front()
            .unwrap_or(ResultCode::SUCCESS)
    }

    fn create_effect(
        &self,
        device_type: DeviceType,
        effect: i32,
        param: Option<&[u8]>,
    ) -> Result<EffectHandle, ResultCode> {
        let gate = {
            let mut slot = self.gate.lock();
            if slot.as_ref().is_some_and(|g| g.effect == effect) {
                slot.take()
            } else {
                None
            }
        };
        if let Some(gate) = gate {
            let _ = gate.entered.send(());
            let _ = gate.release.recv();
        }

        self.calls.lock().push(CreateCall {
            device_type,
            effect,
            param: param.map(<[u8]>::to_vec),
        });
        if let Some(code) = self.failures.lock().pop_front() {
            return Err(code);
        }
        let n = self.next_handle.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Self::handle(n))
    }

    fn query_device(&self, id: DeviceId) -> Result<DeviceInfo, ResultCode> {
        self.connected
            .lock()
            .iter()
            .find(|(known, _)| *known == id)
            .map(|(_, device_type)| DeviceInfo::new(*device_type, true))
            .ok_or(ResultCode::DEVICE_NOT_CONNECTED)
    }
}

/// Little-endian bytes of the first `n` cells of a custom-grid blob.
pub fn cell_bytes(blob: &[u8], n: usize) -> Vec<[u8; 4]> {
    blob.chunks_exact(4)
        .take(n)
        .map(|c| [c[0], c[1], c[2], c[3]])
        .collect()
}
