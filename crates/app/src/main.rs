//! Chopping - capture a screen region, decode its QR code or read its text

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod settings;
mod shell;
mod state;
mod ui;

use crate::settings::{Settings, SETTINGS_FILE};
use crate::ui::{ChoppingApp, UiState, COMPACT_SIZE};
use crossbeam_channel::{bounded, Receiver, Sender};
use dispatch::{CaptureResult, DispatchError, DispatchResult, Dispatcher};
use eframe::egui;
use export::CaptureStore;
use overlay::OverlayWindow;
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Time for the main window to disappear before the overlay shows
const HIDE_DELAY: Duration = Duration::from_millis(100);

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Physical pixels everywhere, so overlay and screenshot coordinates agree
    #[cfg(windows)]
    unsafe {
        use windows::Win32::UI::HiDpi::{
            SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
        };
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }

    let store = CaptureStore::for_current_exe()?;
    store.ensure_dir()?;
    log::info!("Captures directory: {}", store.dir().display());

    let settings_path = store
        .dir()
        .parent()
        .unwrap_or_else(|| store.dir())
        .join(SETTINGS_FILE);
    let settings = Settings::load(&settings_path)?;

    // Create shared state
    let ui_state = Arc::new(Mutex::new(UiState::new(store.clone())));

    let (result_tx, result_rx): (
        Sender<DispatchResult<CaptureResult>>,
        Receiver<DispatchResult<CaptureResult>>,
    ) = bounded(1);

    // Setup callbacks
    let ui_state_clone = ui_state.clone();
    {
        let mut state = ui_state.lock();
        state.on_draw = Some(Arc::new(move || {
            on_draw_click(ui_state_clone.clone(), settings.clone(), result_tx.clone());
        }));
    }

    {
        let mut state = ui_state.lock();
        state.on_folder = Some(Arc::new(move || {
            if let Err(e) = shell::open_folder(store.dir()) {
                log::error!("{:#}", e);
            }
        }));
    }

    // Start result handler thread
    let ui_state_clone = ui_state.clone();
    let _result_handle = thread::spawn(move || {
        result_handler(ui_state_clone, result_rx);
    });

    // Run egui app
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(COMPACT_SIZE)
            .with_min_inner_size([400.0, 125.0])
            .with_title("Chopping")
            .with_resizable(true),
        ..Default::default()
    };

    let ui_state_for_app = ui_state.clone();
    eframe::run_native(
        "Chopping",
        native_options,
        Box::new(|cc| Ok(Box::new(ChoppingApp::new(cc, ui_state_for_app)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {}", e))?;

    Ok(())
}

fn set_main_window_visible(ui_state: &Arc<Mutex<UiState>>, visible: bool) {
    let hwnd_raw = {
        let state = ui_state.lock();
        state.main_hwnd
    };
    shell::set_window_visible(hwnd_raw, visible);
}

fn on_draw_click(
    ui_state: Arc<Mutex<UiState>>,
    settings: Settings,
    result_tx: Sender<DispatchResult<CaptureResult>>,
) {
    let store = {
        let mut state = ui_state.lock();
        if !state.state_machine.start_selecting() {
            return;
        }
        state.store.clone()
    };

    set_main_window_visible(&ui_state, false);

    // The overlay runs its own message loop, keep it off the UI thread
    thread::spawn(move || {
        thread::sleep(HIDE_DELAY);

        let result = guard_session(|| {
            let mut dispatcher = Dispatcher::system(
                store,
                settings.dispatch_config(),
                settings.qr_config(),
                settings.ocr_config(),
            );
            dispatcher.run_session(&mut OverlayWindow)
        });

        if let Err(ref e) = result {
            log::error!("Capture failed: {}", e);
        }
        let _ = result_tx.send(result);
    });
}

fn result_handler(ui_state: Arc<Mutex<UiState>>, result_rx: Receiver<DispatchResult<CaptureResult>>) {
    while let Ok(result) = result_rx.recv() {
        {
            let mut state = ui_state.lock();
            state.state_machine.finish(result);
        }
        set_main_window_visible(&ui_state, true);
    }
}

/// Run a session so that a panic still produces a result for the UI
fn guard_session(
    session: impl FnOnce() -> DispatchResult<CaptureResult>,
) -> DispatchResult<CaptureResult> {
    panic::catch_unwind(AssertUnwindSafe(session)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(DispatchError::Aborted(message))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AppState, StateMachine};

    #[test]
    fn test_panicking_session_reports_failure() {
        let result = guard_session(|| panic!("overlay thread died"));
        assert!(matches!(
            result,
            Err(DispatchError::Aborted(ref msg)) if msg == "overlay thread died"
        ));

        let mut machine = StateMachine::new();
        machine.start_selecting();
        assert!(machine.finish(result));
        assert!(matches!(machine.state(), AppState::Failed(_)));
        assert!(machine.state().can_draw());
    }

    #[test]
    fn test_formatted_panic_message() {
        let code = 7;
        let result = guard_session(|| panic!("grab failed with {}", code));
        assert!(matches!(
            result,
            Err(DispatchError::Aborted(ref msg)) if msg == "grab failed with 7"
        ));
    }

    #[test]
    fn test_session_result_passes_through() {
        let result = guard_session(|| Ok(CaptureResult::cancelled()));
        assert_eq!(result.unwrap(), CaptureResult::cancelled());
    }
}
