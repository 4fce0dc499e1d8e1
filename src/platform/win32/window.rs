// ── Main window ───────────────────────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Register the main window class.
//   • Create the top-level window, its menu bar and accelerator table.
//   • Attach the explicitly constructed `WindowState` to the window.
//   • Run the Win32 message loop.
//   • Dispatch WM_CREATE, WM_SIZE, WM_SETFOCUS, WM_CTLCOLOREDIT, WM_COMMAND,
//     WM_DPICHANGED, WM_CLOSE, WM_DESTROY.
//   • Expose a safe error-dialog helper for use by main().
//
// ── State ownership ───────────────────────────────────────────────────────────
//
// `run` boxes a `WindowState`, passes the pointer through CreateWindowExW's
// lpParam, and WM_NCCREATE stores it in GWLP_USERDATA.  WndProc only ever
// takes shared references to it; mutation goes through `RefCell`/`Cell`.
// The box is freed by `run` after the message loop has exited, when the window
// and its children are already destroyed.
//
// Modal dialogs pump messages, so WndProc re-enters while a menu handler holds
// the shell borrowed.  Re-entrant menu commands are dropped; painting uses the
// separately shared `Background`.

#![allow(unsafe_code)]

use std::{
    cell::{Cell, RefCell},
    ffi::c_void,
    rc::Rc,
};

use tracing::{debug, error, info, warn};
use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM},
        Graphics::Gdi::{GetStockObject, SetBkColor, HBRUSH, HDC, WHITE_BRUSH},
        System::LibraryLoader::GetModuleHandleW,
        UI::WindowsAndMessaging::{
            AppendMenuW, CreateAcceleratorTableW, CreateMenu, CreateWindowExW, DefWindowProcW,
            DestroyAcceleratorTable, DestroyWindow, DispatchMessageW, GetMessageW,
            GetWindowLongPtrW, LoadCursorW, LoadIconW, MessageBoxW, PostQuitMessage,
            RegisterClassExW, SetMenu, SetWindowLongPtrW, SetWindowPos, ShowWindow,
            TranslateAcceleratorW, TranslateMessage, UpdateWindow, ACCEL, CREATESTRUCTW,
            CS_HREDRAW, CS_VREDRAW, FCONTROL, FVIRTKEY, GWLP_USERDATA, HACCEL, HMENU,
            IDC_ARROW, IDI_APPLICATION, MB_ICONERROR, MB_OK, MF_POPUP, MF_STRING, MSG,
            SWP_NOACTIVATE, SWP_NOZORDER, SW_SHOW, WINDOW_EX_STYLE, WM_CLOSE, WM_COMMAND,
            WM_CREATE, WM_CTLCOLOREDIT, WM_DESTROY, WM_DPICHANGED, WM_NCCREATE, WM_SETFOCUS,
            WM_SIZE, WNDCLASSEXW, WS_OVERLAPPEDWINDOW,
        },
    },
};

use super::{
    dialogs::Win32Dialogs,
    dpi,
    text_area::{Background, EditControl},
    wide,
};
use crate::{
    config::{APP_TITLE, WINDOW_HEIGHT, WINDOW_WIDTH, WINDOW_X, WINDOW_Y},
    error::{NotepadError, Result},
    menu::{Action, Menu, Shortcut},
    shell::{EditorShell, Outcome},
};

// ── Window identity ───────────────────────────────────────────────────────────

/// Atom name used to register (and later find) the main window class.
const CLASS_NAME: PCWSTR = w!("NotepadMainWindow");

// ── WindowState ───────────────────────────────────────────────────────────────

type Shell = EditorShell<Win32Dialogs, EditControl>;

/// Everything the main window owns, created once by `run`.
struct WindowState {
    /// `None` until WM_CREATE has built the text area.
    shell: RefCell<Option<Shell>>,
    /// Shared with the text area, which updates it on restyle.
    background: Rc<Background>,
    /// The EDIT child, for layout and focus without borrowing the shell.
    edit: Cell<HWND>,
    /// Why WM_CREATE failed, for `run` to report.
    startup_error: RefCell<Option<NotepadError>>,
}

impl WindowState {
    fn new() -> Self {
        Self {
            shell: RefCell::new(None),
            background: Rc::new(Background::new()),
            edit: Cell::new(HWND::default()),
            startup_error: RefCell::new(None),
        }
    }

    /// Build the text area and the shell around it.
    fn on_create(&self, hwnd: HWND, hinstance: HINSTANCE) -> Result<()> {
        let edit = EditControl::create(hwnd, hinstance, Rc::clone(&self.background))?;
        self.edit.set(edit.hwnd());
        let shell = EditorShell::new(Win32Dialogs::new(hwnd), edit)?;
        *self.shell.borrow_mut() = Some(shell);
        Ok(())
    }

    /// Run a menu action unless another one is already in progress.
    fn on_action(&self, action: Action) -> Option<Outcome> {
        let Ok(mut guard) = self.shell.try_borrow_mut() else {
            debug!(?action, "ignored while another action is running");
            return None;
        };
        guard.as_mut().map(|shell| shell.handle(action))
    }
}

/// Recover the `WindowState` attached by WM_NCCREATE.
///
/// # Safety
/// `hwnd` must be a main window created by `run`, which keeps the state alive
/// until after the window is destroyed.
unsafe fn window_state<'a>(hwnd: HWND) -> Option<&'a WindowState> {
    let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const WindowState;
    ptr.as_ref()
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Register the main window class, create the window, and drive the message
/// loop until the user closes the application.
pub(crate) fn run() -> Result<()> {
    #[cfg(debug_assertions)]
    let t0 = std::time::Instant::now();

    dpi::init();

    // SAFETY: GetModuleHandleW(None) returns the .exe's own HMODULE, which is
    // always valid for the process lifetime and never fails in practice.
    let hmodule = unsafe { GetModuleHandleW(None) }?;
    let hinstance = HINSTANCE(hmodule.0);

    register_class(hinstance)?;

    let state = Box::into_raw(Box::new(WindowState::new()));
    let result = create_window(hinstance, state).and_then(|hwnd| {
        // SAFETY: hwnd was just returned by CreateWindowExW and is valid.
        // ShowWindow returns the previous visibility state; UpdateWindow returns
        // a success BOOL; both are ignored.
        unsafe {
            let _ = ShowWindow(hwnd, SW_SHOW);
            let _ = UpdateWindow(hwnd);
        }

        #[cfg(debug_assertions)]
        debug!(elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0, "window visible");

        let accel = build_accelerators()?;
        let looped = message_loop(hwnd, accel);
        // SAFETY: accel came from CreateAcceleratorTableW and is no longer used.
        unsafe {
            let _ = DestroyAcceleratorTable(accel);
        }
        looped
    });

    // SAFETY: state came from Box::into_raw above.  The window is destroyed
    // (or was never created), so WndProc can no longer reach the pointer.
    let state = unsafe { Box::from_raw(state) };
    match state.startup_error.into_inner() {
        Some(e) => Err(e),
        None => result,
    }
}

/// Show a modal error dialog with the given message.
///
/// Safe to call from any context; performs the UTF-16 conversion internally.
/// Used by `main()` when `run()` returns an error.
pub(crate) fn show_error_dialog(message: &str) {
    let msg_wide = wide(message);
    let title_wide = wide(&format!("{APP_TITLE} \u{2014} Fatal Error"));

    // SAFETY: msg_wide and title_wide are valid null-terminated UTF-16 strings
    // that remain allocated for the duration of the MessageBoxW call.
    // HWND::default() (null) means the dialog has no owner window.
    unsafe {
        let _ = MessageBoxW(
            HWND::default(),
            PCWSTR(msg_wide.as_ptr()),
            PCWSTR(title_wide.as_ptr()),
            MB_OK | MB_ICONERROR,
        );
    }
}

// ── Window class registration ─────────────────────────────────────────────────

fn register_class(hinstance: HINSTANCE) -> Result<()> {
    // SAFETY: null HINSTANCE selects the system's stock icon and cursor;
    // neither is freed by us.
    let (icon, cursor) = unsafe { (LoadIconW(None, IDI_APPLICATION)?, LoadCursorW(None, IDC_ARROW)?) };

    // SAFETY: stock objects are never deleted, and WHITE_BRUSH is a brush.
    let background = unsafe { HBRUSH(GetStockObject(WHITE_BRUSH).0) };

    let wndclass = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wnd_proc),
        hInstance: hinstance,
        hIcon: icon,
        hIconSm: icon,
        hCursor: cursor,
        hbrBackground: background,
        lpszClassName: CLASS_NAME,
        ..Default::default()
    };

    // SAFETY: wndclass only borrows CLASS_NAME, a static wide literal.
    if unsafe { RegisterClassExW(&wndclass) } == 0 {
        return Err(last_error("RegisterClassExW"));
    }
    Ok(())
}

// ── Window creation ───────────────────────────────────────────────────────────

fn create_window(hinstance: HINSTANCE, state: *const WindowState) -> Result<HWND> {
    let sys_dpi = dpi::get_system_dpi();
    let title = wide(APP_TITLE);

    // SAFETY: CLASS_NAME was just registered; hinstance is the exe's module.
    // `state` stays valid until `run` frees it after the message loop; it is
    // handed to WM_NCCREATE through CREATESTRUCTW::lpCreateParams.
    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            CLASS_NAME,
            PCWSTR(title.as_ptr()),
            WS_OVERLAPPEDWINDOW,
            dpi::scale(WINDOW_X, sys_dpi),
            dpi::scale(WINDOW_Y, sys_dpi),
            dpi::scale(WINDOW_WIDTH, sys_dpi),
            dpi::scale(WINDOW_HEIGHT, sys_dpi),
            HWND::default(),
            HMENU::default(),
            hinstance,
            Some(state as *const c_void),
        )
    };

    if hwnd == HWND::default() {
        return Err(last_error("CreateWindowExW"));
    }

    let menu = build_menu()?;
    // SAFETY: hwnd and menu are valid handles.
    unsafe { SetMenu(hwnd, menu) }?;

    info!("main window created");
    Ok(hwnd)
}

// ── Menu construction ─────────────────────────────────────────────────────────

fn build_menu() -> Result<HMENU> {
    // SAFETY: CreateMenu has no preconditions; it always succeeds unless the
    // system is critically low on resources, in which case ? propagates the error.
    // Every label buffer outlives the AppendMenuW call that reads it.
    unsafe {
        let bar = CreateMenu()?;

        for menu in Menu::ALL {
            let popup = CreateMenu()?;
            for action in Action::ALL.into_iter().filter(|a| a.menu() == menu) {
                let text = wide(&action.menu_text());
                AppendMenuW(popup, MF_STRING, usize::from(action.command_id()), PCWSTR(text.as_ptr()))?;
            }
            // The uIDNewItem parameter for MF_POPUP is the child HMENU cast to usize.
            let label = wide(menu.label());
            AppendMenuW(bar, MF_POPUP, popup.0 as usize, PCWSTR(label.as_ptr()))?;
        }

        Ok(bar)
    }
}

/// Ctrl+letter accelerators for every action that has one.
fn build_accelerators() -> Result<HACCEL> {
    let table: Vec<ACCEL> = Action::ALL
        .into_iter()
        .filter_map(|action| match action.shortcut() {
            Shortcut::Ctrl(key) => Some(ACCEL {
                fVirt: FCONTROL | FVIRTKEY,
                // Virtual-key codes for letters are their upper-case ASCII values.
                key: key as u16,
                cmd: action.command_id(),
            }),
            Shortcut::AltF4 => None,
        })
        .collect();

    // SAFETY: table is a valid slice of ACCEL entries; the system copies it.
    let accel = unsafe { CreateAcceleratorTableW(&table) }?;
    Ok(accel)
}

// ── Message loop ──────────────────────────────────────────────────────────────

fn message_loop(hwnd: HWND, accel: HACCEL) -> Result<()> {
    let mut msg = MSG::default();
    loop {
        // SAFETY: msg is a local MSG; a null HWND takes every message posted
        // to this thread, including the EDIT child's.
        match unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) }.0 {
            -1 => return Err(last_error("GetMessageW")),
            0 => return Ok(()), // WM_QUIT
            // SAFETY: msg was just filled in; hwnd and accel outlive the loop.
            // Ctrl shortcuts become WM_COMMAND and skip normal dispatch.
            _ => unsafe {
                if TranslateAcceleratorW(hwnd, accel, &msg) == 0 {
                    let _ = TranslateMessage(&msg);
                    let _ = DispatchMessageW(&msg);
                }
            },
        }
    }
}

// ── Window procedure ──────────────────────────────────────────────────────────

// SAFETY: wnd_proc is registered as lpfnWndProc in WNDCLASSEXW.
// Windows guarantees that hwnd, msg, wparam, and lparam are valid for the
// lifetime of this call; we must not store hwnd beyond the message handler.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        // ── Lifecycle ─────────────────────────────────────────────────────────
        WM_NCCREATE => {
            // SAFETY: for WM_NCCREATE lparam points at the CREATESTRUCTW whose
            // lpCreateParams is the WindowState pointer passed by create_window.
            let cs = &*(lparam.0 as *const CREATESTRUCTW);
            let _ = SetWindowLongPtrW(hwnd, GWLP_USERDATA, cs.lpCreateParams as isize);
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }

        WM_CREATE => {
            let Some(state) = window_state(hwnd) else {
                return LRESULT(-1);
            };
            // SAFETY: for WM_CREATE lparam points at a valid CREATESTRUCTW.
            let cs = &*(lparam.0 as *const CREATESTRUCTW);
            match state.on_create(hwnd, cs.hInstance) {
                Ok(()) => LRESULT(0),
                Err(e) => {
                    error!(error = %e, "could not build the text area");
                    *state.startup_error.borrow_mut() = Some(e);
                    // -1 makes CreateWindowExW fail and destroy the window.
                    LRESULT(-1)
                }
            }
        }

        WM_CLOSE => {
            // SAFETY: hwnd is the window being closed; DestroyWindow triggers
            // WM_DESTROY, which posts WM_QUIT via PostQuitMessage.
            let _ = DestroyWindow(hwnd);
            LRESULT(0)
        }

        WM_DESTROY => {
            // SAFETY: PostQuitMessage with exit code 0 is always safe to call
            // from WM_DESTROY. It posts WM_QUIT to the thread's message queue.
            PostQuitMessage(0);
            LRESULT(0)
        }

        // ── Layout & painting ─────────────────────────────────────────────────
        WM_SIZE => {
            if let Some(state) = window_state(hwnd) {
                // lparam low word = new client width, high word = new client height.
                let width = (lparam.0 & 0xFFFF) as i32;
                let height = ((lparam.0 >> 16) & 0xFFFF) as i32;
                EditControl::resize(state.edit.get(), width, height);
            }
            LRESULT(0)
        }

        WM_SETFOCUS => {
            if let Some(state) = window_state(hwnd) {
                EditControl::focus(state.edit.get());
            }
            LRESULT(0)
        }

        WM_CTLCOLOREDIT => match window_state(hwnd) {
            Some(state)
                if HWND(lparam.0 as *mut c_void) == state.edit.get()
                    && !state.background.brush().is_invalid() =>
            {
                // SAFETY: for WM_CTLCOLOREDIT wparam is the control's HDC,
                // valid for the duration of this message.
                let hdc = HDC(wparam.0 as *mut c_void);
                let _ = SetBkColor(hdc, state.background.color());
                LRESULT(state.background.brush().0 as isize)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        },

        WM_DPICHANGED => {
            // SAFETY: for WM_DPICHANGED lparam points at the suggested RECT.
            let rect = &*(lparam.0 as *const RECT);
            let _ = SetWindowPos(
                hwnd,
                HWND::default(),
                rect.left,
                rect.top,
                rect.right - rect.left,
                rect.bottom - rect.top,
                SWP_NOZORDER | SWP_NOACTIVATE,
            );
            if let Some(state) = window_state(hwnd) {
                if let Ok(mut guard) = state.shell.try_borrow_mut() {
                    if let Some(Err(e)) = guard.as_mut().map(Shell::refresh_style) {
                        warn!(error = %e, "could not rescale the font");
                    }
                }
            }
            LRESULT(0)
        }

        // ── Commands ──────────────────────────────────────────────────────────
        WM_COMMAND => {
            // Low word of WPARAM is the command identifier.
            let cmd_id = (wparam.0 & 0xFFFF) as u16;

            match (Action::from_command_id(cmd_id), window_state(hwnd)) {
                (Some(action), Some(state)) => {
                    // The shell borrow ends here, before the window goes away.
                    if state.on_action(action) == Some(Outcome::Exit) {
                        let _ = DestroyWindow(hwnd);
                    }
                    LRESULT(0)
                }
                _ => DefWindowProcW(hwnd, msg, wparam, lparam),
            }
        }

        // Default processing for all unhandled messages.
        // SAFETY: hwnd and message parameters are valid, provided by Windows.
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

// ── Error helpers ─────────────────────────────────────────────────────────────

/// `function` failed; attach the thread's last-error code.
fn last_error(function: &'static str) -> NotepadError {
    // SAFETY: no arguments; reads the calling thread's error slot.
    let code = unsafe { GetLastError() }.0;
    NotepadError::Win32 { function, code }
}
