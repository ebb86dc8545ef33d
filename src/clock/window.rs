use crate::clock::controller::ClockController;
use crate::settings::ClockSettings;
use anyhow::Result;

pub const WINDOW_TITLE: &str = "Time Display";
pub const WINDOW_CLASS: &str = "DeskClockTimeDisplay";
pub const CLOCK_TIMER_ID: usize = 1001;

/// Signed client coordinates packed into a mouse message `LPARAM`. Values
/// go negative while the pointer is captured outside the window.
pub fn point_from_lparam(value: isize) -> (i32, i32) {
    let x = (value & 0xffff) as i16 as i32;
    let y = ((value >> 16) & 0xffff) as i16 as i32;
    (x, y)
}

/// Unsigned client size packed into a `WM_SIZE` `LPARAM`.
pub fn size_from_lparam(value: isize) -> (i32, i32) {
    let width = (value & 0xffff) as u16 as i32;
    let height = ((value >> 16) & 0xffff) as u16 as i32;
    (width, height)
}

/// Creates the clock window and runs the message loop until the window is
/// destroyed. Failing to create the window, its back buffer or its timer is
/// fatal.
pub fn run(settings: &ClockSettings, controller: ClockController) -> Result<()> {
    #[cfg(windows)]
    {
        platform::run(settings, controller)
    }

    #[cfg(not(windows))]
    {
        let _ = (settings, controller);
        Err(anyhow::anyhow!(
            "the clock window needs the Win32 windowing system"
        ))
    }
}

#[cfg(windows)]
mod platform {
    use super::{point_from_lparam, size_from_lparam, CLOCK_TIMER_ID, WINDOW_CLASS, WINDOW_TITLE};
    use crate::clock::appearance::{ColorTarget, FontDescriptor};
    use crate::clock::color::ClockColor;
    use crate::clock::controller::{ClockController, ClockEffect, ClockEvent};
    use crate::clock::dialogs::{dispatch, AppearanceDialogs};
    use crate::clock::frame::FrameSlot;
    use crate::clock::glyphs;
    use crate::clock::layout::TextLayout;
    use crate::clock::menu::{MenuCommand, MenuEntry, CONTEXT_MENU};
    use crate::clock::surface::ClockSurface;
    use crate::settings::ClockSettings;
    use anyhow::{anyhow, Context, Result};
    use chrono::Local;
    use std::cell::{Cell, RefCell};
    use std::mem;
    use std::ptr;
    use windows::core::{w, PCWSTR};
    use windows::Win32::Foundation::{
        COLORREF, HANDLE, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM,
    };
    use windows::Win32::Graphics::Gdi::{
        BeginPaint, BitBlt, ClientToScreen, CreateCompatibleDC, CreateDIBSection, CreateFontW,
        DeleteDC, DeleteObject, DrawTextW, EndPaint, GdiFlush, GetDC, ReleaseDC, SelectObject,
        SetBkMode, SetTextColor, UpdateWindow, BITMAPINFO, BITMAPINFOHEADER, BI_RGB,
        CLEARTYPE_QUALITY, CLIP_DEFAULT_PRECIS, DEFAULT_CHARSET, DIB_RGB_COLORS, DT_CENTER,
        DT_SINGLELINE, DT_VCENTER, HBITMAP, HDC, HFONT, HGDIOBJ, LOGFONTW, OUT_OUTLINE_PRECIS,
        PAINTSTRUCT, SRCCOPY, TRANSPARENT, VARIABLE_PITCH,
    };
    use windows::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows::Win32::UI::Controls::Dialogs::{
        ChooseColorW, ChooseFontW, CC_FULLOPEN, CC_RGBINIT, CF_EFFECTS, CF_INITTOLOGFONTSTRUCT,
        CF_SCREENFONTS, CHOOSECOLORW, CHOOSEFONTW,
    };
    use windows::Win32::UI::Input::KeyboardAndMouse::{ReleaseCapture, SetCapture};
    use windows::Win32::UI::WindowsAndMessaging::{
        AppendMenuW, CreatePopupMenu, CreateWindowExW, DefWindowProcW, DestroyMenu,
        DestroyWindow, DispatchMessageW, GetMessageW, GetSystemMetrics, GetWindowLongPtrW,
        GetWindowRect, KillTimer, LoadCursorW, MessageBoxW, PostQuitMessage, RegisterClassW,
        SetForegroundWindow, SetTimer, SetWindowLongPtrW, SetWindowPos, ShowWindow,
        TrackPopupMenu, TranslateMessage, CREATESTRUCTW, CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT,
        GWLP_USERDATA, HMENU, IDC_ARROW, IDYES, MB_ICONQUESTION, MB_YESNO, MF_SEPARATOR,
        MF_STRING, MSG, SM_CXSCREEN, SM_CYSCREEN, SWP_NOACTIVATE, SWP_NOSIZE, SWP_NOZORDER,
        SW_SHOW, TPM_RETURNCMD, TPM_RIGHTBUTTON, WM_CAPTURECHANGED, WM_DESTROY,
        WM_DISPLAYCHANGE, WM_ERASEBKGND, WM_KILLFOCUS, WM_LBUTTONDOWN, WM_LBUTTONUP,
        WM_MOUSEMOVE, WM_MOVE, WM_NCCREATE, WM_NCDESTROY, WM_PAINT, WM_RBUTTONUP, WM_SIZE,
        WM_TIMER, WNDCLASSW, WS_BORDER, WS_EX_ACCEPTFILES, WS_EX_TOPMOST, WS_POPUP,
    };

    fn widestring(value: &str) -> Vec<u16> {
        value.encode_utf16().chain(std::iter::once(0)).collect()
    }

    /// DIB-section back buffer selected into its own memory DC.
    struct GdiBackBuffer {
        mem_dc: HDC,
        dib: HBITMAP,
        old_bitmap: HGDIOBJ,
        bits: *mut u32,
        width: i32,
        height: i32,
    }

    impl GdiBackBuffer {
        fn new(width: i32, height: i32) -> Result<Self> {
            if width <= 0 || height <= 0 {
                return Err(anyhow!("back buffer needs a non-empty size, got {width}x{height}"));
            }

            let mem_dc = unsafe { CreateCompatibleDC(HDC::default()) };
            if mem_dc.0.is_null() {
                return Err(anyhow!("CreateCompatibleDC failed"));
            }

            let mut bmi = BITMAPINFO::default();
            bmi.bmiHeader = BITMAPINFOHEADER {
                biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                biHeight: -height,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            };

            let mut bits: *mut core::ffi::c_void = ptr::null_mut();
            let dib = match unsafe {
                CreateDIBSection(mem_dc, &bmi, DIB_RGB_COLORS, &mut bits, HANDLE::default(), 0)
            } {
                Ok(dib) if !bits.is_null() => dib,
                Ok(dib) => {
                    unsafe {
                        let _ = DeleteObject(dib);
                        let _ = DeleteDC(mem_dc);
                    }
                    return Err(anyhow!("DIB section for {width}x{height} has no pixel storage"));
                }
                Err(err) => {
                    unsafe {
                        let _ = DeleteDC(mem_dc);
                    }
                    return Err(anyhow!(err))
                        .with_context(|| format!("create {width}x{height} DIB section"));
                }
            };

            let old_bitmap = unsafe { SelectObject(mem_dc, dib) };
            Ok(Self {
                mem_dc,
                dib,
                old_bitmap,
                bits: bits as *mut u32,
                width,
                height,
            })
        }

        fn pixels_mut(&mut self) -> &mut [u32] {
            let len = (self.width as usize) * (self.height as usize);
            unsafe { std::slice::from_raw_parts_mut(self.bits, len) }
        }

        /// Copies the whole frame in one `BitBlt`.
        fn present_to(&self, hdc: HDC) {
            unsafe {
                let _ = BitBlt(
                    hdc,
                    0,
                    0,
                    self.width,
                    self.height,
                    self.mem_dc,
                    0,
                    0,
                    SRCCOPY,
                );
            }
        }

        fn present(&self, hwnd: HWND) {
            unsafe {
                let hdc = GetDC(hwnd);
                if hdc.0.is_null() {
                    return;
                }
                self.present_to(hdc);
                ReleaseDC(hwnd, hdc);
            }
        }
    }

    impl ClockSurface for GdiBackBuffer {
        fn size(&self) -> (i32, i32) {
            (self.width, self.height)
        }

        fn fill(&mut self, color: ClockColor) {
            unsafe {
                let _ = GdiFlush();
            }
            self.pixels_mut().fill(color.to_pixel());
        }

        fn draw_text(
            &mut self,
            text: &str,
            layout: &TextLayout,
            color: ClockColor,
            font: &FontDescriptor,
        ) {
            let Some(gdi_font) = ScopedFont::create(layout.font_height, font) else {
                tracing::warn!(face = %font.face, "font creation failed; using bitmap glyphs");
                let (width, height) = (self.width, self.height);
                glyphs::rasterize(self.pixels_mut(), width, height, text, layout, color.to_pixel());
                return;
            };

            let mut text_w: Vec<u16> = text.encode_utf16().collect();
            let mut rect = RECT {
                left: 0,
                top: 0,
                right: self.width,
                bottom: self.height,
            };
            unsafe {
                let previous = SelectObject(self.mem_dc, gdi_font.0);
                SetTextColor(self.mem_dc, COLORREF(color.to_colorref()));
                SetBkMode(self.mem_dc, TRANSPARENT);
                DrawTextW(
                    self.mem_dc,
                    &mut text_w,
                    &mut rect,
                    DT_SINGLELINE | DT_CENTER | DT_VCENTER,
                );
                SelectObject(self.mem_dc, previous);
                let _ = GdiFlush();
            }
        }
    }

    impl Drop for GdiBackBuffer {
        fn drop(&mut self) {
            unsafe {
                let _ = SelectObject(self.mem_dc, self.old_bitmap);
                let _ = DeleteObject(self.dib);
                let _ = DeleteDC(self.mem_dc);
            }
            self.bits = ptr::null_mut();
        }
    }

    /// Font handle released on drop.
    struct ScopedFont(HFONT);

    impl ScopedFont {
        fn create(height: i32, font: &FontDescriptor) -> Option<Self> {
            let face = widestring(&font.face);
            let handle = unsafe {
                CreateFontW(
                    height,
                    0,
                    0,
                    0,
                    font.weight,
                    font.italic as u32,
                    0,
                    0,
                    DEFAULT_CHARSET,
                    OUT_OUTLINE_PRECIS,
                    CLIP_DEFAULT_PRECIS,
                    CLEARTYPE_QUALITY,
                    VARIABLE_PITCH.0 as u32,
                    PCWSTR(face.as_ptr()),
                )
            };
            if handle.0.is_null() {
                None
            } else {
                Some(Self(handle))
            }
        }
    }

    impl Drop for ScopedFont {
        fn drop(&mut self) {
            unsafe {
                let _ = DeleteObject(self.0);
            }
        }
    }

    struct PopupMenu(HMENU);

    impl PopupMenu {
        fn build() -> Result<Self> {
            let menu = Self(unsafe { CreatePopupMenu() }.context("create context menu")?);
            for entry in CONTEXT_MENU {
                match entry {
                    MenuEntry::Command(command) => {
                        let label = widestring(command.label());
                        unsafe {
                            AppendMenuW(
                                menu.0,
                                MF_STRING,
                                command.id() as usize,
                                PCWSTR(label.as_ptr()),
                            )
                        }
                        .with_context(|| format!("append menu item {}", command.label()))?;
                    }
                    MenuEntry::Separator => {
                        unsafe { AppendMenuW(menu.0, MF_SEPARATOR, 0, PCWSTR::null()) }
                            .context("append menu separator")?;
                    }
                }
            }
            Ok(menu)
        }

        fn track(&self, hwnd: HWND, screen_point: (i32, i32)) -> Option<MenuCommand> {
            let chosen = unsafe {
                let _ = SetForegroundWindow(hwnd);
                TrackPopupMenu(
                    self.0,
                    TPM_RETURNCMD | TPM_RIGHTBUTTON,
                    screen_point.0,
                    screen_point.1,
                    0,
                    hwnd,
                    None,
                )
            };
            MenuCommand::from_id(chosen.0 as u32)
        }
    }

    impl Drop for PopupMenu {
        fn drop(&mut self) {
            unsafe {
                let _ = DestroyMenu(self.0);
            }
        }
    }

    /// Native choosers. The custom palette lives as long as the window.
    struct Win32Dialogs {
        owner: Cell<HWND>,
        custom_colors: Cell<[COLORREF; 16]>,
    }

    impl Default for Win32Dialogs {
        fn default() -> Self {
            Self {
                owner: Cell::new(HWND::default()),
                custom_colors: Cell::new([COLORREF(0x00ff_ffff); 16]),
            }
        }
    }

    impl AppearanceDialogs for &Win32Dialogs {
        fn choose_color(&mut self, target: ColorTarget, initial: ClockColor) -> Option<ClockColor> {
            let mut palette = self.custom_colors.get();
            let mut cc = CHOOSECOLORW {
                lStructSize: mem::size_of::<CHOOSECOLORW>() as u32,
                hwndOwner: self.owner.get(),
                rgbResult: COLORREF(initial.to_colorref()),
                lpCustColors: palette.as_mut_ptr(),
                Flags: CC_FULLOPEN | CC_RGBINIT,
                ..Default::default()
            };
            let accepted = unsafe { ChooseColorW(&mut cc) }.as_bool();
            self.custom_colors.set(palette);
            tracing::debug!(?target, accepted, "color chooser closed");
            accepted.then(|| ClockColor::from_colorref(cc.rgbResult.0))
        }

        fn choose_font(&mut self, initial: &FontDescriptor) -> Option<FontDescriptor> {
            let mut logfont = LOGFONTW {
                lfWeight: initial.weight,
                lfItalic: initial.italic as u8,
                ..Default::default()
            };
            let face_capacity = logfont.lfFaceName.len() - 1;
            for (slot, unit) in logfont
                .lfFaceName
                .iter_mut()
                .zip(initial.face.encode_utf16().take(face_capacity))
            {
                *slot = unit;
            }

            let mut cf = CHOOSEFONTW {
                lStructSize: mem::size_of::<CHOOSEFONTW>() as u32,
                hwndOwner: self.owner.get(),
                lpLogFont: &mut logfont,
                Flags: CF_SCREENFONTS | CF_EFFECTS | CF_INITTOLOGFONTSTRUCT,
                ..Default::default()
            };
            if !unsafe { ChooseFontW(&mut cf) }.as_bool() {
                return None;
            }

            let len = logfont
                .lfFaceName
                .iter()
                .position(|unit| *unit == 0)
                .unwrap_or(logfont.lfFaceName.len());
            Some(FontDescriptor {
                face: String::from_utf16_lossy(&logfont.lfFaceName[..len]),
                weight: logfont.lfWeight,
                italic: logfont.lfItalic != 0,
            })
        }

        fn confirm_exit(&mut self) -> bool {
            let choice = unsafe {
                MessageBoxW(
                    self.owner.get(),
                    w!("Close the clock?"),
                    w!("Time Display"),
                    MB_YESNO | MB_ICONQUESTION,
                )
            };
            choice == IDYES
        }
    }

    struct WindowState {
        controller: RefCell<ClockController>,
        frame: RefCell<FrameSlot<GdiBackBuffer>>,
        dialogs: Win32Dialogs,
        menu: PopupMenu,
    }

    unsafe fn state_for<'a>(hwnd: HWND) -> Option<&'a WindowState> {
        let ptr = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *const WindowState;
        unsafe { ptr.as_ref() }
    }

    fn screen_size() -> (i32, i32) {
        unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) }
    }

    fn window_rect(hwnd: HWND) -> Option<RECT> {
        let mut rect = RECT::default();
        unsafe { GetWindowRect(hwnd, &mut rect) }.ok()?;
        Some(rect)
    }

    fn client_to_screen(hwnd: HWND, point: (i32, i32)) -> (i32, i32) {
        let mut pt = POINT {
            x: point.0,
            y: point.1,
        };
        unsafe {
            let _ = ClientToScreen(hwnd, &mut pt);
        }
        (pt.x, pt.y)
    }

    fn render_and_present(hwnd: HWND, state: &WindowState) {
        let Ok(appearance) = state
            .controller
            .try_borrow()
            .map(|controller| controller.appearance().clone())
        else {
            return;
        };
        let Ok(mut frame) = state.frame.try_borrow_mut() else {
            return;
        };
        let outcome = frame.tick(&appearance, &Local::now());
        if !outcome.is_rendered() {
            tracing::trace!(?outcome, client = ?frame.client_size(), "clock tick skipped");
            return;
        }
        if let Some(buffer) = frame.buffer() {
            buffer.present(hwnd);
        }
    }

    fn apply_effect(hwnd: HWND, state: &WindowState, effect: ClockEffect) {
        match effect {
            ClockEffect::CapturePointer => unsafe {
                SetCapture(hwnd);
            },
            ClockEffect::ReleasePointer => unsafe {
                let _ = ReleaseCapture();
            },
            ClockEffect::MoveWindow { x, y } => unsafe {
                let _ = SetWindowPos(
                    hwnd,
                    HWND::default(),
                    x,
                    y,
                    0,
                    0,
                    SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
                );
            },
            ClockEffect::Repaint => render_and_present(hwnd, state),
            ClockEffect::DestroyWindow => unsafe {
                let _ = DestroyWindow(hwnd);
            },
            ClockEffect::StopTimer => unsafe {
                let _ = KillTimer(hwnd, CLOCK_TIMER_ID);
            },
            ClockEffect::Quit => unsafe { PostQuitMessage(0) },
            ClockEffect::ChooseColor { .. }
            | ClockEffect::ChooseFont { .. }
            | ClockEffect::ConfirmExit => {
                tracing::error!(?effect, "dialog effect escaped dispatch");
            }
        }
    }

    fn handle_event(hwnd: HWND, state: &WindowState, event: ClockEvent) {
        let mut dialogs = &state.dialogs;
        let effects = dispatch(
            |event| match state.controller.try_borrow_mut() {
                Ok(mut controller) => controller.handle(event),
                Err(_) => {
                    tracing::trace!(?event, "controller busy; event dropped");
                    Vec::new()
                }
            },
            &mut dialogs,
            event,
        );
        for effect in effects {
            apply_effect(hwnd, state, effect);
        }
    }

    unsafe extern "system" fn clock_wndproc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        if msg == WM_NCCREATE {
            let create = unsafe { &*(lparam.0 as *const CREATESTRUCTW) };
            unsafe {
                SetWindowLongPtrW(hwnd, GWLP_USERDATA, create.lpCreateParams as isize);
            }
            if let Some(state) = unsafe { state_for(hwnd) } {
                state.dialogs.owner.set(hwnd);
            }
            return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
        }

        let Some(state) = (unsafe { state_for(hwnd) }) else {
            return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
        };

        match msg {
            WM_SIZE => {
                let (width, height) = size_from_lparam(lparam.0);
                if let Ok(mut frame) = state.frame.try_borrow_mut() {
                    frame.resize(width, height, GdiBackBuffer::new);
                }
                let rect = window_rect(hwnd);
                let window = rect
                    .map(|rc| (rc.right - rc.left, rc.bottom - rc.top))
                    .unwrap_or((width, height));
                let client_inset = rect
                    .map(|rc| {
                        let (x, y) = client_to_screen(hwnd, (0, 0));
                        (x - rc.left, y - rc.top)
                    })
                    .unwrap_or((0, 0));
                handle_event(
                    hwnd,
                    state,
                    ClockEvent::Resized {
                        client: (width, height),
                        window,
                        client_inset,
                    },
                );
                LRESULT(0)
            }
            WM_MOVE => {
                if let Some(rc) = window_rect(hwnd) {
                    handle_event(
                        hwnd,
                        state,
                        ClockEvent::Moved {
                            origin: (rc.left, rc.top),
                        },
                    );
                }
                LRESULT(0)
            }
            WM_DISPLAYCHANGE => {
                handle_event(
                    hwnd,
                    state,
                    ClockEvent::DisplayChanged {
                        screen: screen_size(),
                    },
                );
                unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
            }
            WM_TIMER if wparam.0 == CLOCK_TIMER_ID => {
                handle_event(hwnd, state, ClockEvent::Tick);
                LRESULT(0)
            }
            WM_PAINT => {
                let mut ps = PAINTSTRUCT::default();
                let hdc = unsafe { BeginPaint(hwnd, &mut ps) };
                if !hdc.0.is_null() {
                    if let Ok(frame) = state.frame.try_borrow() {
                        if let Some(buffer) = frame.buffer().filter(|_| frame.is_current()) {
                            buffer.present_to(hdc);
                        }
                    }
                }
                unsafe {
                    let _ = EndPaint(hwnd, &ps);
                }
                LRESULT(0)
            }
            WM_ERASEBKGND => LRESULT(1),
            WM_LBUTTONDOWN => {
                handle_event(
                    hwnd,
                    state,
                    ClockEvent::PointerDown {
                        client_point: point_from_lparam(lparam.0),
                    },
                );
                LRESULT(0)
            }
            WM_MOUSEMOVE => {
                let screen_point = client_to_screen(hwnd, point_from_lparam(lparam.0));
                handle_event(hwnd, state, ClockEvent::PointerMove { screen_point });
                LRESULT(0)
            }
            WM_LBUTTONUP => {
                handle_event(hwnd, state, ClockEvent::PointerUp);
                LRESULT(0)
            }
            WM_CAPTURECHANGED | WM_KILLFOCUS => {
                handle_event(hwnd, state, ClockEvent::CaptureLost);
                unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
            }
            WM_RBUTTONUP => {
                let screen_point = client_to_screen(hwnd, point_from_lparam(lparam.0));
                if let Some(command) = state.menu.track(hwnd, screen_point) {
                    handle_event(hwnd, state, ClockEvent::Menu(command));
                }
                LRESULT(0)
            }
            WM_DESTROY => {
                handle_event(hwnd, state, ClockEvent::Destroy);
                LRESULT(0)
            }
            WM_NCDESTROY => {
                unsafe {
                    SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
                    DefWindowProcW(hwnd, msg, wparam, lparam)
                }
            }
            _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
        }
    }

    pub(super) fn run(settings: &ClockSettings, controller: ClockController) -> Result<()> {
        let hinstance =
            unsafe { GetModuleHandleW(PCWSTR::null()) }.context("resolve module handle")?;
        let class_name = widestring(WINDOW_CLASS);
        let title = widestring(WINDOW_TITLE);

        let wc = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(clock_wndproc),
            hInstance: hinstance.into(),
            hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default(),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            ..Default::default()
        };
        if unsafe { RegisterClassW(&wc) } == 0 {
            return Err(anyhow!("register clock window class"));
        }

        let state = Box::new(WindowState {
            controller: RefCell::new(controller),
            frame: RefCell::new(FrameSlot::new()),
            dialogs: Win32Dialogs::default(),
            menu: PopupMenu::build()?,
        });
        state
            .controller
            .borrow_mut()
            .handle(ClockEvent::DisplayChanged {
                screen: screen_size(),
            });

        let (x, y) = settings
            .initial_position
            .unwrap_or((CW_USEDEFAULT, CW_USEDEFAULT));
        let (width, height) = settings.window_size();
        let hwnd = unsafe {
            CreateWindowExW(
                WS_EX_ACCEPTFILES | WS_EX_TOPMOST,
                PCWSTR(class_name.as_ptr()),
                PCWSTR(title.as_ptr()),
                WS_POPUP | WS_BORDER,
                x,
                y,
                width,
                height,
                None,
                None,
                hinstance,
                Some(&*state as *const WindowState as *const core::ffi::c_void),
            )
        }
        .context("create clock window")?;

        if !state.frame.borrow().is_current() {
            unsafe {
                let _ = DestroyWindow(hwnd);
            }
            return Err(anyhow!("allocate clock back buffer"));
        }

        let interval_ms = settings.tick_interval().as_millis().min(u32::MAX as u128) as u32;
        if unsafe { SetTimer(hwnd, CLOCK_TIMER_ID, interval_ms, None) } == 0 {
            unsafe {
                let _ = DestroyWindow(hwnd);
            }
            return Err(anyhow!("start clock timer"));
        }

        if let Some(rc) = window_rect(hwnd) {
            handle_event(
                hwnd,
                &state,
                ClockEvent::Moved {
                    origin: (rc.left, rc.top),
                },
            );
        }
        unsafe {
            let _ = ShowWindow(hwnd, SW_SHOW);
            let _ = UpdateWindow(hwnd);
        }
        render_and_present(hwnd, &state);
        tracing::info!(width, height, interval_ms, "clock window started");

        let mut msg = MSG::default();
        while unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) }.0 > 0 {
            unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }

        tracing::info!("clock window closed");
        drop(state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{point_from_lparam, size_from_lparam};

    #[test]
    fn pointer_coordinates_keep_their_sign() {
        let packed = ((-20_i16 as u16 as isize) << 16) | (-5_i16 as u16 as isize);
        assert_eq!(point_from_lparam(packed), (-5, -20));
        assert_eq!(point_from_lparam((150 << 16) | 50), (50, 150));
    }

    #[test]
    fn client_size_is_unsigned() {
        assert_eq!(size_from_lparam((200 << 16) | 500), (500, 200));
        assert_eq!(size_from_lparam(0xffff), (65535, 0));
    }
}
