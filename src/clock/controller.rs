use crate::clock::appearance::{AppearanceState, ColorTarget, FontDescriptor};
use crate::clock::color::ClockColor;
use crate::clock::drag::{DragState, WindowGeometry};
use crate::clock::menu::MenuCommand;
use crate::clock::preferences::{self, PreferenceStore};

/// Everything the window procedure forwards, already decoded from raw
/// message parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockEvent {
    Resized {
        client: (i32, i32),
        window: (i32, i32),
        /// Client origin relative to the window origin.
        client_inset: (i32, i32),
    },
    Moved {
        origin: (i32, i32),
    },
    DisplayChanged {
        screen: (i32, i32),
    },
    PointerDown {
        client_point: (i32, i32),
    },
    PointerMove {
        screen_point: (i32, i32),
    },
    PointerUp,
    CaptureLost,
    Tick,
    Menu(MenuCommand),
    ColorChosen {
        target: ColorTarget,
        color: Option<ClockColor>,
    },
    FontChosen(Option<FontDescriptor>),
    ExitAnswered(bool),
    Destroy,
}

/// Side effects the platform layer carries out after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockEffect {
    CapturePointer,
    ReleasePointer,
    MoveWindow { x: i32, y: i32 },
    Repaint,
    ChooseColor {
        target: ColorTarget,
        initial: ClockColor,
    },
    ChooseFont { initial: FontDescriptor },
    ConfirmExit,
    DestroyWindow,
    StopTimer,
    Quit,
}

pub struct ClockController {
    appearance: AppearanceState,
    geometry: WindowGeometry,
    drag: DragState,
    store: Box<dyn PreferenceStore>,
    release_drag_on_capture_loss: bool,
    saved: bool,
}

impl ClockController {
    pub fn new(appearance: AppearanceState, store: Box<dyn PreferenceStore>) -> Self {
        Self {
            appearance,
            geometry: WindowGeometry::default(),
            drag: DragState::Idle,
            store,
            release_drag_on_capture_loss: true,
            saved: false,
        }
    }

    /// Starts from whatever the store holds, defaults otherwise.
    pub fn from_store(store: Box<dyn PreferenceStore>) -> Self {
        let appearance = preferences::load(store.as_ref());
        Self::new(appearance, store)
    }

    pub fn with_capture_loss_release(mut self, enabled: bool) -> Self {
        self.release_drag_on_capture_loss = enabled;
        self
    }

    pub fn with_geometry(mut self, geometry: WindowGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn appearance(&self) -> &AppearanceState {
        &self.appearance
    }

    pub fn geometry(&self) -> &WindowGeometry {
        &self.geometry
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn handle(&mut self, event: ClockEvent) -> Vec<ClockEffect> {
        match event {
            ClockEvent::Resized {
                client,
                window,
                client_inset,
            } => {
                self.geometry.client_width = client.0;
                self.geometry.client_height = client.1;
                self.geometry.window_width = window.0;
                self.geometry.window_height = window.1;
                self.geometry.client_inset_x = client_inset.0;
                self.geometry.client_inset_y = client_inset.1;
                vec![ClockEffect::Repaint]
            }
            ClockEvent::Moved { origin } => {
                self.geometry.origin_x = origin.0;
                self.geometry.origin_y = origin.1;
                Vec::new()
            }
            ClockEvent::DisplayChanged { screen } => {
                self.geometry.screen_width = screen.0;
                self.geometry.screen_height = screen.1;
                Vec::new()
            }
            ClockEvent::PointerDown { client_point } => {
                if self.drag.pointer_down(client_point, &self.geometry) {
                    vec![ClockEffect::CapturePointer]
                } else {
                    Vec::new()
                }
            }
            ClockEvent::PointerMove { screen_point } => {
                match self.drag.pointer_move(screen_point, &self.geometry) {
                    Some((x, y)) => {
                        self.geometry.origin_x = x;
                        self.geometry.origin_y = y;
                        vec![ClockEffect::MoveWindow { x, y }]
                    }
                    None => Vec::new(),
                }
            }
            ClockEvent::PointerUp => {
                if self.drag.pointer_up() {
                    vec![ClockEffect::ReleasePointer]
                } else {
                    Vec::new()
                }
            }
            ClockEvent::CaptureLost => {
                if self.release_drag_on_capture_loss {
                    self.drag.cancel();
                }
                Vec::new()
            }
            ClockEvent::Tick => vec![ClockEffect::Repaint],
            ClockEvent::Menu(command) => self.handle_menu(command),
            ClockEvent::ColorChosen { target, color } => match color {
                Some(color) => {
                    self.appearance.set_color(target, color);
                    tracing::info!(?target, %color, "clock color changed");
                    vec![ClockEffect::Repaint]
                }
                None => {
                    tracing::debug!(?target, "color chooser cancelled");
                    Vec::new()
                }
            },
            ClockEvent::FontChosen(font) => match font {
                Some(font) => {
                    tracing::info!(face = %font.face, "clock font changed");
                    self.appearance.set_font(font);
                    vec![ClockEffect::Repaint]
                }
                None => {
                    tracing::debug!("font chooser cancelled");
                    Vec::new()
                }
            },
            ClockEvent::ExitAnswered(confirmed) => {
                if confirmed {
                    vec![ClockEffect::DestroyWindow]
                } else {
                    Vec::new()
                }
            }
            ClockEvent::Destroy => {
                self.persist();
                vec![ClockEffect::StopTimer, ClockEffect::Quit]
            }
        }
    }

    fn handle_menu(&mut self, command: MenuCommand) -> Vec<ClockEffect> {
        tracing::debug!(?command, "menu command");
        match command {
            MenuCommand::FontColor => vec![ClockEffect::ChooseColor {
                target: ColorTarget::Text,
                initial: self.appearance.text_color,
            }],
            MenuCommand::BackgroundColor => vec![ClockEffect::ChooseColor {
                target: ColorTarget::Background,
                initial: self.appearance.background_color,
            }],
            MenuCommand::Font => vec![ClockEffect::ChooseFont {
                initial: self.appearance.font.clone(),
            }],
            MenuCommand::Exit => vec![ClockEffect::ConfirmExit],
        }
    }

    /// Flushes preferences once; repeated destroy notifications are ignored.
    fn persist(&mut self) {
        if self.saved {
            return;
        }
        self.saved = preferences::save(self.store.as_ref(), &self.appearance);
    }
}
