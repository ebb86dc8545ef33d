use desk_clock::clock::dialogs::{dispatch, AppearanceDialogs};
use desk_clock::clock::drag::WindowGeometry;
use desk_clock::clock::menu::MenuCommand;
use desk_clock::clock::preferences::{JsonPreferenceStore, PREFERENCES_FILE_NAME};
use desk_clock::clock::{
    ClockColor, ClockController, ClockEffect, ClockEvent, ColorTarget, FontDescriptor,
};
use tempfile::tempdir;

#[derive(Default)]
struct ScriptedDialogs {
    colors: Vec<Option<ClockColor>>,
    font: Option<FontDescriptor>,
    confirm: bool,
    prompts: usize,
}

impl AppearanceDialogs for ScriptedDialogs {
    fn choose_color(&mut self, _target: ColorTarget, _initial: ClockColor) -> Option<ClockColor> {
        self.prompts += 1;
        self.colors.pop().flatten()
    }

    fn choose_font(&mut self, _initial: &FontDescriptor) -> Option<FontDescriptor> {
        self.prompts += 1;
        self.font.clone()
    }

    fn confirm_exit(&mut self) -> bool {
        self.prompts += 1;
        self.confirm
    }
}

fn run(
    clock: &mut ClockController,
    dialogs: &mut ScriptedDialogs,
    event: ClockEvent,
) -> Vec<ClockEffect> {
    dispatch(|event| clock.handle(event), dialogs, event)
}

fn geometry() -> WindowGeometry {
    WindowGeometry {
        client_width: 298,
        client_height: 148,
        window_width: 300,
        window_height: 150,
        origin_x: 100,
        origin_y: 100,
        client_inset_x: 1,
        client_inset_y: 1,
        screen_width: 1920,
        screen_height: 1080,
    }
}

#[test]
fn appearance_changes_survive_a_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(PREFERENCES_FILE_NAME);
    let mut clock = ClockController::from_store(Box::new(JsonPreferenceStore::new(&path)))
        .with_geometry(geometry());
    let mut dialogs = ScriptedDialogs {
        colors: vec![Some(ClockColor::rgb(0, 0, 128)), Some(ClockColor::rgb(0, 255, 0))],
        font: Some(FontDescriptor::with_face("Courier New")),
        confirm: true,
        ..Default::default()
    };

    let effects = run(&mut clock, &mut dialogs, ClockEvent::Menu(MenuCommand::FontColor));
    assert_eq!(effects, vec![ClockEffect::Repaint]);
    run(&mut clock, &mut dialogs, ClockEvent::Menu(MenuCommand::BackgroundColor));
    run(&mut clock, &mut dialogs, ClockEvent::Menu(MenuCommand::Font));
    assert_eq!(clock.appearance().text_color, ClockColor::rgb(0, 255, 0));
    assert_eq!(clock.appearance().background_color, ClockColor::rgb(0, 0, 128));

    let effects = run(&mut clock, &mut dialogs, ClockEvent::Menu(MenuCommand::Exit));
    assert_eq!(effects, vec![ClockEffect::DestroyWindow]);
    let effects = run(&mut clock, &mut dialogs, ClockEvent::Destroy);
    assert_eq!(effects, vec![ClockEffect::StopTimer, ClockEffect::Quit]);
    assert_eq!(dialogs.prompts, 4);

    let restarted = ClockController::from_store(Box::new(JsonPreferenceStore::new(&path)));
    assert_eq!(restarted.appearance().text_color, ClockColor::rgb(0, 255, 0));
    assert_eq!(restarted.appearance().background_color, ClockColor::rgb(0, 0, 128));
    assert_eq!(restarted.appearance().font.face, "Courier New");
}

#[test]
fn cancelled_dialogs_and_declined_exit_change_nothing() {
    let dir = tempdir().unwrap();
    let store = JsonPreferenceStore::new(dir.path().join(PREFERENCES_FILE_NAME));
    let mut clock = ClockController::from_store(Box::new(store)).with_geometry(geometry());
    let before = clock.appearance().clone();
    let mut dialogs = ScriptedDialogs {
        colors: vec![None],
        ..Default::default()
    };

    assert!(run(&mut clock, &mut dialogs, ClockEvent::Menu(MenuCommand::FontColor)).is_empty());
    assert!(run(&mut clock, &mut dialogs, ClockEvent::Menu(MenuCommand::Font)).is_empty());
    assert!(run(&mut clock, &mut dialogs, ClockEvent::Menu(MenuCommand::Exit)).is_empty());
    assert_eq!(clock.appearance(), &before);
}

#[test]
fn drag_through_the_controller_moves_and_clamps() {
    let dir = tempdir().unwrap();
    let store = JsonPreferenceStore::new(dir.path().join(PREFERENCES_FILE_NAME));
    let mut clock = ClockController::from_store(Box::new(store)).with_geometry(geometry());
    let mut dialogs = ScriptedDialogs::default();

    let down = ClockEvent::PointerDown {
        client_point: (50, 50),
    };
    assert_eq!(run(&mut clock, &mut dialogs, down), vec![ClockEffect::CapturePointer]);
    let drag_to = ClockEvent::PointerMove {
        screen_point: (5000, 600),
    };
    let effects = run(&mut clock, &mut dialogs, drag_to);
    assert_eq!(effects, vec![ClockEffect::MoveWindow { x: 1620, y: 549 }]);
    assert_eq!(
        run(&mut clock, &mut dialogs, ClockEvent::PointerUp),
        vec![ClockEffect::ReleasePointer]
    );
    assert_eq!(dialogs.prompts, 0);
}
