use crate::clock::appearance::{ColorTarget, FontDescriptor};
use crate::clock::color::ClockColor;
use crate::clock::controller::{ClockEffect, ClockEvent};
use std::collections::VecDeque;

/// Blocking choosers. `None` means the user cancelled.
pub trait AppearanceDialogs {
    fn choose_color(&mut self, target: ColorTarget, initial: ClockColor) -> Option<ClockColor>;
    fn choose_font(&mut self, initial: &FontDescriptor) -> Option<FontDescriptor>;
    fn confirm_exit(&mut self) -> bool;
}

/// Feeds `event` to `handle`, answers every dialog effect through `dialogs`
/// and returns the remaining effects in order.
///
/// No call to `handle` is in progress while a dialog is open.
pub fn dispatch<H>(
    mut handle: H,
    dialogs: &mut dyn AppearanceDialogs,
    event: ClockEvent,
) -> Vec<ClockEffect>
where
    H: FnMut(ClockEvent) -> Vec<ClockEffect>,
{
    let mut pending: VecDeque<ClockEffect> = handle(event).into();
    let mut effects = Vec::new();
    while let Some(effect) = pending.pop_front() {
        let answer = match effect {
            ClockEffect::ChooseColor { target, initial } => ClockEvent::ColorChosen {
                target,
                color: dialogs.choose_color(target, initial),
            },
            ClockEffect::ChooseFont { initial } => {
                ClockEvent::FontChosen(dialogs.choose_font(&initial))
            }
            ClockEffect::ConfirmExit => ClockEvent::ExitAnswered(dialogs.confirm_exit()),
            other => {
                effects.push(other);
                continue;
            }
        };
        pending.extend(handle(answer));
    }
    effects
}
