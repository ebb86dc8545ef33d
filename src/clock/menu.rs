/// Context menu command identifiers. The numeric ids are what the native
/// menu reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    FontColor,
    BackgroundColor,
    Font,
    Exit,
}

impl MenuCommand {
    pub const fn id(self) -> u32 {
        match self {
            Self::FontColor => 1001,
            Self::BackgroundColor => 1002,
            Self::Font => 1003,
            Self::Exit => 1004,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        [Self::FontColor, Self::BackgroundColor, Self::Font, Self::Exit]
            .into_iter()
            .find(|command| command.id() == id)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FontColor => "Font Color",
            Self::BackgroundColor => "Background Color",
            Self::Font => "Font",
            Self::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Command(MenuCommand),
    Separator,
}

pub const CONTEXT_MENU: [MenuEntry; 5] = [
    MenuEntry::Command(MenuCommand::FontColor),
    MenuEntry::Command(MenuCommand::BackgroundColor),
    MenuEntry::Command(MenuCommand::Font),
    MenuEntry::Separator,
    MenuEntry::Command(MenuCommand::Exit),
];

#[cfg(test)]
mod tests {
    use super::{MenuCommand, MenuEntry, CONTEXT_MENU};

    #[test]
    fn ids_round_trip_and_unknown_ids_are_rejected() {
        for entry in CONTEXT_MENU {
            if let MenuEntry::Command(command) = entry {
                assert_eq!(MenuCommand::from_id(command.id()), Some(command));
            }
        }
        assert_eq!(MenuCommand::from_id(0), None);
        assert_eq!(MenuCommand::from_id(1005), None);
    }

    #[test]
    fn exit_is_separated_from_appearance_items() {
        let labels: Vec<_> = CONTEXT_MENU
            .iter()
            .map(|entry| match entry {
                MenuEntry::Command(command) => command.label(),
                MenuEntry::Separator => "-",
            })
            .collect();
        assert_eq!(
            labels,
            vec!["Font Color", "Background Color", "Font", "-", "Exit"]
        );
    }
}
