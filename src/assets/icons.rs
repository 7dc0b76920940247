#![allow(missing_docs)] // Derive macros generate undocumented methods.

use enum_assoc::Assoc;
use gpui::SharedString;

/// Built-in icons shipped in `assets/icons`.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn path(&self) -> SharedString)]
pub enum MosaicIconKind {
    #[assoc(path = "icons/checkmark.svg".into())]
    Checkmark,
    /// Indeterminate checkbox mark.
    #[assoc(path = "icons/dash.svg".into())]
    Dash,
    #[assoc(path = "icons/arrow_down.svg".into())]
    ArrowDown,
    #[assoc(path = "icons/close.svg".into())]
    Close,
    #[assoc(path = "icons/search.svg".into())]
    Search,
    #[assoc(path = "icons/calendar.svg".into())]
    Calendar,
    #[assoc(path = "icons/clock.svg".into())]
    Clock,
    #[assoc(path = "icons/success.svg".into())]
    Success,
    #[assoc(path = "icons/error.svg".into())]
    Error,
    #[assoc(path = "icons/warning.svg".into())]
    Warning,
    #[assoc(path = "icons/info.svg".into())]
    Info,
}

impl MosaicIconKind {
    pub const ALL: [MosaicIconKind; 11] = [
        MosaicIconKind::Checkmark,
        MosaicIconKind::Dash,
        MosaicIconKind::ArrowDown,
        MosaicIconKind::Close,
        MosaicIconKind::Search,
        MosaicIconKind::Calendar,
        MosaicIconKind::Clock,
        MosaicIconKind::Success,
        MosaicIconKind::Error,
        MosaicIconKind::Warning,
        MosaicIconKind::Info,
    ];
}

impl From<MosaicIconKind> for SharedString {
    fn from(kind: MosaicIconKind) -> Self {
        kind.path()
    }
}
