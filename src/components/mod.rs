use gpui::App;

mod avatar;
pub use avatar::*;

mod button;
pub use button::*;

mod chip;
pub use chip::*;

mod icon;
pub use icon::*;

pub mod input_field;
pub use input_field::*;

mod modal;
pub use modal::*;

mod popover;
pub use popover::*;

mod search;
pub use search::*;

mod snackbar;
pub use snackbar::*;

mod spinner;
pub use spinner::*;

mod stack;
pub use stack::*;

mod tabs;
pub use tabs::*;

mod typography;
pub use typography::*;

pub(crate) fn init(cx: &mut App) {
    input_field::init(cx);
    search::init(cx);
    tabs::init(cx);
}
