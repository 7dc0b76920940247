mod colors;
pub use colors::*;

mod element;
pub use element::*;

mod element_id;
pub use element_id::*;

mod interaction;
pub use interaction::*;

mod pixels;
pub use pixels::*;

mod squircle;
pub use squircle::*;

mod transitions;
pub use transitions::*;

mod navigation;
pub use navigation::*;

mod focus_memory;
pub(crate) use focus_memory::*;
