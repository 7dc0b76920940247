/// Direction of a keyboard step through a list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Previous,
    Next,
}

/// Finds the next enabled index from `current`, wrapping around both ends.
///
/// With no current index, stepping forward starts at the first entry and
/// stepping back at the last. Returns `None` when every entry is disabled.
pub fn step_enabled(
    len: usize,
    current: Option<usize>,
    step: Step,
    is_enabled: impl Fn(usize) -> bool,
) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let mut index = match (current.filter(|index| *index < len), step) {
        (None, Step::Next) => len - 1,
        (None, Step::Previous) => 0,
        (Some(index), _) => index,
    };

    for _ in 0..len {
        index = match step {
            Step::Next => (index + 1) % len,
            Step::Previous => (index + len - 1) % len,
        };

        if is_enabled(index) {
            return Some(index);
        }
    }

    None
}
