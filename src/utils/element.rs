use gpui::{AnyElement, IntoElement};

/// Builder methods for components that place extra children around their
/// main content (icons before a label, adornments after an input, ...).
pub trait PositionalParentElement: Sized {
    fn children_mut(&mut self) -> &mut PositionalChildren;

    fn child_top(mut self, child: impl IntoElement) -> Self {
        self.children_mut().top.push(child.into_any_element());
        self
    }

    fn child_bottom(mut self, child: impl IntoElement) -> Self {
        self.children_mut().bottom.push(child.into_any_element());
        self
    }

    fn child_left(mut self, child: impl IntoElement) -> Self {
        self.children_mut().left.push(child.into_any_element());
        self
    }

    fn child_right(mut self, child: impl IntoElement) -> Self {
        self.children_mut().right.push(child.into_any_element());
        self
    }
}

#[derive(Default)]
pub struct PositionalChildren {
    pub top: Vec<AnyElement>,
    pub bottom: Vec<AnyElement>,
    pub left: Vec<AnyElement>,
    pub right: Vec<AnyElement>,
}

impl PositionalChildren {
    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.bottom.is_empty() && self.left.is_empty() && self.right.is_empty()
    }
}
