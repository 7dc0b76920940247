use std::rc::Rc;

use gpui::{
    App, ElementId, Entity, InteractiveElement, IntoElement, KeyBinding, ParentElement,
    RenderOnce, SharedString, Styled, Window, actions, div, prelude::FluentBuilder, px,
};
use gpui_primitives::input::InputState;

use crate::{
    MosaicIconKind,
    components::{
        Icon,
        input_field::{FieldChromeExt, InputFieldSize, TextInput, TextInputKind, use_input_state},
    },
    theme::ThemeExt,
    utils::PositionalParentElement,
};

actions!(search, [SubmitSearch]);

pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "Search Name";

pub(crate) fn init(cx: &mut App) {
    cx.bind_keys([KeyBinding::new("enter", SubmitSearch, Some("Search"))]);
}

type SearchCallback = Rc<dyn Fn(&SharedString, &mut Window, &mut App)>;

/// A text field with a leading search icon. Enter submits the current text.
#[derive(IntoElement)]
pub struct Search {
    id: ElementId,
    size: InputFieldSize,
    placeholder: SharedString,
    state: Option<Entity<InputState>>,
    disabled: bool,
    full_width: bool,
    on_change: Option<SearchCallback>,
    on_submit: Option<SearchCallback>,
}

impl Search {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            size: InputFieldSize::default(),
            placeholder: DEFAULT_SEARCH_PLACEHOLDER.into(),
            state: None,
            disabled: false,
            full_width: false,
            on_change: None,
            on_submit: None,
        }
    }

    pub fn size(mut self, size: InputFieldSize) -> Self {
        self.size = size;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Uses an existing text state instead of one keyed off the id.
    pub fn state(mut self, state: Entity<InputState>) -> Self {
        self.state = Some(state);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    pub fn on_submit(
        mut self,
        on_submit: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_submit = Some(Rc::new(on_submit));
        self
    }
}

impl RenderOnce for Search {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let secondary_text_color = cx.get_theme().variants.active(cx).colors.text.secondary;
        let icon_size = match self.size {
            InputFieldSize::Small => px(14.),
            InputFieldSize::Medium => px(16.),
            InputFieldSize::Large => px(18.),
        };

        let state = match self.state {
            Some(state) => state,
            None => use_input_state(&self.id, None, window, cx),
        };

        let mut input = TextInput::new(self.id.clone(), TextInputKind::Search)
            .state(state.clone())
            .size(self.size)
            .placeholder(self.placeholder)
            .disabled(self.disabled)
            .full_width(self.full_width)
            .child_left(
                Icon::new(MosaicIconKind::Search)
                    .size(icon_size)
                    .color(secondary_text_color)
                    .flex_none(),
            );

        if let Some(on_change) = self.on_change {
            input = input.on_change(move |text, window, cx| on_change(text, window, cx));
        }

        let is_disabled = self.disabled;

        div()
            .key_context("Search")
            .when(self.full_width, |this| this.w_full())
            .when_some(self.on_submit, |this, on_submit| {
                this.on_action(move |_: &SubmitSearch, window, cx| {
                    if is_disabled {
                        return;
                    }

                    let text = state.read(cx).value();
                    tracing::debug!(%text, "search submitted");
                    on_submit(&text, window, cx);
                })
            })
            .child(input)
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{components::input_field::replace_input_value, theme::Theme};
    use gpui::{AppContext, Context, Focusable, Render, TestAppContext, VisualTestContext};

    struct SearchTestView {
        state: Entity<InputState>,
        disabled: bool,
        changes: Rc<RefCell<Vec<SharedString>>>,
        submits: Rc<RefCell<Vec<SharedString>>>,
    }

    impl Render for SearchTestView {
        fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
            let changes = self.changes.clone();
            let submits = self.submits.clone();

            Search::new("search")
                .state(self.state.clone())
                .disabled(self.disabled)
                .full_width(true)
                .on_change(move |text, _window, _cx| changes.borrow_mut().push(text.clone()))
                .on_submit(move |text, _window, _cx| submits.borrow_mut().push(text.clone()))
        }
    }

    fn open(cx: &mut TestAppContext, disabled: bool) -> (Entity<SearchTestView>, VisualTestContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            crate::init(cx);

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|cx| SearchTestView {
                    state: cx.new(|cx| InputState::new(cx)),
                    disabled,
                    changes: Rc::default(),
                    submits: Rc::default(),
                })
            })
            .unwrap()
        });

        let view = window.root(cx).unwrap();
        let mut vcx = VisualTestContext::from_window(window.into(), cx);
        vcx.run_until_parked();

        (view, vcx)
    }

    fn type_and_submit(view: &Entity<SearchTestView>, vcx: &mut VisualTestContext, text: &'static str) {
        vcx.update(|window, cx| {
            let state = view.read(cx).state.clone();
            replace_input_value(&state, text.into(), cx);
            state.update(cx, |_state, cx| cx.notify());

            let focus_handle = state.read(cx).focus_handle(cx);
            focus_handle.focus(window, cx);
        });
        vcx.run_until_parked();

        vcx.update(|window, cx| window.dispatch_action(Box::new(SubmitSearch), cx));
        vcx.run_until_parked();
    }

    #[gpui::test]
    fn test_enter_submits_current_text(cx: &mut TestAppContext) {
        let (view, mut vcx) = open(cx, false);
        type_and_submit(&view, &mut vcx, "Ada");

        let (changes, submits) = vcx.update(|_window, cx| {
            let view = view.read(cx);
            (view.changes.borrow().clone(), view.submits.borrow().clone())
        });

        assert_eq!(changes, vec![SharedString::from("Ada")]);
        assert_eq!(submits, vec![SharedString::from("Ada")]);
    }

    #[gpui::test]
    fn test_disabled_search_does_not_submit(cx: &mut TestAppContext) {
        let (view, mut vcx) = open(cx, true);
        type_and_submit(&view, &mut vcx, "Ada");

        let submits = vcx.update(|_window, cx| view.read(cx).submits.borrow().clone());
        assert!(submits.is_empty());
    }
}
