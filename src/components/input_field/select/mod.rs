use std::{f32::consts::PI, rc::Rc};

use gpui::{
    App, CursorStyle, ElementId, Entity, FocusHandle, InteractiveElement, IntoElement, KeyBinding,
    MouseButton, ParentElement, RenderOnce, SharedString, StatefulInteractiveElement, Styled,
    Subscription, Window, actions, div, prelude::FluentBuilder, px, radians,
};
use gpui_squircle::{SquircleStyled, squircle};
use gpui_transitions::Lerp;
use thiserror::Error;

use crate::{
    MosaicIconKind,
    components::{
        Icon,
        input_field::{FieldChrome, FieldChromeExt, FormControl, InputFieldSize},
    },
    conditional_transition,
    primitives::FocusRing,
    theme::{ThemeExt, ThemeLayerKind},
    utils::{
        ElementIdExt, InteractionStates, Step, disabled_transition, step_enabled,
        visibility_transition,
    },
};

mod menu;
use menu::SelectMenu;

actions!(select_menu, [MoveUp, MoveDown, Confirm, CloseMenu]);

pub const DEFAULT_SELECT_PLACEHOLDER: &str = "Select...";

pub(crate) fn init(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("up", MoveUp, Some("SelectMenu")),
        KeyBinding::new("down", MoveDown, Some("SelectMenu")),
        KeyBinding::new("enter", Confirm, Some("SelectMenu")),
        KeyBinding::new("escape", CloseMenu, Some("SelectMenu")),
    ]);
}

/// One choice of a [`Select`].
#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    pub value: SharedString,
    pub label: SharedString,
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<SharedString>, label: impl Into<SharedString>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SelectError {
    #[error("\"{0}\" is not one of the options")]
    UnknownValue(SharedString),
    #[error("\"{0}\" is disabled")]
    DisabledOption(SharedString),
    #[error("a single select holds one value, got {0}")]
    SingleSelection(usize),
}

/// Text shown in the closed select.
///
/// A single select falls back to the raw value when it matches no option.
/// A multiple select only lists values that match an option.
pub fn display_label(
    options: &[SelectOption],
    selection: &[SharedString],
    multiple: bool,
    placeholder: &str,
) -> SharedString {
    let label_of = |value: &SharedString| {
        options
            .iter()
            .find(|option| &option.value == value)
            .map(|option| option.label.clone())
    };

    match selection {
        [] => SharedString::from(placeholder.to_string()),
        [value, ..] if !multiple && value.is_empty() => SharedString::from(placeholder.to_string()),
        [value, ..] if !multiple => label_of(value).unwrap_or_else(|| value.clone()),
        values => values
            .iter()
            .filter_map(label_of)
            .filter(|label| !label.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
            .into(),
    }
}

/// Checks a controlled or default selection against the options.
pub fn validate_selection(
    options: &[SelectOption],
    selection: &[SharedString],
    multiple: bool,
) -> Result<(), SelectError> {
    if !multiple && selection.len() > 1 {
        return Err(SelectError::SingleSelection(selection.len()));
    }

    match selection
        .iter()
        .find(|value| !options.iter().any(|option| &option.value == *value))
    {
        Some(unknown) => Err(SelectError::UnknownValue(unknown.clone())),
        None => Ok(()),
    }
}

/// The selection after choosing `value`. Single selects replace the value,
/// multiple selects toggle its membership.
pub fn choose_option(
    options: &[SelectOption],
    selection: &[SharedString],
    value: &SharedString,
    multiple: bool,
) -> Result<Vec<SharedString>, SelectError> {
    let option = options
        .iter()
        .find(|option| &option.value == value)
        .ok_or_else(|| SelectError::UnknownValue(value.clone()))?;

    if option.disabled {
        return Err(SelectError::DisabledOption(value.clone()));
    }

    if !multiple {
        return Ok(vec![value.clone()]);
    }

    let mut next = selection.to_vec();
    match next.iter().position(|selected| selected == value) {
        Some(ix) => {
            next.remove(ix);
        }
        None => next.push(value.clone()),
    }

    Ok(next)
}

type SelectCallback = Rc<dyn Fn(&[SharedString], &mut Window, &mut App)>;
type FocusCallback = Rc<dyn Fn(&mut Window, &mut App)>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct MenuState {
    open: bool,
    highlighted: Option<usize>,
}

/// Shared by the trigger, the menu rows and the keyboard actions.
#[derive(Clone)]
struct SelectController {
    options: Rc<[SelectOption]>,
    multiple: bool,
    selection: Rc<[SharedString]>,
    internal_selection: Entity<Vec<SharedString>>,
    is_controlled: bool,
    menu: Entity<MenuState>,
    on_change: Option<SelectCallback>,
}

impl SelectController {
    fn is_enabled(&self, ix: usize) -> bool {
        self.options.get(ix).is_some_and(|option| !option.disabled)
    }

    fn is_selected(&self, value: &SharedString) -> bool {
        self.selection.contains(value)
    }

    fn open(&self, cx: &mut App) {
        let highlighted = self
            .selection
            .first()
            .and_then(|value| self.options.iter().position(|option| &option.value == value))
            .filter(|ix| self.is_enabled(*ix));

        self.menu.update(cx, |menu, cx| {
            if !menu.open {
                *menu = MenuState {
                    open: true,
                    highlighted,
                };
                cx.notify();
            }
        });
    }

    fn close(&self, cx: &mut App) {
        close_menu(&self.menu, cx);
    }

    fn toggle(&self, cx: &mut App) {
        if self.menu.read(cx).open {
            self.close(cx);
        } else {
            self.open(cx);
        }
    }

    fn highlight(&self, ix: usize, cx: &mut App) {
        self.menu.update(cx, |menu, cx| {
            if menu.highlighted != Some(ix) {
                menu.highlighted = Some(ix);
                cx.notify();
            }
        });
    }

    fn step(&self, step: Step, cx: &mut App) {
        let menu = *self.menu.read(cx);
        if !menu.open {
            self.open(cx);
            return;
        }

        if let Some(ix) = step_enabled(self.options.len(), menu.highlighted, step, |ix| {
            self.is_enabled(ix)
        }) {
            self.highlight(ix, cx);
        }
    }

    fn confirm(&self, window: &mut Window, cx: &mut App) {
        let menu = *self.menu.read(cx);
        match (menu.open, menu.highlighted) {
            (false, _) => self.open(cx),
            (true, Some(ix)) => self.choose(ix, window, cx),
            (true, None) => {}
        }
    }

    fn choose(&self, ix: usize, window: &mut Window, cx: &mut App) {
        let Some(option) = self.options.get(ix) else {
            return;
        };

        let next = match choose_option(&self.options, &self.selection, &option.value, self.multiple)
        {
            Ok(next) => next,
            Err(err) => {
                tracing::debug!(%err, "select rejected option");
                return;
            }
        };

        if !self.is_controlled {
            self.internal_selection.update(cx, |selection, cx| {
                *selection = next.clone();
                cx.notify();
            });
        }

        if !self.multiple {
            self.close(cx);
        }

        if let Some(on_change) = self.on_change.as_ref() {
            on_change(&next, window, cx);
        }
    }
}

fn close_menu(menu: &Entity<MenuState>, cx: &mut App) {
    menu.update(cx, |menu, cx| {
        if menu.open {
            menu.open = false;
            cx.notify();
        }
    });
}

/// Keeps focus callbacks current and closes the menu when the trigger loses focus.
struct SelectListeners {
    on_focus: Option<FocusCallback>,
    on_blur: Option<FocusCallback>,
    _subscriptions: Vec<Subscription>,
}

impl SelectListeners {
    fn use_keyed(
        id: &ElementId,
        focus_handle: &FocusHandle,
        menu: &Entity<MenuState>,
        window: &mut Window,
        cx: &mut App,
    ) -> Entity<Self> {
        window.use_keyed_state(id.with_suffix("state:listeners"), cx, |window, cx| {
            let this = cx.weak_entity();
            let menu = menu.downgrade();

            let on_focus = {
                let this = this.clone();
                window.on_focus(focus_handle, cx, move |window, cx| {
                    let callback = this.read_with(cx, |this, _| this.on_focus.clone());
                    if let Ok(Some(callback)) = callback {
                        callback(window, cx);
                    }
                })
            };

            let on_blur = window.on_blur(focus_handle, cx, move |window, cx| {
                if let Some(menu) = menu.upgrade() {
                    close_menu(&menu, cx);
                }

                let callback = this.read_with(cx, |this, _| this.on_blur.clone());
                if let Ok(Some(callback)) = callback {
                    callback(window, cx);
                }
            });

            SelectListeners {
                on_focus: None,
                on_blur: None,
                _subscriptions: vec![on_focus, on_blur],
            }
        })
    }
}

/// A dropdown choosing one or many of a fixed set of options.
///
/// Pass `value` to control the selection; otherwise it is kept in keyed state
/// starting at `default_value`.
#[derive(IntoElement)]
pub struct Select {
    id: ElementId,
    options: Vec<SelectOption>,
    multiple: bool,
    size: InputFieldSize,
    layer: ThemeLayerKind,
    placeholder: Option<SharedString>,
    value: Option<Vec<SharedString>>,
    default_value: Option<Vec<SharedString>>,
    disabled: bool,
    chrome: FieldChrome,
    focus_handle: Option<FocusHandle>,
    on_change: Option<SelectCallback>,
    on_focus: Option<FocusCallback>,
    on_blur: Option<FocusCallback>,
}

impl Select {
    pub fn new(id: impl Into<ElementId>, options: impl IntoIterator<Item = SelectOption>) -> Self {
        Self {
            id: id.into(),
            options: options.into_iter().collect(),
            multiple: false,
            size: InputFieldSize::default(),
            layer: ThemeLayerKind::Tertiary,
            placeholder: None,
            value: None,
            default_value: None,
            disabled: false,
            chrome: FieldChrome::default(),
            focus_handle: None,
            on_change: None,
            on_focus: None,
            on_blur: None,
        }
    }

    /// Lets the menu hold several values. The menu stays open while choosing.
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn size(mut self, size: InputFieldSize) -> Self {
        self.size = size;
        self
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn value(mut self, value: impl IntoIterator<Item = impl Into<SharedString>>) -> Self {
        self.value = Some(value.into_iter().map(Into::into).collect());
        self
    }

    pub fn default_value(
        mut self,
        value: impl IntoIterator<Item = impl Into<SharedString>>,
    ) -> Self {
        self.default_value = Some(value.into_iter().map(Into::into).collect());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Uses an existing focus handle for the trigger instead of a keyed one.
    pub fn focus_handle(mut self, focus_handle: FocusHandle) -> Self {
        self.focus_handle = Some(focus_handle);
        self
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&[SharedString], &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    pub fn on_focus(mut self, on_focus: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_focus = Some(Rc::new(on_focus));
        self
    }

    pub fn on_blur(mut self, on_blur: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_blur = Some(Rc::new(on_blur));
        self
    }
}

impl FieldChromeExt for Select {
    fn chrome_mut(&mut self) -> &mut FieldChrome {
        &mut self.chrome
    }
}

impl RenderOnce for Select {
    fn render(mut self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let colors = &cx.get_theme().variants.active(cx).colors;
        let (primary_text_color, secondary_text_color) = colors.text.all();
        let primary_accent_color = colors.accent.primary;
        let destructive_accent_color = colors.accent.destructive;
        let background_color = self.layer.resolve(cx);
        let border_color = self.layer.next().resolve(cx);
        let border_hover_color = border_color.lerp(&primary_text_color, 0.07);
        let corner_radius = cx.get_theme().layout.corner_radii.md;
        let gap = cx.get_theme().layout.padding.md;
        let metrics = self.size.metrics(false, window, cx);

        let mut interaction = InteractionStates::use_keyed(&self.id, window, cx);
        if let Some(focus_handle) = self.focus_handle.take() {
            interaction.focus_handle = focus_handle;
        }
        let initial_selection = self.default_value.clone().unwrap_or_default();
        let internal_selection = window.use_keyed_state(
            self.id.with_suffix("state:selection"),
            cx,
            move |_window, _cx| initial_selection,
        );
        let menu = window.use_keyed_state(self.id.with_suffix("state:menu"), cx, |_window, _cx| {
            MenuState::default()
        });

        let listeners =
            SelectListeners::use_keyed(&self.id, &interaction.focus_handle, &menu, window, cx);
        let (on_focus, on_blur) = (self.on_focus.clone(), self.on_blur.clone());
        listeners.update(cx, |this, _cx| {
            this.on_focus = on_focus;
            this.on_blur = on_blur;
        });

        let selection: Vec<SharedString> = match self.value.clone() {
            Some(value) => value,
            None => internal_selection.read(cx).clone(),
        };

        if let Err(err) = validate_selection(&self.options, &selection, self.multiple) {
            tracing::debug!(id = ?self.id, %err, "select value doesn't match its options");
        }

        let is_disabled = self.disabled;
        let is_invalid = self.chrome.error;
        interaction.blur_if_disabled(window, is_disabled);
        if is_disabled {
            close_menu(&menu, cx);
        }

        let is_focus = interaction.is_focus(window);
        let is_hover = interaction.is_hover(cx);
        let is_open = menu.read(cx).open;

        let label = display_label(
            &self.options,
            &selection,
            self.multiple,
            self.placeholder
                .as_deref()
                .unwrap_or(DEFAULT_SELECT_PLACEHOLDER),
        );
        let label_color = if selection.is_empty() {
            secondary_text_color
        } else {
            primary_text_color
        };

        let controller = SelectController {
            options: self.options.into(),
            multiple: self.multiple,
            selection: selection.into(),
            internal_selection,
            is_controlled: self.value.is_some(),
            menu: menu.clone(),
            on_change: self.on_change,
        };

        let disabled_transition = disabled_transition(self.id.clone(), window, cx, is_disabled);
        let menu_visible_delta = *visibility_transition(self.id.with_suffix("menu"), window, cx, is_open)
            .evaluate(window, cx);

        let border_color_transition = conditional_transition!(
            self.id.with_suffix("state:transition:border_color"),
            window,
            cx,
            std::time::Duration::from_millis(400),
            {
                is_invalid => destructive_accent_color,
                is_focus => primary_accent_color,
                is_hover => border_hover_color,
                _ => border_color
            }
        );

        let controller_up = controller.clone();
        let controller_down = controller.clone();
        let controller_confirm = controller.clone();
        let controller_close = controller.clone();
        let controller_click = controller.clone();
        let hover_state = interaction.hover.clone();
        let focus_handle = interaction.focus_handle.clone();

        let control = div()
            .id(self.id.clone())
            .key_context("SelectMenu")
            .relative()
            .when(self.chrome.full_width, |this| this.w_full())
            .min_w(px(180.))
            .pt(metrics.vertical_padding)
            .pb(metrics.vertical_padding)
            .pl(metrics.horizontal_padding)
            .pr(metrics.horizontal_padding)
            .flex()
            .items_center()
            .justify_between()
            .gap(gap)
            .opacity(*disabled_transition.evaluate(window, cx))
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                    .rounded(corner_radius),
            )
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(corner_radius)
                    .bg(background_color)
                    .border(px(1.))
                    .border_inside()
                    .border_color(*border_color_transition.evaluate(window, cx)),
            )
            .child(
                div()
                    .flex_1()
                    .min_w_0()
                    .overflow_hidden()
                    .whitespace_nowrap()
                    .text_size(metrics.text_size)
                    .line_height(metrics.line_height)
                    .font_family(metrics.font_family.clone())
                    .text_color(label_color)
                    .map(|this| {
                        #[cfg(feature = "test-support")]
                        let this = {
                            let selector = format!("{}:label:{}", self.id, label);
                            this.debug_selector(move || selector)
                        };
                        this
                    })
                    .child(label),
            )
            .child(
                Icon::new(MosaicIconKind::ArrowDown)
                    .size(px(11.))
                    .color(secondary_text_color)
                    .rotate(radians(menu_visible_delta * PI))
                    .flex_none(),
            )
            .when(menu_visible_delta > 0., |this| {
                this.child(
                    div()
                        .absolute()
                        .top_full()
                        .left_0()
                        .right_0()
                        .pt(gap)
                        .child(
                            SelectMenu::new(self.id.with_suffix("menu"), controller.clone())
                                .layer(self.layer)
                                .size(self.size)
                                .opacity(menu_visible_delta)
                                .trigger_hover(hover_state.clone()),
                        ),
                )
            })
            .when(!is_disabled, |this| {
                let hover_state = hover_state.clone();

                this.track_focus(&focus_handle)
                    .on_action(move |_: &MoveUp, _window, cx| {
                        controller_up.step(Step::Previous, cx);
                    })
                    .on_action(move |_: &MoveDown, _window, cx| {
                        controller_down.step(Step::Next, cx);
                    })
                    .on_action(move |_: &Confirm, window, cx| {
                        controller_confirm.confirm(window, cx);
                    })
                    .on_action(move |_: &CloseMenu, _window, cx| {
                        controller_close.close(cx);
                    })
                    .on_hover(move |hover, _window, cx| {
                        hover_state.update(cx, |this, cx| {
                            *this = *hover;
                            cx.notify();
                        });
                    })
                    .on_mouse_down(MouseButton::Left, move |_event, window, cx| {
                        focus_handle.focus(window, cx);
                    })
                    .on_click(move |_event, _window, cx| {
                        controller_click.toggle(cx);
                    })
            });

        FormControl::new(self.chrome, control).disabled(is_disabled)
    }
}

#[cfg(test)]
mod pure_tests {
    use super::*;

    fn options() -> Vec<SelectOption> {
        vec![
            SelectOption::new("red", "Red"),
            SelectOption::new("green", "Green").disabled(true),
            SelectOption::new("blue", "Blue"),
        ]
    }

    fn values(values: &[&'static str]) -> Vec<SharedString> {
        values.iter().map(|value| SharedString::from(*value)).collect()
    }

    #[test]
    fn test_display_label() {
        let options = options();

        assert_eq!(
            display_label(&options, &[], false, DEFAULT_SELECT_PLACEHOLDER).as_ref(),
            "Select..."
        );
        assert_eq!(
            display_label(&options, &values(&["blue"]), false, "").as_ref(),
            "Blue"
        );
        assert_eq!(
            display_label(&options, &values(&["teal"]), false, "").as_ref(),
            "teal",
            "Unknown values are shown as is"
        );
        assert_eq!(
            display_label(&options, &values(&["blue", "red"]), true, "").as_ref(),
            "Blue, Red"
        );
        assert_eq!(
            display_label(&options, &values(&["blue", "teal", "red"]), true, "").as_ref(),
            "Blue, Red",
            "A multiple select drops unknown values"
        );
        assert_eq!(
            display_label(&options, &values(&["teal"]), true, "Pick").as_ref(),
            ""
        );
        assert_eq!(
            display_label(&options, &values(&[""]), false, "Pick").as_ref(),
            "Pick"
        );
    }

    #[test]
    fn test_single_choice_replaces() {
        let next = choose_option(&options(), &values(&["red"]), &"blue".into(), false);
        assert_eq!(next, Ok(values(&["blue"])));

        let next = choose_option(&options(), &values(&["red"]), &"red".into(), false);
        assert_eq!(next, Ok(values(&["red"])));
    }

    #[test]
    fn test_multiple_choice_toggles() {
        let next = choose_option(&options(), &values(&["red"]), &"blue".into(), true);
        assert_eq!(next, Ok(values(&["red", "blue"])));

        let next = choose_option(&options(), &values(&["red", "blue"]), &"red".into(), true);
        assert_eq!(next, Ok(values(&["blue"])));
    }

    #[test]
    fn test_rejected_choices() {
        assert_eq!(
            choose_option(&options(), &[], &"green".into(), false),
            Err(SelectError::DisabledOption("green".into()))
        );
        assert_eq!(
            choose_option(&options(), &[], &"teal".into(), true),
            Err(SelectError::UnknownValue("teal".into()))
        );
    }

    #[test]
    fn test_validate_selection() {
        assert_eq!(validate_selection(&options(), &values(&["red"]), false), Ok(()));
        assert_eq!(
            validate_selection(&options(), &values(&["red", "blue"]), false),
            Err(SelectError::SingleSelection(2))
        );
        assert_eq!(
            validate_selection(&options(), &values(&["red", "teal"]), true),
            Err(SelectError::UnknownValue("teal".into()))
        );
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::theme::Theme;
    use gpui::{AppContext, Context, Render, TestAppContext, VisualTestContext};

    struct SelectTestView {
        multiple: bool,
        changes: Rc<RefCell<Vec<Vec<SharedString>>>>,
        focus_handle: FocusHandle,
    }

    impl Render for SelectTestView {
        fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
            let changes = self.changes.clone();

            div().size_full().child(
                Select::new(
                    "select",
                    [
                        SelectOption::new("red", "Red"),
                        SelectOption::new("green", "Green").disabled(true),
                        SelectOption::new("blue", "Blue"),
                    ],
                )
                .multiple(self.multiple)
                .label("Color")
                .focus_handle(self.focus_handle.clone())
                .on_change(move |values, _window, _cx| {
                    changes.borrow_mut().push(values.to_vec());
                }),
            )
        }
    }

    fn open(cx: &mut TestAppContext, multiple: bool) -> (Entity<SelectTestView>, VisualTestContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            crate::init(cx);

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|cx| SelectTestView {
                    multiple,
                    changes: Rc::default(),
                    focus_handle: cx.focus_handle(),
                })
            })
            .unwrap()
        });

        let view = window.root(cx).unwrap();
        let mut vcx = VisualTestContext::from_window(window.into(), cx);
        vcx.run_until_parked();

        (view, vcx)
    }

    fn focus_select(view: &Entity<SelectTestView>, vcx: &mut VisualTestContext) {
        vcx.update(|window, cx| {
            let focus_handle = view.read(cx).focus_handle.clone();
            focus_handle.focus(window, cx);
        });
        vcx.run_until_parked();
    }

    fn dispatch(vcx: &mut VisualTestContext, action: impl gpui::Action) {
        let action = Box::new(action);
        vcx.update(|window, cx| window.dispatch_action(action, cx));
        vcx.run_until_parked();
    }

    #[gpui::test]
    fn test_keyboard_skips_disabled_options(cx: &mut TestAppContext) {
        let (view, mut vcx) = open(cx, false);
        focus_select(&view, &mut vcx);

        // Opens the menu, then highlights red, then skips green for blue.
        dispatch(&mut vcx, MoveDown);
        dispatch(&mut vcx, MoveDown);
        dispatch(&mut vcx, MoveDown);
        dispatch(&mut vcx, Confirm);

        let changes = vcx.update(|_window, cx| view.read(cx).changes.borrow().clone());
        assert_eq!(changes, vec![vec![SharedString::from("blue")]]);
    }

    #[gpui::test]
    fn test_multiple_keeps_toggling(cx: &mut TestAppContext) {
        let (view, mut vcx) = open(cx, true);
        focus_select(&view, &mut vcx);

        dispatch(&mut vcx, MoveDown);
        dispatch(&mut vcx, MoveDown);
        dispatch(&mut vcx, Confirm);
        dispatch(&mut vcx, MoveUp);
        dispatch(&mut vcx, Confirm);
        dispatch(&mut vcx, MoveDown);
        dispatch(&mut vcx, Confirm);

        let changes = vcx.update(|_window, cx| view.read(cx).changes.borrow().clone());
        assert_eq!(
            changes,
            vec![
                vec![SharedString::from("red")],
                vec![SharedString::from("red"), SharedString::from("blue")],
                vec![SharedString::from("blue")],
            ]
        );
    }

    #[gpui::test]
    fn test_multiple_label_follows_toggles(cx: &mut TestAppContext) {
        let (view, mut vcx) = open(cx, true);
        assert!(vcx.debug_bounds("select:label:Select...").is_some());

        focus_select(&view, &mut vcx);
        dispatch(&mut vcx, MoveDown);
        dispatch(&mut vcx, MoveDown);
        dispatch(&mut vcx, Confirm);
        assert!(vcx.debug_bounds("select:label:Red").is_some());

        dispatch(&mut vcx, MoveDown);
        dispatch(&mut vcx, Confirm);
        assert!(vcx.debug_bounds("select:label:Red, Blue").is_some());

        dispatch(&mut vcx, MoveUp);
        dispatch(&mut vcx, Confirm);
        assert!(vcx.debug_bounds("select:label:Blue").is_some());
        assert!(vcx.debug_bounds("select:label:Red, Blue").is_none());
    }
}
