use std::{rc::Rc, time::Duration};

use gpui::{
    AnyElement, App, CursorStyle, ElementId, Entity, FocusHandle, InteractiveElement, IntoElement,
    MouseButton, ParentElement, Pixels, RenderOnce, Rgba, SharedString,
    StatefulInteractiveElement, Styled, Window, div, prelude::FluentBuilder, px,
};
use gpui_transitions::Lerp;

use crate::{
    MosaicIconKind,
    components::Icon,
    extensions::{
        deferrable::{Deferrable, DeferredConfig, pin_to_window, priority},
        dismiss::Dismiss,
    },
    primitives::min_w0_wrapper,
    theme::{ThemeAccentKind, ThemeExt, ThemeTextSizeKind},
    utils::{ElementIdExt, FocusHandoff, FocusMemory, sync_overlay_focus, visibility_transition},
};

pub const DEFAULT_AUTO_HIDE: Duration = Duration::from_millis(6000);
const WINDOW_MARGIN: Pixels = px(24.);
const MIN_WIDTH: Pixels = px(288.);
const MAX_WIDTH: Pixels = px(560.);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SnackbarSeverity {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

impl SnackbarSeverity {
    pub fn accent(&self) -> ThemeAccentKind {
        match self {
            SnackbarSeverity::Success => ThemeAccentKind::Constructive,
            SnackbarSeverity::Error => ThemeAccentKind::Destructive,
            SnackbarSeverity::Info => ThemeAccentKind::Info,
            SnackbarSeverity::Warning => ThemeAccentKind::Warning,
        }
    }

    pub fn icon(&self) -> MosaicIconKind {
        match self {
            SnackbarSeverity::Success => MosaicIconKind::Success,
            SnackbarSeverity::Error => MosaicIconKind::Error,
            SnackbarSeverity::Info => MosaicIconKind::Info,
            SnackbarSeverity::Warning => MosaicIconKind::Warning,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SnackbarVariant {
    #[default]
    Standard,
    Filled,
    Outlined,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SnackbarVertical {
    Top,
    #[default]
    Bottom,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SnackbarHorizontal {
    #[default]
    Left,
    Center,
    Right,
}

/// Window corner or edge a snackbar is pinned to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SnackbarPosition {
    pub vertical: SnackbarVertical,
    pub horizontal: SnackbarHorizontal,
}

impl SnackbarPosition {
    pub fn new(vertical: SnackbarVertical, horizontal: SnackbarHorizontal) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

/// `anchor_origin` wins over `position`; bottom-left when neither is set.
pub fn resolve_anchor(
    anchor_origin: Option<SnackbarPosition>,
    position: Option<SnackbarPosition>,
) -> SnackbarPosition {
    anchor_origin.or(position).unwrap_or_default()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnackbarCloseReason {
    Timeout,
    CloseButton,
    Escape,
    /// A click outside the snackbar. Never forwarded to `on_close`.
    Clickaway,
}

impl SnackbarCloseReason {
    pub fn is_forwarded(&self) -> bool {
        !matches!(self, SnackbarCloseReason::Clickaway)
    }
}

type OnClose = Rc<dyn Fn(&SnackbarCloseReason, &mut Window, &mut App)>;

fn emit_close(
    on_close: Option<&OnClose>,
    reason: SnackbarCloseReason,
    window: &mut Window,
    cx: &mut App,
) {
    if !reason.is_forwarded() {
        tracing::trace!(?reason, "ignoring snackbar close");
        return;
    }

    tracing::debug!(?reason, "closing snackbar");

    if let Some(on_close) = on_close {
        on_close(&reason, window, cx);
    }
}

/// Tracks open transitions so the auto-hide timer restarts on every open.
#[derive(Debug, Default)]
pub struct AutoHideState {
    epoch: usize,
    was_open: bool,
}

impl AutoHideState {
    /// Records the latest `open` prop. Returns the epoch of a timer that must
    /// be scheduled, when the snackbar just opened.
    pub fn sync(&mut self, open: bool) -> Option<usize> {
        match (self.was_open, open) {
            (false, true) => {
                self.was_open = true;
                self.epoch = self.epoch.wrapping_add(1);
                Some(self.epoch)
            }
            (true, false) => {
                // Invalidates the pending timer.
                self.was_open = false;
                self.epoch = self.epoch.wrapping_add(1);
                None
            }
            _ => None,
        }
    }

    pub fn is_current(&self, epoch: usize) -> bool {
        self.was_open && self.epoch == epoch
    }
}

fn schedule_auto_hide(
    state: &Entity<AutoHideState>,
    epoch: usize,
    duration: Duration,
    on_close: Option<OnClose>,
    window: &mut Window,
    cx: &mut App,
) {
    let state = state.downgrade();

    window
        .spawn(cx, async move |cx| {
            cx.background_executor().timer(duration).await;

            let _ = cx.update(|window, cx| {
                let Some(state) = state.upgrade() else {
                    return;
                };

                if state.read(cx).is_current(epoch) {
                    emit_close(on_close.as_ref(), SnackbarCloseReason::Timeout, window, cx);
                }
            });
        })
        .detach();
}

/// A brief message pinned to an edge of the window.
#[derive(IntoElement)]
pub struct Snackbar {
    id: ElementId,
    open: bool,
    message: SharedString,
    severity: SnackbarSeverity,
    variant: SnackbarVariant,
    auto_hide_duration: Option<Duration>,
    position: Option<SnackbarPosition>,
    anchor_origin: Option<SnackbarPosition>,
    show_close_button: bool,
    action: Option<AnyElement>,
    on_close: Option<OnClose>,
    focus_handle: Option<FocusHandle>,
    deferred_config: DeferredConfig,
}

impl Snackbar {
    pub fn new(id: impl Into<ElementId>, message: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            open: false,
            message: message.into(),
            severity: SnackbarSeverity::default(),
            variant: SnackbarVariant::default(),
            auto_hide_duration: Some(DEFAULT_AUTO_HIDE),
            position: None,
            anchor_origin: None,
            show_close_button: true,
            action: None,
            on_close: None,
            focus_handle: None,
            deferred_config: DeferredConfig::default(),
        }
    }

    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    pub fn severity(mut self, severity: SnackbarSeverity) -> Self {
        self.severity = severity;
        self
    }

    pub fn variant(mut self, variant: SnackbarVariant) -> Self {
        self.variant = variant;
        self
    }

    /// `None` keeps the snackbar open until it is closed explicitly.
    pub fn auto_hide_duration(mut self, duration: Option<Duration>) -> Self {
        self.auto_hide_duration = duration;
        self
    }

    pub fn position(mut self, position: SnackbarPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn anchor_origin(mut self, anchor_origin: SnackbarPosition) -> Self {
        self.anchor_origin = Some(anchor_origin);
        self
    }

    pub fn show_close_button(mut self, show_close_button: bool) -> Self {
        self.show_close_button = show_close_button;
        self
    }

    pub fn action(mut self, action: impl IntoElement) -> Self {
        self.action = Some(action.into_any_element());
        self
    }

    pub fn on_close(
        mut self,
        on_close: impl Fn(&SnackbarCloseReason, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_close = Some(Rc::new(on_close));
        self
    }

    pub fn focus_handle(mut self, focus_handle: FocusHandle) -> Self {
        self.focus_handle = Some(focus_handle);
        self
    }

    pub fn anchor(&self) -> SnackbarPosition {
        resolve_anchor(self.anchor_origin, self.position)
    }

    /// Background, border, and foreground for the severity and variant.
    fn palette(&self, cx: &App) -> (Rgba, Rgba, Rgba) {
        let colors = &cx.get_theme().variants.active(cx).colors;
        let accent = self.severity.accent().resolve(cx);
        let surface = colors.background.secondary;

        match self.variant {
            SnackbarVariant::Filled => (accent, accent, colors.accent.contrast),
            SnackbarVariant::Outlined => (surface, accent, accent),
            SnackbarVariant::Standard => {
                (surface.lerp(&accent, 0.15), surface, colors.text.primary)
            }
        }
    }
}

impl Deferrable for Snackbar {
    const DEFAULT_PRIORITY: usize = priority::SNACKBAR;

    fn deferred_config(&self) -> &DeferredConfig {
        &self.deferred_config
    }

    fn deferred_config_mut(&mut self) -> &mut DeferredConfig {
        &mut self.deferred_config
    }
}

impl RenderOnce for Snackbar {
    fn render(mut self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let auto_hide = window.use_keyed_state(
            self.id.with_suffix("state:auto_hide"),
            cx,
            |_window, _cx| AutoHideState::default(),
        );

        let scheduled = auto_hide.update(cx, |state, _cx| state.sync(self.open));
        if let (Some(epoch), Some(duration)) = (scheduled, self.auto_hide_duration) {
            schedule_auto_hide(&auto_hide, epoch, duration, self.on_close.clone(), window, cx);
        }

        let visible_delta = *visibility_transition(self.id.clone(), window, cx, self.open)
            .evaluate(window, cx);

        let focus_handle = match self.focus_handle.take() {
            Some(focus_handle) => focus_handle,
            None => window
                .use_keyed_state(self.id.with_suffix("state:focus_handle"), cx, |_window, cx| {
                    cx.focus_handle()
                })
                .read(cx)
                .clone(),
        };

        // Escape only reaches focused key contexts, so the snackbar holds
        // focus while open.
        let focus_memory = FocusMemory::use_keyed(&self.id, window, cx);
        sync_overlay_focus(
            &focus_memory,
            self.open,
            &focus_handle,
            FocusHandoff::default(),
            window,
            cx,
        );

        if visible_delta == 0. && !self.open {
            return div().into_any_element();
        }

        let anchor = self.anchor();
        let (background, border, foreground) = self.palette(cx);
        let viewport = window.viewport_size();
        let corner_radius = cx.get_theme().layout.corner_radii.md;

        let icon_color = match self.variant {
            SnackbarVariant::Standard => self.severity.accent().resolve(cx),
            _ => foreground,
        };

        let on_close_escape = self.on_close.clone();
        let on_close_clickaway = self.on_close.clone();
        let on_close_button = self.on_close.clone();

        let card = div()
            .id(self.id.clone())
            .key_context("Snackbar")
            .track_focus(&focus_handle)
            .occlude()
            .flex()
            .items_center()
            .gap(px(12.))
            .min_w(MIN_WIDTH)
            .max_w(MAX_WIDTH)
            .px(px(16.))
            .py(px(6.))
            .rounded(corner_radius)
            .border_1()
            .border_color(border)
            .bg(background)
            .shadow_lg()
            .opacity(visible_delta)
            .on_action(move |_: &Dismiss, window, cx| {
                emit_close(on_close_escape.as_ref(), SnackbarCloseReason::Escape, window, cx);
            })
            .on_mouse_down_out(move |_event, window, cx| {
                emit_close(
                    on_close_clickaway.as_ref(),
                    SnackbarCloseReason::Clickaway,
                    window,
                    cx,
                );
            })
            .child(Icon::new(self.severity.icon()).size(px(20.)).color(icon_color).flex_none())
            .child(
                min_w0_wrapper()
                    .flex_1()
                    .py(px(8.))
                    .text_kind(ThemeTextSizeKind::Body)
                    .text_color(foreground)
                    .child(self.message.clone()),
            )
            .children(self.action.take())
            .when(self.show_close_button, |this| {
                this.child(
                    div()
                        .id(self.id.with_suffix("close"))
                        .flex_none()
                        .p(px(4.))
                        .rounded(px(4.))
                        .cursor(CursorStyle::PointingHand)
                        .hover(|style| style.opacity(0.7))
                        .child(Icon::new(MosaicIconKind::Close).size(px(16.)).color(foreground))
                        .map(|this| {
                            #[cfg(feature = "test-support")]
                            let this = {
                                let selector = format!("{}:close", self.id);
                                this.debug_selector(move || selector)
                            };
                            this
                        })
                        .on_mouse_down(MouseButton::Left, |_event, window, _cx| {
                            window.prevent_default();
                        })
                        .on_click(move |_event, window, cx| {
                            cx.stop_propagation();
                            emit_close(
                                on_close_button.as_ref(),
                                SnackbarCloseReason::CloseButton,
                                window,
                                cx,
                            );
                        }),
                )
            });

        let layer = div()
            .w(viewport.width)
            .h(viewport.height)
            .p(WINDOW_MARGIN)
            .flex()
            .flex_col()
            .map(|this| match anchor.vertical {
                SnackbarVertical::Top => this.justify_start(),
                SnackbarVertical::Bottom => this.justify_end(),
            })
            .map(|this| match anchor.horizontal {
                SnackbarHorizontal::Left => this.items_start(),
                SnackbarHorizontal::Center => this.items_center(),
                SnackbarHorizontal::Right => this.items_end(),
            })
            .child(card);

        self.apply_deferred(pin_to_window(layer))
    }
}

#[cfg(test)]
mod pure_tests {
    use super::*;

    #[test]
    fn test_anchor_resolution() {
        let top_center = SnackbarPosition::new(SnackbarVertical::Top, SnackbarHorizontal::Center);
        let bottom_right =
            SnackbarPosition::new(SnackbarVertical::Bottom, SnackbarHorizontal::Right);

        assert_eq!(
            resolve_anchor(Some(top_center), Some(bottom_right)),
            top_center
        );
        assert_eq!(resolve_anchor(None, Some(bottom_right)), bottom_right);
        assert_eq!(
            resolve_anchor(None, None),
            SnackbarPosition::new(SnackbarVertical::Bottom, SnackbarHorizontal::Left)
        );
    }

    #[test]
    fn test_clickaway_is_not_forwarded() {
        assert!(!SnackbarCloseReason::Clickaway.is_forwarded());
        assert!(SnackbarCloseReason::Timeout.is_forwarded());
        assert!(SnackbarCloseReason::CloseButton.is_forwarded());
        assert!(SnackbarCloseReason::Escape.is_forwarded());
    }

    #[test]
    fn test_auto_hide_restarts_on_each_open() {
        let mut state = AutoHideState::default();

        let first = state.sync(true).unwrap();
        assert!(state.is_current(first));
        assert_eq!(state.sync(true), None, "Staying open keeps the timer");

        assert_eq!(state.sync(false), None);
        assert!(!state.is_current(first), "Closing cancels the timer");

        let second = state.sync(true).unwrap();
        assert_ne!(first, second);
        assert!(state.is_current(second));
        assert!(!state.is_current(first));
    }

    #[test]
    fn test_defaults() {
        let snackbar = Snackbar::new("snackbar", "Saved");
        assert_eq!(snackbar.auto_hide_duration, Some(Duration::from_millis(6000)));
        assert!(snackbar.show_close_button);
        assert_eq!(snackbar.severity, SnackbarSeverity::Info);
        assert_eq!(snackbar.variant, SnackbarVariant::Standard);
        assert_eq!(snackbar.resolved_priority(), priority::SNACKBAR);
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(SnackbarSeverity::Error.accent(), ThemeAccentKind::Destructive);
        assert_eq!(SnackbarSeverity::Success.icon(), MosaicIconKind::Success);
        assert_eq!(SnackbarSeverity::Warning.icon(), MosaicIconKind::Warning);
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::theme::Theme;
    use gpui::{
        AppContext, Context, Entity, Modifiers, Render, TestAppContext, VisualTestContext,
    };

    struct SnackbarTestView {
        open: bool,
        trigger_focus: FocusHandle,
        reasons: Rc<RefCell<Vec<SnackbarCloseReason>>>,
    }

    impl Render for SnackbarTestView {
        fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
            let reasons = self.reasons.clone();

            div()
                .size_full()
                .child(div().track_focus(&self.trigger_focus).child("Save"))
                .child(
                    Snackbar::new("snackbar", "Saved")
                        .open(self.open)
                        .auto_hide_duration(Some(Duration::from_millis(100)))
                        .on_close(cx.listener(move |view, reason, _window, cx| {
                            reasons.borrow_mut().push(*reason);
                            view.open = false;
                            cx.notify();
                        })),
                )
        }
    }

    fn open_window(cx: &mut TestAppContext, open: bool) -> (Entity<SnackbarTestView>, VisualTestContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            crate::init(cx);

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|cx| SnackbarTestView {
                    open,
                    trigger_focus: cx.focus_handle(),
                    reasons: Rc::default(),
                })
            })
            .unwrap()
        });

        let view = window.root(cx).unwrap();
        (view, VisualTestContext::from_window(window.into(), cx))
    }

    /// Focuses the trigger, then opens the snackbar with the trigger focused.
    fn open_from_trigger(cx: &mut TestAppContext) -> (Entity<SnackbarTestView>, VisualTestContext) {
        let (view, mut vcx) = open_window(cx, false);
        vcx.run_until_parked();

        vcx.update(|window, cx| {
            let trigger_focus = view.read(cx).trigger_focus.clone();
            trigger_focus.focus(window, cx);
            view.update(cx, |view, cx| {
                view.open = true;
                cx.notify();
            });
        });
        vcx.run_until_parked();

        (view, vcx)
    }

    fn reasons(view: &Entity<SnackbarTestView>, vcx: &mut VisualTestContext) -> Vec<SnackbarCloseReason> {
        vcx.update(|_window, cx| view.read(cx).reasons.borrow().clone())
    }

    #[gpui::test]
    fn test_auto_hide_fires_timeout(cx: &mut TestAppContext) {
        let (view, mut vcx) = open_window(cx, true);
        vcx.run_until_parked();
        assert!(reasons(&view, &mut vcx).is_empty());

        cx.executor().advance_clock(Duration::from_millis(150));
        vcx.run_until_parked();

        assert_eq!(reasons(&view, &mut vcx), vec![SnackbarCloseReason::Timeout]);
    }

    #[gpui::test]
    fn test_closing_cancels_auto_hide(cx: &mut TestAppContext) {
        let (view, mut vcx) = open_window(cx, true);
        vcx.run_until_parked();

        vcx.update(|_window, cx| {
            view.update(cx, |view, cx| {
                view.open = false;
                cx.notify();
            })
        });
        vcx.run_until_parked();

        cx.executor().advance_clock(Duration::from_millis(150));
        vcx.run_until_parked();

        assert!(reasons(&view, &mut vcx).is_empty());
    }

    #[gpui::test]
    fn test_closed_snackbar_never_times_out(cx: &mut TestAppContext) {
        let (view, mut vcx) = open_window(cx, false);
        vcx.run_until_parked();

        cx.executor().advance_clock(Duration::from_millis(500));
        vcx.run_until_parked();

        assert!(reasons(&view, &mut vcx).is_empty());
    }

    #[gpui::test]
    fn test_escape_closes_and_restores_focus(cx: &mut TestAppContext) {
        let (view, mut vcx) = open_from_trigger(cx);

        vcx.update(|window, cx| {
            let trigger_focus = view.read(cx).trigger_focus.clone();
            assert!(!trigger_focus.is_focused(window), "The snackbar takes focus");
            window.dispatch_action(Box::new(Dismiss), cx);
        });
        vcx.run_until_parked();

        assert_eq!(reasons(&view, &mut vcx), vec![SnackbarCloseReason::Escape]);
        vcx.update(|window, cx| {
            let view = view.read(cx);
            assert!(!view.open);
            assert!(view.trigger_focus.is_focused(window), "Focus goes back to the trigger");
        });
    }

    #[gpui::test]
    fn test_close_button_reports_close_button(cx: &mut TestAppContext) {
        let (view, mut vcx) = open_from_trigger(cx);

        let close_bounds = vcx
            .debug_bounds("snackbar:close")
            .expect("close button is painted");
        vcx.simulate_click(close_bounds.center(), Modifiers::default());
        vcx.run_until_parked();

        assert_eq!(reasons(&view, &mut vcx), vec![SnackbarCloseReason::CloseButton]);
    }
}
