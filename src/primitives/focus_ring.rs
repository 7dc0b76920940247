use std::time::Duration;

use gpui::{
    CornersRefinement, ElementId, FocusHandle, Hsla, IntoElement, Pixels, RenderOnce, prelude::*,
    px,
};
use gpui_squircle::{SquircleStyleRefinement, SquircleStyled, squircle};

use crate::{conditional_transition, theme::ThemeExt};

const SIZE_SCALE_FACTOR: f32 = 8.;
const RING_ALPHA: f32 = 0.3;

/// An outline that grows into place around its parent while `focus_handle`
/// is focused. The parent must be positioned (`relative` or `absolute`).
#[derive(IntoElement)]
pub struct FocusRing {
    id: ElementId,
    focus_handle: FocusHandle,
    style: SquircleStyleRefinement,
}

impl FocusRing {
    pub fn new(id: impl Into<ElementId>, focus_handle: FocusHandle) -> Self {
        Self {
            id: id.into(),
            focus_handle,
            style: SquircleStyleRefinement::default(),
        }
    }
}

impl SquircleStyled for FocusRing {
    fn style(&mut self) -> &mut gpui::StyleRefinement {
        &mut self.style.inner
    }

    fn outer_style(&mut self) -> &mut SquircleStyleRefinement {
        &mut self.style
    }
}

impl RenderOnce for FocusRing {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let ring_color: Hsla = self.style.inner.border_color.unwrap_or_else(|| {
            cx.get_theme()
                .variants
                .active(cx)
                .colors
                .accent
                .primary
                .into()
        });

        let is_focused = self.focus_handle.is_focused(window);

        let ring_transition = conditional_transition!(
            self.id.clone(),
            window,
            cx,
            Duration::from_millis(365),
            {
                is_focused => 1.,
                _ => 0.
            }
        );

        let delta: f32 = *ring_transition.evaluate(window, cx);
        let size_factor = (1. - delta) * SIZE_SCALE_FACTOR;
        let corner_radii = grow_corner_radii(&self.style.corner_radii, px(8.), px(size_factor + 1.));

        squircle()
            .absolute()
            .top_0()
            .bottom_0()
            .left_0()
            .right_0()
            .border(px(3.))
            .border_outside()
            .inset(px(-size_factor))
            .border_color(ring_color.opacity(delta * RING_ALPHA))
            .map(|mut this| {
                this.outer_style().corner_radii = corner_radii;
                this
            })
    }
}

fn grow_corner_radii(
    corner_radii: &CornersRefinement<Pixels>,
    default: Pixels,
    amount: Pixels,
) -> CornersRefinement<Pixels> {
    CornersRefinement {
        top_left: Some(corner_radii.top_left.unwrap_or(default) + amount),
        top_right: Some(corner_radii.top_right.unwrap_or(default) + amount),
        bottom_right: Some(corner_radii.bottom_right.unwrap_or(default) + amount),
        bottom_left: Some(corner_radii.bottom_left.unwrap_or(default) + amount),
    }
}
