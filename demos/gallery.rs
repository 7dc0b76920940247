use chrono::NaiveDate;
use gpui::{
    App, AppContext, Application, Bounds, Context, FocusHandle, KeyBinding, Menu, SharedString,
    TitlebarOptions, Window, WindowBounds, WindowOptions, actions, div, point, prelude::*, px,
    size,
};
use tracing_subscriber::EnvFilter;

use gpui_mosaic::{
    MosaicAssets, MosaicIconKind, assets,
    components::{
        Avatar, AvatarStatus, Button, ButtonVariant, Chip, ChipColor, ChipVariant, Icon, Modal,
        Popover, Search, Snackbar, SnackbarSeverity, Spinner, SpinnerVariant, Stack,
        StackDirection, TabData, Tabs, Typography, TypographyVariant,
        input_field::{
            FieldChromeExt, InputField, InputFieldKind, InputFieldValue, LabelPlacement,
            RadioOption, SelectOption, TextInputKind, ToggleColor,
        },
    },
    theme::{Theme, ThemeExt},
};

struct Gallery {
    focus_handle: FocusHandle,

    tab: SharedString,
    modal_open: bool,
    popover_open: bool,
    snackbar_open: bool,
    last_search: Option<SharedString>,
    fruit: Vec<SharedString>,
}

actions!(window, [TabNext, TabPrev]);

impl Gallery {
    fn section(title: &'static str) -> impl IntoElement {
        Typography::new(title)
            .variant(TypographyVariant::ComponentName)
            .gutter_bottom(true)
    }

    fn fields(&self, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .flex()
            .flex_col()
            .gap(px(16.))
            .child(Self::section("Input fields"))
            .child(
                InputField::new("name", TextInputKind::Text)
                    .label("Name")
                    .required(true)
                    .placeholder("Ada Lovelace")
                    .full_width(true),
            )
            .child(
                InputField::new("password", TextInputKind::Password)
                    .label("Password")
                    .helper_text("At least eight characters")
                    .full_width(true),
            )
            .child(
                InputField::new("age", TextInputKind::Number)
                    .label("Age")
                    .default_value("36"),
            )
            .child(
                InputField::new("bio", InputFieldKind::textarea())
                    .label("Bio")
                    .placeholder("Tell us about yourself")
                    .full_width(true),
            )
            .child(
                InputField::new(
                    "fruit",
                    InputFieldKind::Select {
                        options: vec![
                            SelectOption::new("apple", "Apple"),
                            SelectOption::new("banana", "Banana"),
                            SelectOption::new("cherry", "Cherry").disabled(true),
                        ],
                        multiple: true,
                    },
                )
                .label("Fruit")
                .value(self.fruit.clone())
                .on_change(cx.listener(|view, value: &InputFieldValue, _window, cx| {
                    view.fruit = value.to_list();
                    cx.notify();
                })),
            )
            .child(
                InputField::new(
                    "birthday",
                    InputFieldKind::Date {
                        min_date: NaiveDate::from_ymd_opt(1900, 1, 1),
                        max_date: None,
                    },
                )
                .label("Birthday")
                .helper_text("YYYY-MM-DD"),
            )
            .child(
                InputField::new(
                    "alarm",
                    InputFieldKind::Time {
                        min_time: None,
                        max_time: None,
                    },
                )
                .label("Alarm"),
            )
            .child(
                InputField::new(
                    "terms",
                    InputFieldKind::Checkbox {
                        indeterminate: false,
                    },
                )
                .label("Accept terms")
                .required(true),
            )
            .child(
                InputField::new(
                    "plan",
                    InputFieldKind::Radio {
                        options: vec![
                            RadioOption::new("free", "Free"),
                            RadioOption::new("pro", "Pro"),
                            RadioOption::new("enterprise", "Enterprise").disabled(true),
                        ],
                        row: true,
                    },
                )
                .label("Plan")
                .default_value("free"),
            )
            .child(
                InputField::new(
                    "notifications",
                    InputFieldKind::Toggle {
                        label_placement: LabelPlacement::Start,
                        color: ToggleColor::Success,
                    },
                )
                .label("Notifications")
                .default_value(true),
            )
            .child(
                InputField::new("notes", InputFieldKind::rich_editor())
                    .label("Notes")
                    .full_width(true),
            )
    }
}

impl Render for Gallery {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        gpui_mosaic::init_for_window(window, cx);

        let theme = cx.get_theme();

        div()
            .id("gallery")
            .tab_group()
            .track_focus(&self.focus_handle)
            .size_full()
            .overflow_y_scroll()
            .text_size(theme.layout.text.default_font.sizes.body)
            .bg(theme.variants.active(cx).colors.background.primary)
            .flex()
            .flex_col()
            .gap(px(24.))
            .p(px(40.))
            .pt(px(48.))
            .child(
                Typography::new("Mosaic")
                    .variant(TypographyVariant::PageName)
                    .gutter_bottom(true),
            )
            .child(
                Tabs::new(
                    "sections",
                    [
                        TabData::new("components", "Components"),
                        TabData::new("forms", "Forms").tab_count(11),
                        TabData::new("disabled", "Disabled").disabled(true),
                    ],
                )
                .value(self.tab.clone())
                .on_change({
                    let gallery = cx.entity();
                    move |value, _tab, _window, cx| {
                        gallery.update(cx, |view, cx| {
                            view.tab = value.clone();
                            cx.notify();
                        });
                    }
                }),
            )
            .when(self.tab.as_ref() == "forms", |this| this.child(self.fields(cx)))
            .when(self.tab.as_ref() != "forms", |this| {
                this.child(Self::section("Buttons"))
                    .child(
                        div()
                            .flex()
                            .gap(px(12.))
                            .child(
                                Button::new("open-modal")
                                    .text("Open modal")
                                    .on_click(cx.listener(|view, _event, _window, cx| {
                                        view.modal_open = true;
                                        cx.notify();
                                    })),
                            )
                            .child(
                                Button::new("show-snackbar")
                                    .text("Show snackbar")
                                    .variant(ButtonVariant::Secondary)
                                    .on_click(cx.listener(|view, _event, _window, cx| {
                                        view.snackbar_open = true;
                                        cx.notify();
                                    })),
                            )
                            .child(
                                Button::new("disabled-button")
                                    .text("Disabled")
                                    .variant(ButtonVariant::Tertiary)
                                    .disabled(true),
                            ),
                    )
                    .child(Self::section("Chips and avatars"))
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .gap(px(12.))
                            .child(Chip::new("chip-default", "Default"))
                            .child(
                                Chip::new("chip-success", "Deployed")
                                    .color(ChipColor::Success)
                                    .custom_icon(MosaicIconKind::Success),
                            )
                            .child(
                                Chip::new("chip-outlined", "Removable")
                                    .variant(ChipVariant::Outlined)
                                    .color(ChipColor::Primary)
                                    .on_delete(|_event, _window, _cx| {
                                        tracing::info!("chip deleted");
                                    }),
                            )
                            .child(
                                Avatar::new("avatar-ada")
                                    .alt("Ada Lovelace")
                                    .status(AvatarStatus::Online)
                                    .show_status(true),
                            )
                            .child(Avatar::new("avatar-empty")),
                    )
                    .child(Self::section("Progress"))
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .gap(px(24.))
                            .child(Spinner::circle("spinner-indeterminate"))
                            .child(
                                Spinner::circle("spinner-determinate")
                                    .variant(SpinnerVariant::Determinate)
                                    .value(64.)
                                    .show_percentage(true),
                            )
                            .child(
                                div().w(px(200.)).child(
                                    Spinner::linear("spinner-buffer")
                                        .variant(SpinnerVariant::Buffer)
                                        .value(40.)
                                        .value_buffer(70.)
                                        .label("Uploading"),
                                ),
                            ),
                    )
                    .child(Self::section("Stack"))
                    .child(
                        Stack::new()
                            .direction(StackDirection::Row)
                            .spacing(2)
                            .card_width(px(320.))
                            .card_height(px(64.))
                            .child(Typography::new("One"))
                            .child(Typography::new("Two"))
                            .child(Typography::new("Three")),
                    )
                    .child(Self::section("Search and popover"))
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .gap(px(12.))
                            .child(Search::new("search").on_submit(cx.listener(
                                |view, text: &SharedString, _window, cx| {
                                    view.last_search = Some(text.clone());
                                    cx.notify();
                                },
                            )))
                            .child(
                                Popover::new(
                                    "popover",
                                    Button::new("popover-anchor").text("Details").on_click(
                                        cx.listener(|view, _event, _window, cx| {
                                            view.popover_open = !view.popover_open;
                                            cx.notify();
                                        }),
                                    ),
                                )
                                .open(self.popover_open)
                                .show_arrow(true)
                                .on_close({
                                    let gallery = cx.entity();
                                    move |_window, cx| {
                                        gallery.update(cx, |view, cx| {
                                            view.popover_open = false;
                                            cx.notify();
                                        });
                                    }
                                })
                                .child(
                                    div()
                                        .p(px(12.))
                                        .flex()
                                        .gap(px(8.))
                                        .child(Icon::new(MosaicIconKind::Info).size(px(16.)))
                                        .child(Typography::new("Popovers anchor to any element.")),
                                ),
                            ),
                    )
                    .when_some(self.last_search.clone(), |this, text| {
                        this.child(
                            Typography::new(format!("Last search: {text}"))
                                .variant(TypographyVariant::BodySoftText),
                        )
                    })
            })
            .child(
                Modal::new("modal")
                    .open(self.modal_open)
                    .title("Confirm")
                    .footer(
                        Button::new("modal-confirm")
                            .text("Done")
                            .on_click(cx.listener(|view, _event, _window, cx| {
                                view.modal_open = false;
                                cx.notify();
                            })),
                    )
                    .on_close(cx.listener(|view, reason, _window, cx| {
                        tracing::info!(?reason, "modal closed");
                        view.modal_open = false;
                        cx.notify();
                    }))
                    .child(Typography::new("Press escape or click outside to dismiss.")),
            )
            .child(
                Snackbar::new("snackbar", "Settings saved")
                    .open(self.snackbar_open)
                    .severity(SnackbarSeverity::Success)
                    .on_close(cx.listener(|view, reason, _window, cx| {
                        tracing::info!(?reason, "snackbar closed");
                        view.snackbar_open = false;
                        cx.notify();
                    })),
            )
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    Application::new()
        .with_quit_mode(gpui::QuitMode::LastWindowClosed)
        .with_assets(assets![MosaicAssets])
        .run(|cx: &mut App| {
            gpui_mosaic::init(cx);

            cx.set_menus(vec![Menu {
                name: "Mosaic Gallery".into(),
                items: vec![],
            }]);

            cx.set_theme(Theme::DEFAULT);

            let bounds = Bounds::centered(None, size(px(720.), px(900.)), cx);

            cx.open_window(
                WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(bounds)),
                    titlebar: Some(TitlebarOptions {
                        appears_transparent: true,
                        traffic_light_position: Some(point(px(10.), px(10.))),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                |_window, cx| {
                    cx.new(|cx| Gallery {
                        focus_handle: cx.focus_handle(),
                        tab: "components".into(),
                        modal_open: false,
                        popover_open: false,
                        snackbar_open: false,
                        last_search: None,
                        fruit: Vec::new(),
                    })
                },
            )
            .unwrap();

            init_tab_indexing_actions(cx);

            cx.activate(true);
        });
}

fn init_tab_indexing_actions(cx: &mut App) {
    cx.on_action(move |_: &TabNext, cx| {
        cx.defer(move |cx| {
            let Some(window) = cx.active_window() else {
                return;
            };

            let _ = window.update(cx, move |_, window, cx| {
                window.focus_next(cx);
            });
        })
    });

    cx.on_action(move |_: &TabPrev, cx| {
        cx.defer(move |cx| {
            let Some(window) = cx.active_window() else {
                return;
            };

            let _ = window.update(cx, move |_, window, cx| {
                window.focus_prev(cx);
            });
        })
    });

    cx.bind_keys([KeyBinding::new("tab", TabNext, None)]);
    cx.bind_keys([KeyBinding::new("shift-tab", TabPrev, None)]);
}
