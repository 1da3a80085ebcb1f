// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering the stack.
//!
//! Each toast is a card with a kind-colored accent bar, the title, the
//! optional detail text, the optional action button and a close button.

use crate::notifications::{Corner, Scheduler, Toast, ToastManager, ToastMessage};
use crate::ui::design_tokens::{border, opacity, palette, radius, shadow, sizing, spacing, typography};
use iced::widget::{button, container, text, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};
use std::borrow::Cow;

/// Detail text is cut after this many wrapped lines.
const DETAIL_MAX_LINES: usize = 3;
/// Approximate characters per detail line at the toast's maximum width.
const DETAIL_LINE_CHARS: usize = 64;

/// Renders a single toast.
pub fn view(toast: &Toast) -> Element<'_, ToastMessage> {
    let id = toast.id();
    let accent_color = toast.kind().accent();

    let accent_bar = Container::new(text(""))
        .width(Length::Fixed(sizing::ACCENT_BAR))
        .height(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(accent_color)),
            ..Default::default()
        });

    let mut body = Column::new().spacing(spacing::XXS).push(
        Text::new(toast.title())
            .size(typography::BODY)
            .style(|theme: &Theme| text::Style {
                color: Some(theme.palette().text),
            }),
    );

    if let Some(detail) = toast.detail() {
        body = body.push(
            Text::new(clamp_detail(detail))
                .size(typography::BODY_SM)
                .style(|theme: &Theme| text::Style {
                    color: Some(Color {
                        a: opacity::TEXT_SECONDARY,
                        ..theme.palette().text
                    }),
                }),
        );
    }

    if let Some(label) = toast.action_label() {
        body = body.push(
            button(Text::new(label).size(typography::CAPTION))
                .on_press(ToastMessage::Action(id))
                .padding([spacing::XXS, spacing::XS]),
        );
    }

    let close_button = button(Text::new("×").size(sizing::CLOSE_BUTTON))
        .on_press(ToastMessage::Dismiss(id))
        .padding(spacing::XXS)
        .style(close_button_style);

    let content = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Top)
        .push(accent_bar)
        .push(
            Container::new(body)
                .width(Length::Fill)
                .padding([spacing::XXS, 0.0]),
        )
        .push(close_button);

    Container::new(content)
        .max_width(sizing::TOAST_MAX_WIDTH)
        .padding(spacing::XXS)
        .style(toast_container_style)
        .into()
}

/// Renders every visible toast anchored to the manager's configured corner.
///
/// Nothing is drawn until the stack has been attached to a window.
pub fn view_overlay<S: Scheduler>(manager: &ToastManager<S>) -> Element<'_, ToastMessage> {
    if !manager.is_surface_attached() || !manager.has_notifications() {
        return Container::new(text(""))
            .width(Length::Shrink)
            .height(Length::Shrink)
            .into();
    }

    let placement = manager.placement();
    let (align_x, align_y) = corner_alignment(placement.corner);

    let toasts: Vec<Element<'_, ToastMessage>> = manager.visible().map(view).collect();
    let toast_column = Column::with_children(toasts)
        .spacing(spacing::XS)
        .align_x(align_x);

    Container::new(toast_column)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(align_x)
        .align_y(align_y)
        .padding(placement.margin)
        .into()
}

/// Cuts the detail after [`DETAIL_MAX_LINES`] greedily word-wrapped lines,
/// ending it with an ellipsis. Words wider than a line break in place.
fn clamp_detail(detail: &str) -> Cow<'_, str> {
    let mut line = 1;
    let mut column = 0;
    let mut word_start = 0;
    let mut word_chars = 0;

    for (index, ch) in detail.char_indices() {
        match ch {
            '\n' => {
                line += 1;
                column = 0;
                word_chars = 0;
                if line > DETAIL_MAX_LINES {
                    return with_ellipsis(&detail[..index]);
                }
            }
            ' ' => {
                column += 1;
                word_chars = 0;
            }
            _ => {
                if word_chars == 0 {
                    word_start = index;
                }
                word_chars += 1;
                column += 1;
                if column > DETAIL_LINE_CHARS {
                    line += 1;
                    let cut = if word_chars <= DETAIL_LINE_CHARS {
                        column = word_chars;
                        word_start
                    } else {
                        column = 1;
                        word_chars = 1;
                        word_start = index;
                        index
                    };
                    if line > DETAIL_MAX_LINES {
                        return with_ellipsis(&detail[..cut]);
                    }
                }
            }
        }
    }

    Cow::Borrowed(detail)
}

fn with_ellipsis(kept: &str) -> Cow<'_, str> {
    Cow::Owned(format!("{}…", kept.trim_end()))
}

/// Maps a corner to the container alignment that pins content to it.
fn corner_alignment(corner: Corner) -> (alignment::Horizontal, alignment::Vertical) {
    let horizontal = if corner.is_left() {
        alignment::Horizontal::Left
    } else {
        alignment::Horizontal::Right
    };
    let vertical = if corner.is_top() {
        alignment::Vertical::Top
    } else {
        alignment::Vertical::Bottom
    };
    (horizontal, vertical)
}

fn toast_container_style(theme: &Theme) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::GRAY_400
            },
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

fn close_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;

    let hover_background = |alpha: f32| {
        Some(iced::Background::Color(Color {
            a: alpha,
            ..palette::GRAY_400
        }))
    };

    let (background, text_color) = match status {
        button::Status::Active => (None, base.text),
        button::Status::Hovered => (hover_background(opacity::OVERLAY_SUBTLE), base.text),
        button::Status::Pressed => (hover_background(opacity::OVERLAY_MEDIUM), base.text),
        button::Status::Disabled => (
            None,
            Color {
                a: opacity::OVERLAY_MEDIUM,
                ..base.text
            },
        ),
    };

    button::Style {
        background,
        text_color,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
