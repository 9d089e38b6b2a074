//! floem rendering of the scanner overlay and of width-capped containers.

use std::rc::Rc;

use floem::{
    IntoView,
    peniko::Color as FloemColor,
    style::Style,
    text::Weight,
    views::{Decorators, button, container, empty, h_stack, label, stack, v_stack},
};

use crate::{
    l10n::ScannerText,
    layout::{MaxWidth, layout},
    scanner::ScannerOverlay,
    theme::{FontWeight, OverlayStyle, TextStyle},
};

fn color(color: peniko::Color) -> FloemColor {
    let c = color.to_rgba8();
    FloemColor::rgba8(c.r, c.g, c.b, c.a)
}

fn weight(weight: FontWeight) -> Weight {
    match weight {
        FontWeight::Regular => Weight::NORMAL,
        FontWeight::SemiBold => Weight::SEMIBOLD,
    }
}

fn text_style(s: Style, text: &TextStyle) -> Style {
    s.font_size(text.font_size)
        .font_weight(weight(text.weight))
        .color(color(text.color))
}

fn max_width(s: Style, max: MaxWidth) -> Style {
    match max {
        MaxWidth::Unbounded => s,
        MaxWidth::Fixed(width) => s.max_width(width),
    }
}

/// Wraps `child` in a full-width container capped by the process content width.
pub fn content_container(child: impl IntoView + 'static) -> impl IntoView {
    let max = layout().content_max_width;
    container(child).style(move |s| max_width(s.width_full(), max))
}

/// Wraps `child` in a full-width container capped by the process header width.
pub fn header_container(child: impl IntoView + 'static) -> impl IntoView {
    let max = layout().header_max_width;
    container(child).style(move |s| max_width(s.width_full(), max))
}

/// The overlay surface: a header with title and cancel button, the camera
/// preview with a scan frame drawn over it, and the instructions.
///
/// `overlay` is usually [`MountedScanner::overlay`](crate::scanner::MountedScanner::overlay).
/// `camera` is the platform preview; decoding is wired up separately through
/// [`ScannerOverlay::mount`].
pub fn scanner_view(
    overlay: Rc<ScannerOverlay>,
    text: ScannerText,
    style: OverlayStyle,
    camera: impl IntoView + 'static,
) -> impl IntoView {
    let ScannerText {
        title,
        instructions,
        cancel,
    } = text;

    let header = h_stack((
        label(move || title.clone()).style(move |s| text_style(s, &style.title)),
        button(label(move || cancel.clone()).style(move |s| text_style(s, &style.close_text)))
            .action(move || overlay.cancel())
            .style(move |s| s.padding(style.close_button_padding)),
    ))
    .style(move |s| {
        s.flex_row()
            .justify_between()
            .items_center()
            .padding(style.header_padding)
    });

    let frame = style.scan_frame;
    let preview = stack((
        container(camera).style(|s| s.size_full()),
        container(empty().style(move |s| {
            s.size(frame.size, frame.size)
                .border(frame.border)
                .border_radius(frame.border_radius)
                .border_color(color(frame.border_color))
        }))
        .style(|s| {
            s.absolute()
                .inset_left(0.0)
                .inset_top(0.0)
                .size_full()
                .items_center()
                .justify_center()
        }),
    ))
    .style(move |s| {
        s.width_full()
            .aspect_ratio(style.camera_aspect_ratio as f32)
    });

    let footer = container(
        label(move || instructions.clone()).style(move |s| text_style(s, &style.instructions)),
    )
    .style(move |s| {
        s.width_full()
            .justify_center()
            .padding(style.instructions.padding)
    });

    v_stack((header, preview, footer)).style(move |s| {
        s.width(style.container.width)
            .max_width_pct(style.container.max_width_pct)
            .border_radius(style.container.border_radius)
            .background(color(style.container.background))
    })
}
