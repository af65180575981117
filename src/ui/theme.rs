use eframe::egui::{self, Color32, FontFamily, FontId, Stroke, TextStyle, Visuals};

pub const CARD_TITLE_STYLE: &str = "CardTitle";

/// Colours for one presentation of the page. The viewer picks the light or
/// dark palette per element, following the `dark-mode` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub page: Color32,
    pub text: Color32,
    pub link: Color32,
    pub card_fill: Color32,
    pub card_border: Color32,
}

pub const LIGHT: Palette = Palette {
    page: Color32::from_rgb(244, 244, 244),
    text: Color32::from_rgb(51, 51, 51),
    link: Color32::from_rgb(0, 123, 255),
    card_fill: Color32::WHITE,
    card_border: Color32::from_rgb(221, 221, 221),
};

pub const DARK: Palette = Palette {
    page: Color32::from_rgb(18, 18, 18),
    text: Color32::from_rgb(224, 224, 224),
    link: Color32::from_rgb(102, 179, 255),
    card_fill: Color32::from_rgb(30, 30, 30),
    card_border: Color32::from_rgb(68, 68, 68),
};

pub fn palette(dark: bool) -> &'static Palette {
    if dark {
        &DARK
    } else {
        &LIGHT
    }
}

/// Frame for one project card; `dark` is the card's own class state, which
/// can lag the page after cards are re-rendered between toggles.
pub fn card_frame(dark: bool) -> egui::Frame {
    let colors = palette(dark);
    egui::Frame::new()
        .fill(colors.card_fill)
        .stroke(Stroke::new(1.0, colors.card_border))
        .corner_radius(8.0)
        .inner_margin(14.0)
}

/// Applies the body/header presentation to the whole window.
pub fn apply_theme(ctx: &egui::Context, dark_mode: bool) {
    let colors = palette(dark_mode);
    let mut visuals = if dark_mode {
        Visuals::dark()
    } else {
        Visuals::light()
    };
    visuals.panel_fill = colors.page;
    visuals.window_fill = colors.page;
    visuals.hyperlink_color = colors.link;
    visuals.override_text_color = Some(colors.text);
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.text_styles.insert(
        TextStyle::Name(CARD_TITLE_STYLE.into()),
        FontId::new(19.0, FontFamily::Proportional),
    );
    ctx.set_style(style);
}
