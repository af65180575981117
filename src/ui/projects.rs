use super::theme::{card_frame, palette, CARD_TITLE_STYLE};
use crate::config::selectors;
use crate::view::{Document, ElementId, Marker};
use eframe::egui::{self, Color32, RichText, TextStyle};

/// Paints the children of the projects container.
pub fn render(ui: &mut egui::Ui, document: &Document, container: ElementId) {
    let children = document.child_elements(container);
    if children.is_empty() {
        ui.colored_label(Color32::GRAY, "No projects match the current filter.");
        return;
    }

    for child in children {
        if document.has_class(child, selectors::PROJECT_CARD_CLASS) {
            render_card(ui, document, child);
        } else if document.has_class(child, selectors::LOADING_CLASS) {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(document.text_content(child));
            });
        } else if document.has_class(child, selectors::ERROR_CLASS) {
            ui.colored_label(Color32::LIGHT_RED, document.text_content(child));
        } else {
            ui.label(document.text_content(child));
        }
    }
}

fn render_card(ui: &mut egui::Ui, document: &Document, card: ElementId) {
    let first_text = |tag: &str| {
        document
            .find_within(card, Marker::Tag(tag))
            .first()
            .map(|id| document.text_content(*id))
            .unwrap_or_default()
    };
    let title = first_text("h3");
    let description = first_text("p");
    let link = document.find_within(card, Marker::Tag("a")).first().copied();

    let dark = document.has_class(card, selectors::DARK_MODE_CLASS);
    let colors = palette(dark);

    card_frame(dark).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(
            RichText::new(title)
                .text_style(TextStyle::Name(CARD_TITLE_STYLE.into()))
                .color(colors.text)
                .strong(),
        );
        ui.label(RichText::new(description).color(colors.text));
        if let Some(anchor) = link {
            let href = document.attribute(anchor, "href").unwrap_or("#");
            let new_tab = document.attribute(anchor, "target") == Some("_blank");
            ui.add(
                egui::Hyperlink::from_label_and_url(document.text_content(anchor), href)
                    .open_in_new_tab(new_tab),
            );
        }
    });
    ui.add_space(6.0);
}
