use crate::config::selectors;
use crate::view::{ElementId, Marker, View, ViewError};

/// Flips the dark-mode class on the body, the header and every project card.
///
/// The card set is queried on each activation so cards rendered after the
/// previous toggle are included. State is not persisted; a new page starts light.
#[derive(Debug, Clone)]
pub struct ThemeToggler {
    control: ElementId,
    dark: bool,
}

impl ThemeToggler {
    pub fn register<V: View>(view: &V) -> Result<Self, ViewError> {
        let control = view.find_first(Marker::Id(selectors::THEME_TOGGLE_ID))?;
        tracing::debug!(?control, "theme control registered");
        Ok(Self {
            control,
            dark: false,
        })
    }

    pub fn control(&self) -> ElementId {
        self.control
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Handles one click on the control and returns the new state.
    pub fn activate<V: View>(&mut self, view: &mut V) -> Result<bool, ViewError> {
        let mut targets = vec![
            view.find_first(Marker::Body)?,
            view.find_first(Marker::Tag(selectors::HEADER_TAG))?,
        ];
        targets.extend(view.find(Marker::Class(selectors::PROJECT_CARD_CLASS)));

        for element in &targets {
            view.toggle_class(*element, selectors::DARK_MODE_CLASS)?;
        }

        self.dark = !self.dark;
        tracing::debug!(dark = self.dark, toggled = targets.len(), "theme toggled");
        Ok(self.dark)
    }
}
