//! Address input field
//!
//! Holds what the user typed and, once known, the coordinate it stands for.
//! Typing always invalidates the coordinate; only an explicit selection or a
//! completed lookup installs one.

use serde::{Deserialize, Serialize};

use crate::value_objects::ResolvedLocation;

/// Where a field's coordinate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// The user picked a suggestion; authoritative
    UserSelected,
    /// A debounced lookup resolved the typed text
    Geocoded,
}

/// A pickup or dropoff input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressField {
    raw_text: String,
    resolved: Option<ResolvedLocation>,
    source: Option<ResolutionSource>,
}

impl AddressField {
    /// Create an empty field
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text as typed
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Current resolution, if any
    #[must_use]
    pub const fn resolved(&self) -> Option<&ResolvedLocation> {
        self.resolved.as_ref()
    }

    /// How the current resolution was obtained
    #[must_use]
    pub const fn source(&self) -> Option<ResolutionSource> {
        self.source
    }

    /// Whether the field currently has a coordinate
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Whether nothing has been typed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw_text.is_empty()
    }

    /// Keystroke: replace the text and drop any resolution
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.raw_text = text.into();
        self.resolved = None;
        self.source = None;
    }

    /// Explicit selection: text becomes the display address
    pub fn select(&mut self, resolved: ResolvedLocation) {
        self.raw_text = resolved.display_address().to_string();
        self.resolved = Some(resolved);
        self.source = Some(ResolutionSource::UserSelected);
    }

    /// Lookup result: the typed text stays as the user left it
    pub fn apply_geocoded(&mut self, resolved: ResolvedLocation) {
        self.resolved = Some(resolved);
        self.source = Some(ResolutionSource::Geocoded);
    }

    /// Drop the resolution but keep the text
    pub fn clear_resolution(&mut self) {
        self.resolved = None;
        self.source = None;
    }

    /// Reset to the empty state
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::GeoLocation;

    fn palace() -> ResolvedLocation {
        ResolvedLocation::new(
            GeoLocation::new(51.5014, -0.1419).unwrap(),
            "Buckingham Palace, London",
        )
    }

    #[test]
    fn new_field_is_empty() {
        let field = AddressField::new();
        assert!(field.is_empty());
        assert!(!field.is_resolved());
        assert_eq!(field.source(), None);
    }

    #[test]
    fn select_sets_text_and_source() {
        let mut field = AddressField::new();
        field.set_text("Buck");
        field.select(palace());
        assert_eq!(field.raw_text(), "Buckingham Palace, London");
        assert_eq!(field.source(), Some(ResolutionSource::UserSelected));
    }

    #[test]
    fn typing_clears_resolution() {
        let mut field = AddressField::new();
        field.select(palace());
        field.set_text("Buckingham Palace, Londo");
        assert!(!field.is_resolved());
        assert_eq!(field.source(), None);
    }

    #[test]
    fn geocoded_keeps_typed_text() {
        let mut field = AddressField::new();
        field.set_text("buckingham palace");
        field.apply_geocoded(palace());
        assert_eq!(field.raw_text(), "buckingham palace");
        assert_eq!(field.source(), Some(ResolutionSource::Geocoded));
    }

    #[test]
    fn clear_resets_everything() {
        let mut field = AddressField::new();
        field.select(palace());
        field.clear();
        assert_eq!(field, AddressField::new());
    }
}
