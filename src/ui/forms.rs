use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::manager::HotelDraft;
use crate::models::Hotel;

/// Form state for adding or editing a hotel, including country type-ahead.
#[derive(Default, Clone)]
pub(crate) struct HotelForm {
    pub(crate) name: String,
    pub(crate) stars: String,
    pub(crate) country: String,
    pub(crate) description: String,
    pub(crate) active: HotelField,
    pub(crate) error: Option<String>,
    pub(crate) suggestion: Option<String>,
    pub(crate) autocomplete_disabled: bool,
}

/// Fields of the hotel form, in focus order.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum HotelField {
    #[default]
    Name,
    Stars,
    Country,
    Description,
}

impl HotelField {
    pub(crate) const ALL: [HotelField; 4] = [
        HotelField::Name,
        HotelField::Stars,
        HotelField::Country,
        HotelField::Description,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            HotelField::Name => "Name",
            HotelField::Stars => "Stars (0-5)",
            HotelField::Country => "Country",
            HotelField::Description => "Description",
        }
    }

    fn next(self) -> Self {
        match self {
            HotelField::Name => HotelField::Stars,
            HotelField::Stars => HotelField::Country,
            HotelField::Country => HotelField::Description,
            HotelField::Description => HotelField::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            HotelField::Name => HotelField::Description,
            HotelField::Stars => HotelField::Name,
            HotelField::Country => HotelField::Stars,
            HotelField::Description => HotelField::Country,
        }
    }
}

impl HotelForm {
    /// Populate the form from an existing hotel when editing.
    pub(crate) fn from_hotel(hotel: &Hotel) -> Self {
        let draft = HotelDraft::from(hotel);
        Self {
            name: draft.name,
            stars: draft.stars,
            country: draft.country,
            description: draft.description,
            ..Self::default()
        }
    }

    /// Raw values for validation by the hotel manager.
    pub(crate) fn draft(&self) -> HotelDraft {
        HotelDraft {
            name: self.name.clone(),
            stars: self.stars.clone(),
            country: self.country.clone(),
            description: self.description.clone(),
        }
    }

    pub(crate) fn next_field(&mut self) {
        self.active = self.active.next();
        self.clear_suggestion_off_country();
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = self.active.previous();
        self.clear_suggestion_off_country();
    }

    fn clear_suggestion_off_country(&mut self) {
        if self.active != HotelField::Country {
            self.suggestion = None;
        }
    }

    fn value_mut(&mut self, field: HotelField) -> &mut String {
        match field {
            HotelField::Name => &mut self.name,
            HotelField::Stars => &mut self.stars,
            HotelField::Country => &mut self.country,
            HotelField::Description => &mut self.description,
        }
    }

    fn value(&self, field: HotelField) -> &str {
        match field {
            HotelField::Name => &self.name,
            HotelField::Stars => &self.stars,
            HotelField::Country => &self.country,
            HotelField::Description => &self.description,
        }
    }

    /// Insert a character into the active field. Any printable character is
    /// accepted; the stars value is checked on save so the user sees why it
    /// was refused.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        if self.active == HotelField::Country {
            self.autocomplete_disabled = false;
        }
        let field = self.active;
        self.value_mut(field).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        if self.active == HotelField::Country {
            self.autocomplete_disabled = false;
        }
        let field = self.active;
        self.value_mut(field).pop();
    }

    /// Update the country suggestion from the reference list.
    pub(crate) fn update_suggestion(&mut self, countries: &[String]) {
        if self.active != HotelField::Country
            || self.autocomplete_disabled
            || self.country.chars().count() < 2
        {
            self.suggestion = None;
            return;
        }

        let current_lower = self.country.to_lowercase();
        self.suggestion = countries
            .iter()
            .find(|candidate| candidate.to_lowercase().starts_with(&current_lower))
            .filter(|candidate| candidate.to_lowercase() != current_lower)
            .cloned();
    }

    /// Apply the suggested country. Returns false when there was nothing to
    /// accept, so Tab can fall back to switching fields.
    pub(crate) fn accept_suggestion(&mut self) -> bool {
        if self.active != HotelField::Country {
            return false;
        }
        match self.suggestion.take() {
            Some(candidate) => {
                self.country = candidate;
                self.autocomplete_disabled = true;
                true
            }
            None => false,
        }
    }

    /// Dismiss the current suggestion for the rest of this edit.
    pub(crate) fn cancel_autocomplete(&mut self) -> bool {
        if self.active == HotelField::Country && self.suggestion.is_some() {
            self.autocomplete_disabled = true;
            self.suggestion = None;
            return true;
        }
        false
    }

    /// Remaining characters of the suggestion, shown as a ghosted hint.
    pub(crate) fn suggestion_suffix(&self) -> Option<String> {
        let candidate = self.suggestion.as_ref()?;
        let suffix: String = candidate.chars().skip(self.country.chars().count()).collect();
        if suffix.is_empty() {
            None
        } else {
            Some(suffix)
        }
    }

    /// Render a styled line for the modal form.
    pub(crate) fn build_line(&self, field: HotelField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            "<required>".to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let mut spans = vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ];
        if field == HotelField::Country && is_active && !value.is_empty() {
            if let Some(suffix) = self.suggestion_suffix() {
                spans.push(Span::styled(suffix, Style::default().fg(Color::DarkGray)));
            }
        }

        Line::from(spans)
    }

    /// Cursor column offset within the field's line.
    pub(crate) fn cursor_offset(&self, field: HotelField) -> usize {
        field.label().chars().count() + 2 + self.value(field).chars().count()
    }
}

/// Pending confirmation for deleting a hotel.
#[derive(Clone)]
pub(crate) struct ConfirmHotelDelete {
    pub(crate) id: i64,
    pub(crate) name: String,
}

impl From<&Hotel> for ConfirmHotelDelete {
    fn from(hotel: &Hotel) -> Self {
        Self {
            id: hotel.id,
            name: hotel.name.clone(),
        }
    }
}
