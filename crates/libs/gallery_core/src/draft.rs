//! In-memory editable copy of one gallery.
//!
//! Edits are local until an explicit save; there is no autosave. Each
//! field keeps a dirty flag so the save patch carries exactly what
//! changed, and the save lifecycle (`Clean -> Dirty -> Saving -> ...`)
//! guarantees at most one in-flight save per draft. Save tickets carry a
//! generation number; results for a stale generation are ignored, so a
//! late network response can never clobber a newer editing round.

use crate::collection::PhotoCollection;
use crate::error::{MIN_PASSPHRASE_LEN, SaveRequestError, ValidationError};
use crate::passphrase::suggest_passphrase;
use chrono::{DateTime, Utc};
use gallery_types::date_format::format_datetime;
use gallery_types::instant::{normalize_date_only, parse_instant};
use gallery_types::{
    DateFormat, GalleryCreate, GalleryDetails, GalleryPatch, GalleryStatus, PhotoOrderUpdate,
    StatusOptions,
};

pub const DEFAULT_TITLE: &str = "Untitled Gallery";
pub const DEFAULT_DESCRIPTION: &str = "No description provided.";
pub const NO_DATE_LABEL: &str = "No date is set";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyFields {
    pub title: bool,
    pub description: bool,
    pub date: bool,
    pub status: bool,
    pub passphrase: bool,
}

impl DirtyFields {
    #[must_use]
    pub fn any(self) -> bool {
        self.title || self.description || self.date || self.status || self.passphrase
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Clean,
    Dirty,
    Saving,
}

/// Handle for one save attempt. Carries the payloads computed when the
/// save started and the generation used to detect stale completions.
#[derive(Debug, Clone)]
pub struct SaveTicket {
    pub(crate) generation: u64,
    pub patch: GalleryPatch,
    pub order: Option<Vec<PhotoOrderUpdate>>,
}

#[derive(Debug)]
pub struct GalleryDraft {
    id: Option<String>,
    title: String,
    description: String,
    date: Option<DateTime<Utc>>,
    /// Free-typed date input, held raw until validation resolves it.
    date_text: Option<String>,
    status: GalleryStatus,
    passphrase: Option<String>,
    status_options: StatusOptions,
    photos: PhotoCollection,
    dirty: DirtyFields,
    saving: bool,
    generation: u64,
}

impl GalleryDraft {
    /// A brand-new gallery with the editor defaults. Every scalar field
    /// starts dirty: nothing is persisted yet.
    #[must_use]
    pub fn new_untitled(status_options: StatusOptions) -> Self {
        let status = status_options.default_status();
        Self {
            id: None,
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            date: None,
            date_text: None,
            status,
            passphrase: None,
            status_options,
            photos: PhotoCollection::new(),
            dirty: DirtyFields {
                title: true,
                description: true,
                date: true,
                status: true,
                passphrase: false,
            },
            saving: false,
            generation: 0,
        }
    }

    /// A draft over a fetched gallery. Clean until the first edit.
    #[must_use]
    pub fn from_remote(details: GalleryDetails, status_options: StatusOptions) -> Self {
        Self {
            id: Some(details.id),
            title: details.title,
            description: details.description.unwrap_or_default(),
            date: details.date,
            date_text: None,
            status: details.status,
            passphrase: None,
            status_options,
            photos: PhotoCollection::from_loaded(details.photos),
            dirty: DirtyFields::default(),
            saving: false,
            generation: 0,
        }
    }

    // --- Accessors ---

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    #[must_use]
    pub fn status(&self) -> &GalleryStatus {
        &self.status
    }

    /// The current passphrase value (a user edit or an unsaved
    /// suggestion). Display masking is the rendering layer's business;
    /// this is always the true value.
    #[must_use]
    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref()
    }

    #[must_use]
    pub fn photos(&self) -> &PhotoCollection {
        &self.photos
    }

    pub fn photos_mut(&mut self) -> &mut PhotoCollection {
        &mut self.photos
    }

    #[must_use]
    pub fn dirty_fields(&self) -> DirtyFields {
        self.dirty
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.any() || self.photos.order_dirty()
    }

    #[must_use]
    pub fn save_state(&self) -> SaveState {
        if self.saving {
            SaveState::Saving
        } else if self.is_dirty() {
            SaveState::Dirty
        } else {
            SaveState::Clean
        }
    }

    /// Display string for the gallery date; derived, never stored.
    #[must_use]
    pub fn display_date(&self, format: DateFormat) -> String {
        match self.resolved_date() {
            Some(date) => format_datetime(&date, format),
            None => NO_DATE_LABEL.to_string(),
        }
    }

    // --- Setters (local, synchronous, last-write-wins per field) ---

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.dirty.title = true;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.dirty.description = true;
    }

    /// Set the date from the calendar picker (already canonical). `None`
    /// clears the date.
    pub fn set_date(&mut self, date: Option<DateTime<Utc>>) {
        self.date = date.map(normalize_date_only);
        self.date_text = None;
        self.dirty.date = true;
    }

    /// Set the date from free-typed text. Kept raw until validation;
    /// whitespace-only input clears the date.
    pub fn set_date_text(&mut self, text: impl Into<String>) {
        self.date_text = Some(text.into());
        self.dirty.date = true;
    }

    /// Change the publication status. Entering a gated status suggests a
    /// passphrase unless one is already present; leaving a gated status
    /// clears the field locally (the clear is only persisted when the
    /// user had edited the field this session).
    pub fn set_status(&mut self, status: GalleryStatus) {
        let was_gated = self.status_options.is_gated(&self.status);
        let is_gated = self.status_options.is_gated(&status);
        self.status = status;
        self.dirty.status = true;

        if is_gated && self.passphrase.is_none() {
            self.passphrase = Some(suggest_passphrase());
        } else if was_gated && !is_gated {
            self.passphrase = None;
        }
    }

    /// A user edit of the passphrase field. Only this marks the field for
    /// transmission; suggestions and masked redisplays never do.
    pub fn set_passphrase(&mut self, passphrase: impl Into<String>) {
        let value = passphrase.into();
        self.passphrase = if value.is_empty() { None } else { Some(value) };
        self.dirty.passphrase = true;
    }

    // --- Validation & patch ---

    /// First failing rule wins: empty title, then unparseable date text,
    /// then short passphrase. Does not change any state.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if let Some(text) = &self.date_text {
            let trimmed = text.trim();
            if !trimmed.is_empty() && parse_instant(trimmed).is_none() {
                return Err(ValidationError::InvalidDate);
            }
        }
        if let Some(passphrase) = &self.passphrase {
            if passphrase.chars().count() < MIN_PASSPHRASE_LEN {
                return Err(ValidationError::PassphraseTooShort);
            }
        }
        Ok(())
    }

    /// The minimal patch: dirty fields only, date as a canonical instant,
    /// passphrase only when user-edited.
    #[must_use]
    pub fn build_patch(&self) -> GalleryPatch {
        GalleryPatch {
            title: self
                .dirty
                .title
                .then(|| self.title.trim().to_string()),
            description: self
                .dirty
                .description
                .then(|| self.description.trim().to_string()),
            date: self.dirty.date.then(|| self.resolved_date()),
            status: self.dirty.status.then(|| self.status.clone()),
            passphrase: self.dirty.passphrase.then(|| self.passphrase.clone()),
        }
    }

    /// Creation payload for a draft that has never been persisted.
    #[must_use]
    pub fn create_payload(&self) -> GalleryCreate {
        GalleryCreate {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            date: self.resolved_date(),
            status: self.status.clone(),
            passphrase: if self.dirty.passphrase {
                self.passphrase.clone()
            } else {
                None
            },
        }
    }

    // --- Save lifecycle ---

    /// Start a save: only from a dirty, valid draft, and only while no
    /// other save is in flight.
    pub fn begin_save(&mut self) -> Result<SaveTicket, SaveRequestError> {
        if self.saving {
            return Err(SaveRequestError::InFlight);
        }
        if !self.is_dirty() {
            return Err(SaveRequestError::Clean);
        }
        self.validate()?;

        self.saving = true;
        self.generation += 1;
        Ok(SaveTicket {
            generation: self.generation,
            patch: self.build_patch(),
            order: self
                .photos
                .order_dirty()
                .then(|| self.photos.order_updates()),
        })
    }

    /// The scalar half of the save succeeded: clear the dirty flags of
    /// exactly the fields the sent patch contained and fold pending date
    /// text into the canonical value. Stale tickets are ignored.
    pub fn commit_patch(&mut self, ticket: &SaveTicket) {
        if ticket.generation != self.generation {
            return;
        }
        let patch = &ticket.patch;
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
            self.dirty.title = false;
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
            self.dirty.description = false;
        }
        if let Some(date) = &patch.date {
            self.date = *date;
            self.date_text = None;
            self.dirty.date = false;
        }
        if patch.status.is_some() {
            self.dirty.status = false;
        }
        if patch.passphrase.is_some() {
            self.dirty.passphrase = false;
        }
    }

    /// A successful `create_gallery`: adopt the assigned id and treat
    /// every scalar field as persisted.
    pub fn commit_create(&mut self, ticket: &SaveTicket, details: &GalleryDetails) {
        if ticket.generation != self.generation {
            return;
        }
        self.id = Some(details.id.clone());
        self.date = self.resolved_date();
        self.date_text = None;
        self.dirty = DirtyFields::default();
    }

    /// The order batch was persisted.
    pub fn commit_order(&mut self, ticket: &SaveTicket) {
        if ticket.generation != self.generation {
            return;
        }
        self.photos.commit_order();
    }

    /// Leave the `Saving` state, whatever the outcome. Un-committed
    /// fields stay dirty so a retry picks them up.
    pub fn finish_save(&mut self, ticket: &SaveTicket) {
        if ticket.generation != self.generation {
            return;
        }
        self.saving = false;
    }

    fn resolved_date(&self) -> Option<DateTime<Utc>> {
        match &self.date_text {
            Some(text) => parse_instant(text.trim()).map(normalize_date_only),
            None => self.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_types::Photo;

    fn status_options() -> StatusOptions {
        StatusOptions::new(
            vec![
                GalleryStatus::new("DRAFT"),
                GalleryStatus::new("PUBLISHED"),
                GalleryStatus::new("PRIVATE"),
            ],
            vec![GalleryStatus::new("PRIVATE")],
        )
    }

    fn loaded_draft() -> GalleryDraft {
        GalleryDraft::from_remote(
            GalleryDetails {
                id: "g1".to_string(),
                title: "Summer".to_string(),
                description: Some("Beach week".to_string()),
                date: parse_instant("2024-07-20"),
                status: GalleryStatus::new("DRAFT"),
                photos: vec![],
            },
            status_options(),
        )
    }

    fn photo(id: &str, position: usize) -> Photo {
        Photo {
            id: id.to_string(),
            image_url: format!("https://cdn.test/{id}.jpg"),
            thumb_url: String::new(),
            title: None,
            caption: None,
            taken_at: None,
            file_size: None,
            position,
        }
    }

    #[test]
    fn new_untitled_has_editor_defaults() {
        let draft = GalleryDraft::new_untitled(status_options());
        assert_eq!(draft.title(), DEFAULT_TITLE);
        assert_eq!(draft.description(), DEFAULT_DESCRIPTION);
        assert_eq!(draft.status().as_str(), "DRAFT");
        assert_eq!(draft.id(), None);
        assert_eq!(
            draft.display_date(DateFormat::ShortMonth),
            NO_DATE_LABEL
        );
        assert_eq!(draft.save_state(), SaveState::Dirty);
    }

    #[test]
    fn patch_contains_only_the_changed_field() {
        let mut draft = loaded_draft();
        assert_eq!(draft.save_state(), SaveState::Clean);

        draft.set_description("Beach week, remastered");

        let patch = draft.build_patch();
        assert_eq!(
            patch.description.as_deref(),
            Some("Beach week, remastered")
        );
        assert!(patch.title.is_none());
        assert!(patch.date.is_none());
        assert!(patch.status.is_none());
        assert!(patch.passphrase.is_none());
    }

    #[test]
    fn validation_order_reports_title_before_passphrase() {
        let mut draft = loaded_draft();
        draft.set_title("   ");
        draft.set_passphrase("abc");

        assert_eq!(draft.validate(), Err(ValidationError::EmptyTitle));

        draft.set_title("Fixed");
        assert_eq!(draft.validate(), Err(ValidationError::PassphraseTooShort));
    }

    #[test]
    fn free_typed_date_text_validates_before_passphrase_rules() {
        let mut draft = loaded_draft();
        draft.set_date_text("not a date");
        draft.set_passphrase("abc");

        assert_eq!(draft.validate(), Err(ValidationError::InvalidDate));

        draft.set_date_text("2024-08-01");
        assert_eq!(draft.validate(), Err(ValidationError::PassphraseTooShort));
    }

    #[test]
    fn gated_status_suggests_passphrase_but_never_transmits_it() {
        let mut draft = loaded_draft();

        draft.set_status(GalleryStatus::new("PRIVATE"));
        let suggestion = draft.passphrase().expect("suggestion present").to_string();
        let parts: Vec<&str> = suggestion.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[2].parse::<u32>().is_ok());

        // Toggle away and back without touching the field.
        draft.set_status(GalleryStatus::new("PUBLISHED"));
        assert_eq!(draft.passphrase(), None);
        draft.set_status(GalleryStatus::new("PRIVATE"));

        let patch = draft.build_patch();
        assert!(patch.status.is_some());
        assert!(
            patch.passphrase.is_none(),
            "suggested passphrase must not round-trip"
        );
    }

    #[test]
    fn user_edited_passphrase_is_transmitted_and_cleared_on_exit() {
        let mut draft = loaded_draft();
        draft.set_status(GalleryStatus::new("PRIVATE"));
        draft.set_passphrase("tide-pool-77");

        let patch = draft.build_patch();
        assert_eq!(
            patch.passphrase,
            Some(Some("tide-pool-77".to_string()))
        );

        // Leaving the gated status clears locally; the clear is sent
        // because the field was edited this session.
        draft.set_status(GalleryStatus::new("DRAFT"));
        let patch = draft.build_patch();
        assert_eq!(patch.passphrase, Some(None));
    }

    #[test]
    fn entering_gated_status_keeps_an_existing_passphrase() {
        let mut draft = loaded_draft();
        draft.set_passphrase("my-own-secret");
        draft.set_status(GalleryStatus::new("PRIVATE"));
        assert_eq!(draft.passphrase(), Some("my-own-secret"));
    }

    #[test]
    fn save_lifecycle_happy_path() {
        let mut draft = loaded_draft();
        draft.set_title("Renamed");

        let ticket = draft.begin_save().expect("dirty and valid");
        assert_eq!(draft.save_state(), SaveState::Saving);
        assert!(matches!(
            draft.begin_save(),
            Err(SaveRequestError::InFlight)
        ));

        draft.commit_patch(&ticket);
        draft.finish_save(&ticket);
        assert_eq!(draft.save_state(), SaveState::Clean);
        assert!(matches!(draft.begin_save(), Err(SaveRequestError::Clean)));
    }

    #[test]
    fn validation_failure_never_enters_saving() {
        let mut draft = loaded_draft();
        draft.set_title("");
        assert!(matches!(
            draft.begin_save(),
            Err(SaveRequestError::Validation(ValidationError::EmptyTitle))
        ));
        assert_eq!(draft.save_state(), SaveState::Dirty);
    }

    #[test]
    fn failed_save_retains_edits() {
        let mut draft = loaded_draft();
        draft.set_title("Renamed");

        let ticket = draft.begin_save().expect("dirty and valid");
        // Remote failure: no commit.
        draft.finish_save(&ticket);

        assert_eq!(draft.save_state(), SaveState::Dirty);
        assert_eq!(draft.title(), "Renamed");
        assert_eq!(draft.build_patch().title.as_deref(), Some("Renamed"));
    }

    #[test]
    fn stale_ticket_results_are_ignored() {
        let mut draft = loaded_draft();
        draft.set_title("First");
        let stale = draft.begin_save().expect("first save");
        draft.finish_save(&stale);

        draft.set_title("Second");
        let current = draft.begin_save().expect("second save");

        // A late completion of the abandoned first save must not touch
        // the draft.
        draft.commit_patch(&stale);
        draft.finish_save(&stale);
        assert_eq!(draft.save_state(), SaveState::Saving);
        assert!(draft.dirty_fields().title);

        draft.commit_patch(&current);
        draft.finish_save(&current);
        assert_eq!(draft.save_state(), SaveState::Clean);
        assert_eq!(draft.title(), "Second");
    }

    #[test]
    fn order_only_save_sends_no_scalar_patch() {
        let mut draft = loaded_draft();
        draft
            .photos_mut()
            .load(vec![photo("a", 0), photo("b", 1), photo("c", 2)]);
        draft.photos_mut().reorder("c", 0);

        let ticket = draft.begin_save().expect("order dirty");
        assert!(ticket.patch.is_empty());
        let order = ticket.order.as_deref().expect("order batch");
        assert_eq!(order.len(), 3);
        assert_eq!(order[0].photo_id, "c");
    }

    #[test]
    fn date_text_is_folded_to_canonical_on_commit() {
        let mut draft = loaded_draft();
        draft.set_date_text("2024-08-01");

        let ticket = draft.begin_save().expect("valid date text");
        let sent = ticket
            .patch
            .date
            .clone()
            .flatten()
            .expect("canonical date in patch");
        assert_eq!(sent.to_rfc3339(), "2024-08-01T00:00:00+00:00");

        draft.commit_patch(&ticket);
        draft.finish_save(&ticket);
        assert_eq!(draft.date(), Some(sent));
        assert_eq!(
            draft.display_date(DateFormat::ShortMonth),
            "1 Aug 2024"
        );
    }

    #[test]
    fn clearing_the_date_sends_an_explicit_null() {
        let mut draft = loaded_draft();
        draft.set_date(None);
        let patch = draft.build_patch();
        assert_eq!(patch.date, Some(None));
    }
}
