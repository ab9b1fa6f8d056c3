//! Ordered photo collection for one gallery.
//!
//! Invariants, restored after every mutation: positions are a permutation
//! of `0..len`, no duplicate ids, array order and position order agree.
//! Operations on unknown ids are no-ops, not errors: a drag gesture can
//! race a concurrent deletion.

use gallery_types::{Photo, PhotoOrderUpdate};

#[derive(Debug, Clone, Default)]
pub struct PhotoCollection {
    photos: Vec<Photo>,
    order_dirty: bool,
}

impl PhotoCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from server records, sorted by the persisted
    /// `position` (ties keep the server's array order).
    #[must_use]
    pub fn from_loaded(photos: Vec<Photo>) -> Self {
        let mut collection = Self::new();
        collection.load(photos);
        collection
    }

    /// Replace the whole collection. Idempotent.
    pub fn load(&mut self, mut photos: Vec<Photo>) {
        photos.sort_by_key(|photo| photo.position);
        self.photos = photos;
        self.restamp();
        self.order_dirty = false;
    }

    /// Move the photo with `photo_id` so it sits at `to_index` (clamped to
    /// the valid range). This is an index move, not a swap: everything
    /// between the old and new slot shifts by one, matching the
    /// "drop item A where item B was" drag gesture.
    pub fn reorder(&mut self, photo_id: &str, to_index: usize) {
        let Some(from_index) = self.index_of(photo_id) else {
            return;
        };
        let to_index = to_index.min(self.photos.len().saturating_sub(1));
        if from_index == to_index {
            return;
        }
        let photo = self.photos.remove(from_index);
        self.photos.insert(to_index, photo);
        self.restamp();
        self.order_dirty = true;
    }

    /// Append server-confirmed photos at the end of the collection.
    /// Entries whose id is already present are skipped.
    pub fn insert_batch(&mut self, new_photos: Vec<Photo>) {
        for photo in new_photos {
            if self.index_of(&photo.id).is_none() {
                self.photos.push(photo);
            }
        }
        self.restamp();
    }

    /// Delete a photo and close the position gap.
    pub fn remove(&mut self, photo_id: &str) -> Option<Photo> {
        let index = self.index_of(photo_id)?;
        let removed = self.photos.remove(index);
        self.restamp();
        self.order_dirty = true;
        Some(removed)
    }

    /// Remove a photo that is being re-parented to another gallery. The
    /// caller appends the returned record to the destination collection.
    pub fn move_out(&mut self, photo_id: &str) -> Option<Photo> {
        self.remove(photo_id)
    }

    /// Swap a provisional entry for its server-confirmed record, keeping
    /// its slot in the display order.
    pub fn replace(&mut self, old_id: &str, confirmed: Photo) {
        let Some(index) = self.index_of(old_id) else {
            return;
        };
        let position = self.photos[index].position;
        self.photos[index] = Photo {
            position,
            ..confirmed
        };
    }

    /// Overwrite one photo's descriptive metadata in place.
    pub fn update_metadata(&mut self, updated: &Photo) {
        if let Some(index) = self.index_of(&updated.id) {
            let position = self.photos[index].position;
            self.photos[index] = Photo {
                position,
                ..updated.clone()
            };
        }
    }

    /// The one-batch-per-save order payload.
    #[must_use]
    pub fn order_updates(&self) -> Vec<PhotoOrderUpdate> {
        self.photos
            .iter()
            .map(|photo| PhotoOrderUpdate {
                photo_id: photo.id.clone(),
                position: photo.position,
            })
            .collect()
    }

    /// Whether the relative order changed since load/commit. Appends and
    /// confirmations don't count; the server assigned those positions.
    #[must_use]
    pub fn order_dirty(&self) -> bool {
        self.order_dirty
    }

    /// Mark the current order as persisted.
    pub fn commit_order(&mut self) {
        self.order_dirty = false;
    }

    #[must_use]
    pub fn contains(&self, photo_id: &str) -> bool {
        self.index_of(photo_id).is_some()
    }

    #[must_use]
    pub fn get(&self, photo_id: &str) -> Option<&Photo> {
        self.index_of(photo_id).map(|index| &self.photos[index])
    }

    #[must_use]
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    fn index_of(&self, photo_id: &str) -> Option<usize> {
        self.photos.iter().position(|photo| photo.id == photo_id)
    }

    fn restamp(&mut self) {
        for (index, photo) in self.photos.iter_mut().enumerate() {
            photo.position = index;
        }
    }
}
