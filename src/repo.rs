//! Track persistence as an injected adapter.
//!
//! The field model knows nothing about storage; hosts hand a
//! `TrackRepository` implementation to whatever owns the tracks. The
//! in-memory implementation below backs tests and small tools; database
//! bindings live in the host application.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::track::Track;

/// Storage adapter keyed by track location.
pub trait TrackRepository {
    fn save(&mut self, track: &Track) -> Result<(), StoreError>;
    fn find_by_location(&self, location: &str) -> Result<Option<Track>, StoreError>;
    fn remove(&mut self, location: &str) -> Result<bool, StoreError>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Infallible in-memory repository.
#[derive(Default)]
pub struct MemoryRepository {
    tracks: HashMap<String, Track>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TrackRepository for MemoryRepository {
    fn save(&mut self, track: &Track) -> Result<(), StoreError> {
        self.tracks
            .insert(track.location().to_owned(), track.clone());
        Ok(())
    }

    fn find_by_location(&self, location: &str) -> Result<Option<Track>, StoreError> {
        Ok(self.tracks.get(location).cloned())
    }

    fn remove(&mut self, location: &str) -> Result<bool, StoreError> {
        Ok(self.tracks.remove(location).is_some())
    }

    fn len(&self) -> usize {
        self.tracks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::TagField;

    #[test]
    fn save_find_and_remove_round_trip() {
        let mut repo = MemoryRepository::new();
        assert!(repo.is_empty());

        let mut track = Track::new("/music/a.mp3");
        track.set_tag(TagField::Title, ["A Song"], false);
        repo.save(&track).unwrap();

        assert_eq!(repo.len(), 1);
        let found = repo.find_by_location("/music/a.mp3").unwrap().unwrap();
        assert_eq!(found.get_tag(TagField::Title).unwrap().first(), "A Song");

        assert!(repo.remove("/music/a.mp3").unwrap());
        assert!(!repo.remove("/music/a.mp3").unwrap());
        assert!(repo.is_empty());
    }

    #[test]
    fn save_overwrites_same_location() {
        let mut repo = MemoryRepository::new();

        let mut track = Track::new("/music/a.mp3");
        track.set_tag(TagField::Title, ["First"], false);
        repo.save(&track).unwrap();

        track.set_tag(TagField::Title, ["Second"], false);
        repo.save(&track).unwrap();

        assert_eq!(repo.len(), 1);
        let found = repo.find_by_location("/music/a.mp3").unwrap().unwrap();
        assert_eq!(found.get_tag(TagField::Title).unwrap().first(), "Second");
    }
}
