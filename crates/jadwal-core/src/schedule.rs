//! Schedule data model and file-backed store
//!
//! The schedule is a four-slot mapping persisted as a single JSON object.
//! It is rewritten wholesale on every booking; the store serializes every
//! load-mutate-save sequence behind one async mutex so concurrent webhook
//! deliveries cannot lose updates.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::warn;

use crate::error::Result;

/// Fixed bookable time-slot labels, in ascending order
pub const SLOT_LABELS: [&str; 4] = ["18.00", "19.00", "20.00", "21.00"];

/// Mapping of slot label to booking state
///
/// `None` means the slot is available; `Some(name)` means it is booked by
/// that team. The key set is fixed to [`SLOT_LABELS`]; the `BTreeMap` keeps
/// iteration in ascending label order, which is both the display order and
/// the booking-scan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    slots: BTreeMap<String, Option<String>>,
}

impl Schedule {
    /// Create a schedule with all slots available
    pub fn empty() -> Self {
        Self {
            slots: SLOT_LABELS
                .iter()
                .map(|label| (label.to_string(), None))
                .collect(),
        }
    }

    /// Whether the slot exists and is currently unbooked
    pub fn is_free(&self, slot: &str) -> bool {
        matches!(self.slots.get(slot), Some(None))
    }

    /// Team that booked the slot, if any
    pub fn booked_by(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).and_then(|entry| entry.as_deref())
    }

    /// Assign a team to a slot. Unknown labels are ignored.
    pub fn book(&mut self, slot: &str, team: &str) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = Some(team.to_string());
        }
    }

    /// Iterate over `(label, booking)` pairs in ascending label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.slots
            .iter()
            .map(|(label, entry)| (label.as_str(), entry.as_deref()))
    }

    /// A persisted schedule is only valid with exactly the fixed key set
    fn has_expected_slots(&self) -> bool {
        self.slots.len() == SLOT_LABELS.len()
            && SLOT_LABELS.iter().all(|label| self.slots.contains_key(*label))
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::empty()
    }
}

/// File-backed schedule store
///
/// A missing or corrupt backing file self-heals: the store reinitializes an
/// all-empty schedule and persists it before returning. Only the write-back
/// itself can fail.
pub struct ScheduleStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ScheduleStore {
    /// Create a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Load the schedule, healing a missing or corrupt file
    pub async fn load(&self) -> Result<Schedule> {
        let _guard = self.lock.lock().await;
        self.read_or_heal()
    }

    /// Overwrite the backing file with the full schedule
    pub async fn save(&self, schedule: &Schedule) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.write(schedule)
    }

    /// Run `f` against the current schedule under the store lock.
    ///
    /// `f` returns its result plus a flag telling the store whether the
    /// schedule was mutated; the file is written back only when it was.
    /// Holding the lock across the whole load-mutate-save closes the
    /// read-modify-write race between concurrent requests.
    pub async fn update<T>(&self, f: impl FnOnce(&mut Schedule) -> (T, bool)) -> Result<T> {
        let _guard = self.lock.lock().await;
        let mut schedule = self.read_or_heal()?;
        let (out, mutated) = f(&mut schedule);
        if mutated {
            self.write(&schedule)?;
        }
        Ok(out)
    }

    fn read_or_heal(&self) -> Result<Schedule> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<Schedule>(&content) {
                Ok(schedule) if schedule.has_expected_slots() => Ok(schedule),
                Ok(_) => {
                    warn!(
                        "Schedule file {} has an unexpected slot set, reinitializing",
                        self.path.display()
                    );
                    self.heal()
                }
                Err(e) => {
                    warn!(
                        "Failed to parse schedule file {}: {}, reinitializing",
                        self.path.display(),
                        e
                    );
                    self.heal()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "Schedule file {} not found, creating an empty schedule",
                    self.path.display()
                );
                self.heal()
            }
            Err(e) => Err(e.into()),
        }
    }

    fn heal(&self) -> Result<Schedule> {
        let schedule = Schedule::empty();
        self.write(&schedule)?;
        Ok(schedule)
    }

    fn write(&self, schedule: &Schedule) -> Result<()> {
        let json = serde_json::to_string_pretty(schedule)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> ScheduleStore {
        ScheduleStore::new(dir.path().join("jadwal.json"))
    }

    #[test]
    fn test_empty_schedule_has_all_slots_free() {
        let schedule = Schedule::empty();
        for label in SLOT_LABELS {
            assert!(schedule.is_free(label));
            assert_eq!(schedule.booked_by(label), None);
        }
    }

    #[test]
    fn test_book_marks_slot_taken() {
        let mut schedule = Schedule::empty();
        schedule.book("18.00", "Tim A");
        assert!(!schedule.is_free("18.00"));
        assert_eq!(schedule.booked_by("18.00"), Some("Tim A"));
        assert!(schedule.is_free("19.00"));
    }

    #[test]
    fn test_book_ignores_unknown_slot() {
        let mut schedule = Schedule::empty();
        schedule.book("22.00", "Tim A");
        assert_eq!(schedule, Schedule::empty());
    }

    #[test]
    fn test_iter_yields_ascending_labels() {
        let schedule = Schedule::empty();
        let labels: Vec<&str> = schedule.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, SLOT_LABELS);
    }

    #[tokio::test]
    async fn test_load_missing_file_initializes_and_persists() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let schedule = store.load().await.unwrap();
        assert_eq!(schedule, Schedule::empty());

        // The initial state must already be on disk
        let content = std::fs::read_to_string(dir.path().join("jadwal.json")).unwrap();
        let persisted: Schedule = serde_json::from_str(&content).unwrap();
        assert_eq!(persisted, Schedule::empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_file_heals_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jadwal.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = ScheduleStore::new(&path);
        let schedule = store.load().await.unwrap();
        assert_eq!(schedule, Schedule::empty());

        let content = std::fs::read_to_string(&path).unwrap();
        let persisted: Schedule = serde_json::from_str(&content).unwrap();
        assert_eq!(persisted, Schedule::empty());
    }

    #[tokio::test]
    async fn test_load_wrong_slot_set_heals_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jadwal.json");
        std::fs::write(&path, r#"{"17.00": null, "18.00": "Tim A"}"#).unwrap();

        let store = ScheduleStore::new(&path);
        let schedule = store.load().await.unwrap();
        assert_eq!(schedule, Schedule::empty());
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let mut schedule = Schedule::empty();
        schedule.book("19.00", "Garuda Fc");
        store.save(&schedule).await.unwrap();

        assert_eq!(store.load().await.unwrap(), schedule);
    }

    #[tokio::test]
    async fn test_update_persists_only_on_mutation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jadwal.json");
        let store = ScheduleStore::new(&path);

        // Mutating update is written back
        store
            .update(|schedule| {
                schedule.book("20.00", "Tim B");
                ((), true)
            })
            .await
            .unwrap();
        let persisted: Schedule =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(persisted.booked_by("20.00"), Some("Tim B"));

        // Non-mutating update leaves the file alone even if the in-memory
        // copy was scribbled on
        store
            .update(|schedule| {
                schedule.book("21.00", "Tim C");
                ((), false)
            })
            .await
            .unwrap();
        let persisted: Schedule =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(persisted.is_free("21.00"));
    }
}
