/// Tracker: the store plus change notification
///
/// The tracker owns the TrackerState and forwards each mutation to it.
/// Once a mutation has been applied, every registered observer is told
/// about the new state. Persistence is one such observer, so the store's
/// own logic stays free of side effects.

use chrono::NaiveDate;

use crate::domain::{
    ActiveView, StreakTransition, Theme, TrackerState, WellnessEntry, Weight,
};
use crate::storage::{StateStorage, StorageError};

/// Something that wants to hear about committed state changes
pub trait StateObserver {
    /// Called after each mutation with the full new state
    fn state_changed(&mut self, state: &TrackerState) -> Result<(), StorageError>;
}

/// Observer that writes a snapshot of the state after every change
pub struct PersistObserver<S: StateStorage> {
    storage: S,
    blob_name: String,
}

impl<S: StateStorage> PersistObserver<S> {
    pub fn new(storage: S, blob_name: impl Into<String>) -> Self {
        Self {
            storage,
            blob_name: blob_name.into(),
        }
    }
}

impl<S: StateStorage> StateObserver for PersistObserver<S> {
    fn state_changed(&mut self, state: &TrackerState) -> Result<(), StorageError> {
        self.storage.save_state(&self.blob_name, state)
    }
}

/// The application's single owner of tracker state
///
/// Reads go straight to `state()`. Writes go through the methods below so
/// observers never miss a change.
pub struct Tracker {
    state: TrackerState,
    observers: Vec<Box<dyn StateObserver + Send>>,
}

impl Tracker {
    /// Wrap an already-loaded state with no observers
    pub fn new(state: TrackerState) -> Self {
        Self {
            state,
            observers: Vec::new(),
        }
    }

    /// Register an observer; observers run in registration order
    pub fn subscribe(&mut self, observer: Box<dyn StateObserver + Send>) {
        self.observers.push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Read-only view of the current state and its derived queries
    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn add_measurement(&mut self, date: NaiveDate, weight: Weight) -> Result<(), StorageError> {
        self.state.add_measurement(date, weight);
        tracing::debug!("Added measurement {} kg on {}", weight, date);
        self.notify()
    }

    /// Returns the number of measurements removed
    pub fn delete_measurement(&mut self, date: NaiveDate) -> Result<usize, StorageError> {
        let removed = self.state.delete_measurement(date);
        tracing::debug!("Deleted {} measurement(s) on {}", removed, date);
        if removed > 0 {
            self.notify()?;
        }
        Ok(removed)
    }

    pub fn add_wellness_entry(&mut self, entry: WellnessEntry) -> Result<(), StorageError> {
        tracing::debug!("Added wellness entry {} ({:?})", entry.id, entry.mood);
        self.state.add_wellness_entry(entry);
        self.notify()
    }

    /// Check in for today
    pub fn update_streak(&mut self) -> Result<StreakTransition, StorageError> {
        let transition = self.state.update_streak();
        self.after_check_in(transition)
    }

    /// Check in for an explicit day
    pub fn update_streak_on(&mut self, today: NaiveDate) -> Result<StreakTransition, StorageError> {
        let transition = self.state.update_streak_on(today);
        self.after_check_in(transition)
    }

    pub fn set_goal(&mut self, weight: Option<Weight>, date: Option<NaiveDate>) -> Result<(), StorageError> {
        self.state.set_goal(weight, date);
        self.notify()
    }

    pub fn set_starting_weight(&mut self, weight: Option<Weight>) -> Result<(), StorageError> {
        self.state.set_starting_weight(weight);
        self.notify()
    }

    pub fn set_active_view(&mut self, view: ActiveView) -> Result<(), StorageError> {
        self.state.set_active_view(view);
        self.notify()
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StorageError> {
        let theme = self.state.toggle_theme();
        self.notify()?;
        Ok(theme)
    }

    fn after_check_in(&mut self, transition: StreakTransition) -> Result<StreakTransition, StorageError> {
        tracing::debug!(
            "Check-in: {:?}, streak now {}",
            transition,
            self.state.streak().current_streak
        );
        // No-op transitions leave the state untouched, so there is nothing to flush
        if transition.changed_state() {
            self.notify()?;
        }
        Ok(transition)
    }

    /// Tell every observer about the committed state
    ///
    /// All observers run even if one fails; the first error is returned.
    fn notify(&mut self) -> Result<(), StorageError> {
        let mut first_error = None;
        for observer in self.observers.iter_mut() {
            if let Err(e) = observer.state_changed(&self.state) {
                tracing::error!("State observer failed: {}", e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
