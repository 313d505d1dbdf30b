use tracing::{debug, info};

use crate::{
    account::Session,
    errors::{CivicError, Operation},
    ids::IdSource,
    keys,
    report::{Report, ReportDraft},
    store::Store,
    traits::Storage,
};

/// Creates, lists and deletes civic-issue reports.
///
/// Obtained from [`crate::Client::reports`], which requires a signed-in
/// session. Reports are shared: any session sees and may delete every report.
/// Each call re-reads the whole collection from the store and mutations
/// write it back whole.
pub struct ReportStore<'a, S: Storage> {
    pub(crate) store: &'a mut Store<S>,
    pub(crate) session: &'a Session,
    pub(crate) ids: &'a mut IdSource,
}

impl<S: Storage> ReportStore<'_, S> {
    /// Validates `draft`, stamps it with an id, a timestamp and the signed-in
    /// reporter, and stores it at the head of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`CivicError::Validation`] naming the first missing field, or
    /// [`CivicError::Storage`] if the collection cannot be read or written.
    pub fn submit(&mut self, draft: ReportDraft) -> Result<Report, CivicError> {
        let valid = draft.validate()?;
        let mut reports = self.load(Operation::Submit)?;

        let newest = reports.iter().filter_map(|r| r.id.parse::<i64>().ok()).max();
        let stamp = self.ids.next(newest);
        let report = Report::create(
            valid,
            stamp.millis.to_string(),
            stamp.at,
            Some(&self.session.account),
        );

        reports.insert(0, report.clone());
        self.persist(&reports, Operation::Submit)?;
        info!(id = %report.id, category = %report.category, priority = %report.priority, "report submitted");
        Ok(report)
    }

    /// All reports, newest first. Empty when none were ever stored.
    ///
    /// # Errors
    ///
    /// Returns [`CivicError::Storage`] if the collection cannot be read or decoded.
    pub fn list(&self) -> Result<Vec<Report>, CivicError> {
        self.load(Operation::List)
    }

    /// # Errors
    ///
    /// Returns [`CivicError::Storage`] if the collection cannot be read or decoded.
    pub fn get(&self, id: &str) -> Result<Option<Report>, CivicError> {
        Ok(self.list()?.into_iter().find(|r| r.id == id))
    }

    /// Removes the report with `id`, keeping the order of the rest.
    ///
    /// Returns whether a report was removed. An unknown id is not an error and
    /// writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CivicError::Storage`] if the collection cannot be read or written.
    pub fn delete(&mut self, id: &str) -> Result<bool, CivicError> {
        let mut reports = self.load(Operation::Delete)?;
        let Some(position) = reports.iter().position(|r| r.id == id) else {
            debug!(id, "no report to delete");
            return Ok(false);
        };
        reports.remove(position);
        self.persist(&reports, Operation::Delete)?;
        info!(id, remaining = reports.len(), "report deleted");
        Ok(true)
    }

    fn load(&self, operation: Operation) -> Result<Vec<Report>, CivicError> {
        Ok(self
            .store
            .get(keys::CIVIC_REPORTS, operation)?
            .unwrap_or_default())
    }

    fn persist(&mut self, reports: &[Report], operation: Operation) -> Result<(), CivicError> {
        let mut transaction = self.store.transaction(operation);
        transaction.put(keys::CIVIC_REPORTS, reports)?;
        self.store.commit(transaction)?;
        Ok(())
    }
}
