use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{debug, warn};

use crate::{
    account::{Account, Session},
    errors::{CivicError, Operation},
    ids::IdSource,
    keys,
    reports::ReportStore,
    session::SessionManager,
    store::Store,
    traits::Storage,
};

/// The single owned context of the app: the store plus the live session.
///
/// All mutating calls take `&mut self`, so read-modify-write sequences on the
/// report collection and on the account keys never interleave within a
/// process. Share a client across threads behind a `Mutex`.
pub struct Client<S: Storage> {
    store: Store<S>,
    session: Option<Session>,
    ids: IdSource,
}

impl<S: Storage> Client<S> {
    /// Opens a client over `storage` using the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`CivicError::Storage`] if the persisted session cannot be read.
    pub fn open(storage: S) -> Result<Self, CivicError> {
        Self::open_with_clock(storage, Arc::new(DefaultClock))
    }

    /// Opens a client and restores the session left by a previous run.
    ///
    /// A session is restored only when both the token and the profile cache
    /// are present.
    ///
    /// # Errors
    ///
    /// Returns [`CivicError::Storage`] if the persisted session cannot be read.
    pub fn open_with_clock(storage: S, clock: Arc<dyn Clock>) -> Result<Self, CivicError> {
        let store = Store::new(storage);
        let token = store.get_text(keys::USER_TOKEN, Operation::RestoreSession)?;
        let account: Option<Account> = store.get(keys::USER_DATA, Operation::RestoreSession)?;
        let session = match (token, account) {
            (Some(token), Some(account)) => {
                debug!(mobile = %account.mobile_number, "restored session");
                Some(Session { token, account })
            }
            (None, None) => None,
            (token, _) => {
                warn!(
                    has_token = token.is_some(),
                    "ignoring partial session state"
                );
                None
            }
        };
        Ok(Self {
            store,
            session,
            ids: IdSource::new(clock),
        })
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn sessions(&mut self) -> SessionManager<'_, S> {
        SessionManager {
            store: &mut self.store,
            session: &mut self.session,
            ids: &mut self.ids,
        }
    }

    /// The report store, reachable only while signed in.
    ///
    /// # Errors
    ///
    /// Returns [`CivicError::NotAuthenticated`] when there is no session.
    pub fn reports(&mut self) -> Result<ReportStore<'_, S>, CivicError> {
        let session = self.session.as_ref().ok_or(CivicError::NotAuthenticated)?;
        Ok(ReportStore {
            store: &mut self.store,
            session,
            ids: &mut self.ids,
        })
    }

    /// Consumes the client and returns the underlying storage.
    pub fn dissolve(self) -> S {
        self.store.dissolve()
    }
}
