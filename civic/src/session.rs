use tracing::{info, warn};

use crate::{
    account::{Account, Registration, Session, validate_login},
    errors::{CivicError, Operation},
    ids::IdSource,
    keys,
    store::Store,
    traits::Storage,
};

const TOKEN_PREFIX: &str = "auth_token_";

/// Registers accounts, signs in and out.
///
/// Obtained from [`crate::Client::sessions`]. Every successful call persists
/// before it updates the client's session, so a failed write leaves both the
/// store and the in-memory session as they were.
pub struct SessionManager<'a, S: Storage> {
    pub(crate) store: &'a mut Store<S>,
    pub(crate) session: &'a mut Option<Session>,
    pub(crate) ids: &'a mut IdSource,
}

impl<S: Storage> SessionManager<'_, S> {
    /// Creates (or overwrites) the account for `mobile_number` and signs it in.
    ///
    /// There is no duplicate check: registering an existing number replaces
    /// the stored account, password included.
    ///
    /// # Errors
    ///
    /// Returns [`CivicError::Validation`] naming the first invalid field, or
    /// [`CivicError::Storage`] if persisting fails.
    pub fn register(
        &mut self,
        full_name: &str,
        mobile_number: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Session, CivicError> {
        let valid = Registration {
            full_name,
            mobile_number,
            password,
            confirm_password,
        }
        .validate()?;

        let stamp = self.ids.next(None);
        let account = Account {
            id: stamp.millis.to_string(),
            full_name: valid.full_name,
            mobile_number: valid.mobile_number,
            password: valid.password,
        };
        let token = format!("{TOKEN_PREFIX}{}", stamp.millis);

        let mut transaction = self.store.transaction(Operation::Register);
        transaction.put(&keys::credentials(&account.mobile_number), &account)?;
        transaction.put(keys::USER_DATA, &account)?;
        transaction.put_text(keys::USER_TOKEN, &token);
        self.store.commit(transaction)?;

        info!(mobile = %account.mobile_number, account_id = %account.id, "account registered");
        Ok(self.replace_session(token, account))
    }

    /// Signs in with a stored account.
    ///
    /// # Errors
    ///
    /// Returns [`CivicError::AccountNotFound`] for an unknown number and
    /// [`CivicError::InvalidCredentials`] for a wrong password; neither touches
    /// any state.
    pub fn login(&mut self, mobile_number: &str, password: &str) -> Result<Session, CivicError> {
        let mobile_number = validate_login(mobile_number, password)?;
        let account: Account = self
            .store
            .get(&keys::credentials(&mobile_number), Operation::Login)?
            .ok_or(CivicError::AccountNotFound)?;
        if account.password != password {
            warn!(mobile = %mobile_number, "rejected sign-in with wrong password");
            return Err(CivicError::InvalidCredentials);
        }

        let token = format!("{TOKEN_PREFIX}{}", self.ids.next(None).millis);
        let mut transaction = self.store.transaction(Operation::Login);
        transaction.put(keys::USER_DATA, &account)?;
        transaction.put_text(keys::USER_TOKEN, &token);
        self.store.commit(transaction)?;

        info!(mobile = %mobile_number, "signed in");
        Ok(self.replace_session(token, account))
    }

    /// Clears the session token and profile cache. Safe to call when signed out.
    ///
    /// # Errors
    ///
    /// Returns [`CivicError::Storage`] if the keys cannot be removed; the
    /// session stays active in that case.
    pub fn logout(&mut self) -> Result<(), CivicError> {
        let mut transaction = self.store.transaction(Operation::Logout);
        transaction.remove(keys::USER_TOKEN);
        transaction.remove(keys::USER_DATA);
        self.store.commit(transaction)?;

        if let Some(previous) = self.session.take() {
            info!(mobile = %previous.account.mobile_number, "signed out");
        }
        Ok(())
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn replace_session(&mut self, token: String, account: Account) -> Session {
        let session = Session { token, account };
        *self.session = Some(session.clone());
        session
    }
}
