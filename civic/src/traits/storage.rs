use super::{Repository, Unifier};

/// A trait pairing a key-value [`Repository`] with the [`Unifier`] used for its values.
///
/// Every store in this crate is generic over `Storage`, so the same
/// session and report logic runs over memory, files, or any other backend.
pub trait Storage {
    /// The backend holding the raw bytes.
    type Repo: Repository;
    /// The serializer used to encode record values.
    type Serializer: Unifier;

    fn repository(&self) -> &Self::Repo;
    fn repository_mut(&mut self) -> &mut Self::Repo;
    fn serializer(&self) -> &Self::Serializer;
}

/// Pairs any [`Repository`] with any [`Unifier`].
///
/// Backends implement [`Storage`] with JSON values by default; wrap them in
/// `Encoded` to store compact bincode values instead.
#[derive(Debug, Clone, Default)]
pub struct Encoded<R, U> {
    repository: R,
    serializer: U,
}

impl<R: Repository, U: Unifier> Encoded<R, U> {
    pub fn new(repository: R, serializer: U) -> Self {
        Self {
            repository,
            serializer,
        }
    }

    /// Consumes the wrapper and returns the underlying repository.
    pub fn dissolve(self) -> R {
        self.repository
    }
}

impl<R: Repository, U: Unifier> Storage for Encoded<R, U> {
    type Repo = R;
    type Serializer = U;

    fn repository(&self) -> &Self::Repo {
        &self.repository
    }

    fn repository_mut(&mut self) -> &mut Self::Repo {
        &mut self.repository
    }

    fn serializer(&self) -> &Self::Serializer {
        &self.serializer
    }
}
