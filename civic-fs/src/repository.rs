use civic::Repository;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::{error::FileStoreError, filename};

/// A file-based storage implementation that stores each key-value pair as a separate file.
///
/// Keys become percent-encoded file names with a `.dat` extension inside the
/// configured directory; file contents are the stored bytes.
#[derive(Debug)]
pub struct FileStore {
    /// The directory where all data files are stored.
    data_dir: PathBuf,
}

impl FileStore {
    /// The file extension used for all data files.
    const FILE_EXTENSION: &'static str = ".dat";
    const TEMP_EXTENSION: &'static str = ".tmp";

    /// Creates a new FileStore instance at the specified directory.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(data_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Lists the keys currently stored, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be read.
    pub fn keys(&self) -> Result<Vec<String>, FileStoreError> {
        let entries = fs::read_dir(&self.data_dir).map_err(FileStoreError::io(&self.data_dir))?;

        let mut keys: Vec<String> = Vec::new();
        for entry in entries.flatten() {
            if let Some(name) = entry.file_name().to_str()
                && let Some(key) = self.filename_to_key(name)
            {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    /// Converts a key string to a filesystem path.
    fn key_to_filename(&self, key: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}{}", filename::encode_key(key), Self::FILE_EXTENSION))
    }

    /// Extracts the key from a filename by removing the `.dat` extension.
    fn filename_to_key(&self, name: &str) -> Option<String> {
        name.strip_suffix(Self::FILE_EXTENSION)
            .and_then(filename::decode_key)
    }
}

impl Repository for FileStore {
    type Error = FileStoreError;

    /// Writes to a sibling temp file and renames it over the entry, so a
    /// crash mid-write leaves either the old value or the new one.
    fn insert_entry(&mut self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        let file_path = self.key_to_filename(key);
        let mut temp_path = file_path.clone().into_os_string();
        temp_path.push(Self::TEMP_EXTENSION);

        debug!(path = %file_path.display(), bytes = value.len(), "writing entry file");
        fs::write(&temp_path, value).map_err(FileStoreError::io(&temp_path))?;
        fs::rename(&temp_path, &file_path).map_err(|e| {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                warn!(path = ?temp_path, error = %cleanup, "failed to remove temp file");
            }
            FileStoreError::io(&file_path)(e)
        })
    }

    fn get_entry(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        let file_path = self.key_to_filename(key);
        match fs::read(&file_path) {
            Ok(data) => Ok(Some(data)),
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FileStoreError::io(file_path)(e)),
        }
    }

    fn remove_entry(&mut self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        let Some(data) = self.get_entry(key)? else {
            return Ok(None);
        };
        let file_path = self.key_to_filename(key);
        fs::remove_file(&file_path).map_err(FileStoreError::io(&file_path))?;
        Ok(Some(data))
    }
}
