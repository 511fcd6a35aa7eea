use crate::domain::errors::KVStoreError;
use crate::ports::outbound::KeyValueStore;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Key-value store persisted to a single file.
///
/// The whole map is rewritten on every `put` via a temp file and a rename,
/// so the file on disk is always a complete snapshot. File format:
/// `[key_len:u32 LE][key][value_len:u32 LE][value]...`, keys in ascending
/// order.
pub struct FileBackedKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    ///
    /// A file that exists but cannot be decoded is an error; the store never
    /// silently starts over on top of existing ledger data.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::read(&path) {
            Ok(bytes) => {
                let data = Self::decode(&bytes).ok_or_else(|| KVStoreError::IOError {
                    message: format!("storage file {} is truncated or malformed", path.display()),
                })?;
                #[cfg(feature = "tracing-log")]
                tracing::info!(
                    "[asset-ledger] Loaded {} keys from {}",
                    data.len(),
                    path.display()
                );
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                #[cfg(feature = "tracing-log")]
                tracing::info!("[asset-ledger] No existing storage file at {}", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                return Err(KVStoreError::IOError {
                    message: e.to_string(),
                })
            }
        };

        Ok(Self { data, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn decode(bytes: &[u8]) -> Option<BTreeMap<Vec<u8>, Vec<u8>>> {
        let mut data = BTreeMap::new();
        let mut cursor = 0;

        while cursor < bytes.len() {
            let key = Self::read_frame(bytes, &mut cursor)?;
            let value = Self::read_frame(bytes, &mut cursor)?;
            data.insert(key, value);
        }

        Some(data)
    }

    fn read_frame(bytes: &[u8], cursor: &mut usize) -> Option<Vec<u8>> {
        let len_end = cursor.checked_add(4)?;
        let len = u32::from_le_bytes(bytes.get(*cursor..len_end)?.try_into().ok()?) as usize;
        let end = len_end.checked_add(len)?;
        let frame = bytes.get(len_end..end)?.to_vec();
        *cursor = end;
        Some(frame)
    }

    fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for (key, value) in &self.data {
            bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
            bytes.extend_from_slice(key);
            bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
            bytes.extend_from_slice(value);
        }
        bytes
    }

    /// Sibling of the data file with `.tmp` appended to the full file name,
    /// so it never equals the data file and is unique per data file.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn save_to_file(&self) -> Result<(), KVStoreError> {
        let io_err = |e: std::io::Error| KVStoreError::IOError {
            message: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let temp_path = self.temp_path();
        let mut file = std::fs::File::create(&temp_path).map_err(io_err)?;
        file.write_all(&self.encode()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;

        std::fs::rename(&temp_path, &self.path).map_err(io_err)
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        let previous = self.data.insert(key.to_vec(), value.to_vec());
        if let Err(e) = self.save_to_file() {
            // Keep memory in step with the file.
            match previous {
                Some(old) => self.data.insert(key.to_vec(), old),
                None => self.data.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}
