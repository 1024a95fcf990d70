use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("product id {id} is out of range (capacity {capacity})")]
    OutOfRange { id: u32, capacity: usize },
}

pub type StorageResult<T> = Result<T, StorageError>;
