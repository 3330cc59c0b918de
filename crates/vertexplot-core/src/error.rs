use crate::model::SetId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeometryError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("vertex index {index} out of range for a set of {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no vertex set {0:?}")]
    NoSuchSet(SetId),
}
