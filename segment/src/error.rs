/// Errors returned by the strict entry points of [`Segment`](crate::Segment).
///
/// The permissive entry points never fail: they return `None` or leave the
/// segment unchanged instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("index {index} out of bounds for segment of length {len}")]
    OutOfBounds { index: usize, len: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
