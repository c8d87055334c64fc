/// Errors returned by fallible map accessors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The map holds no key equivalent to the one looked up.
    #[error("key not found")]
    KeyNotFound,
}
