pub type Result<T, E> = ::core::result::Result<T, Error<E>>;

#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    #[error("touch bus error: {0:?}")]
    Bus(E),
    #[error("touch controller is not responding")]
    Unresponsive,
}
