use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("layout failed: {0}")]
    Layout(String),
    #[error("terminal i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("a composition is already mounted on this thread")]
    AlreadyMounted,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
