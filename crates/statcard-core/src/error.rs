pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid hex color literal: {value}")]
    InvalidHexColor { value: String },
}
