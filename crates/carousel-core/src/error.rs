use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Slide set is empty: a carousel needs at least one image")]
    EmptySlideSet,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Carousel service channel closed: {0}")]
    ChannelClosed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
