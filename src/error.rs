use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("The catalog is empty. Run `fileserver-catalog register` to scan the fileserver")]
    EmptyCatalog,

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] fileserver_common::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
