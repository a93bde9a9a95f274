#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to read input from {source_name}: {message}")]
    InputRead {
        source_name: String,
        message: String,
    },

    #[error("Input from {source_name} is not valid JSON: {message}")]
    InvalidJson {
        source_name: String,
        message: String,
    },
}
