use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Failed to wrap logger with multiprogress: {0}")]
    SetLogger(#[source] log::SetLoggerError),

    #[error("Logger was already initialized")]
    AlreadyInitialized,
}
