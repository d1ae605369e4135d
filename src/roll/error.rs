use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum RollError {
    #[error("too many dice rolled")]
    TooManyRolls,
    #[error("invalid option: {0}")]
    InvalidOption(String),
}

impl RollError {
    pub fn invalid_option(msg: impl ToString) -> Self {
        Self::InvalidOption(msg.to_string())
    }
}
