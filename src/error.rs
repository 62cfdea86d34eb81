use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("unexpected character '{ch}' at index {index} of action string \"{input}\"")]
    UnexpectedCharacter { ch: char, index: usize, input: String },

    #[error("invalid action \"{action}\" at index {index} of action string \"{input}\"")]
    InvalidAction { action: String, index: usize, input: String },

    #[error("action type {type_name} declares {count} actions, more than a {width}-bit mask can hold")]
    CapacityExceeded { type_name: &'static str, count: usize, width: u32 },

    #[error("bit {bit} does not name an action of {type_name}")]
    UnknownBit { type_name: &'static str, bit: u32 },
}

pub type Result<T> = std::result::Result<T, ActionError>;
