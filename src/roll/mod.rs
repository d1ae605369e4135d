mod ctx;
mod error;
mod pipeline;
pub(crate) mod roller;
mod stringify;
mod tree;

type RResult<T> = Result<T, RollError>;

pub use ctx::{DefaultRoller, RollContext};
pub use error::RollError;
pub use roller::Roller;
pub use stringify::{MarkdownStringifier, SimpleStringifier, Stringify};
pub use tree::{AdvType, DiceRoll, DropSet, Eval, Modifier, Roll, TermRoll};
