mod reader;

pub use reader::{InputError, InputSource, MAX_INPUT_SIZE};
