pub mod reading;
pub mod temperature;

pub use reading::{Reading, ReadingError, TEMPERATURE_OPCODE};
pub use temperature::Temperature;
