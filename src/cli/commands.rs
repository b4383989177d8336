pub mod inspect;
pub mod serve;

pub use inspect::inspect_dataset;
pub use serve::serve;
