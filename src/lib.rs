pub mod alphabet;
pub mod cli;
pub mod conserved;
pub mod container;
pub mod error;
pub mod extender;
pub mod grid;
pub mod ktuple_index;
pub mod match_store;
pub mod orchestrator;

pub use alphabet::{Alphabet, EncodedSequence};
pub use error::{CoreError, CoreResult};
pub use extender::ExtendParams;
pub use grid::Grid;
pub use match_store::{Match, MatchStore};
pub use orchestrator::{Axis, AxisMeta, Plot, RegionKey};
