pub mod assembler;
pub mod coordinator;
pub mod error;

pub use assembler::{assemble, AssembledPodcast};
pub use coordinator::{SynthesisCoordinator, SynthesisResult};
pub use error::{AssemblyError, SynthesisError};
