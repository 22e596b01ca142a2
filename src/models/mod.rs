// Submission domain models

pub mod analysis;
pub mod artifact;
pub mod submission;
pub mod achievement;

pub use fitness_test::*;
pub use analysis::*;
pub use artifact::*;
pub use submission::*;
pub use achievement::*;
