/// Pattern keys built from extracted neighborhoods
pub mod key;
/// Transition model learning from exemplar grids
pub mod learner;
/// Random sources and cumulative categorical selection
pub mod sampling;
/// Synthesis passes driven by a learned model
pub mod synthesizer;

pub use key::{PatternKey, PatternKeyBuilder};
pub use learner::{Distribution, TransitionModel, learn};
pub use sampling::{RandomSelector, RandomSource, ReplaySource};
pub use synthesizer::{Synthesizer, synthesize_pass};
