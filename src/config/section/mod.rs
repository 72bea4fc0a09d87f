//! Configuration sections.
//!
//! | Section       | Purpose                                  |
//! |---------------|------------------------------------------|
//! | `[translate]` | Generated names and unit handling        |
//! | `[batch]`     | Directory run file selection             |
//! | `[frame]`     | Comparison page layout                   |

mod batch;
mod frame;
mod translate;

pub use batch::BatchConfig;
pub use frame::FrameConfig;
pub use translate::TranslateConfig;
