pub mod builtins;
pub mod error;
pub mod evaluator;

pub mod prelude {
    pub use super::{
        builtins::*,
        error::*,
        evaluator::*
    };
}
