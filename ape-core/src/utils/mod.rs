pub mod diagnostic;
pub mod src_span;
pub mod error;
pub mod number;

pub mod prelude {
    pub use super::{
        diagnostic::*,
        src_span::*,
        error::*,
        number::*
    };
}
