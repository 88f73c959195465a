pub mod environment;
pub mod hash;
pub mod value;

pub mod prelude {
    pub use super::{
        environment::*,
        hash::*,
        value::*
    };
}

#[cfg(test)]
mod tests;
