pub mod formatter;

pub mod prelude {
    pub use super::formatter::*;
}
