pub mod console;
pub mod symbol_table;
pub mod value;

pub mod prelude {
    pub use super::{
        console::*,
        symbol_table::*,
        value::*
    };
}
