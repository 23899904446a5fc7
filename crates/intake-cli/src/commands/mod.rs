//! Command implementations.

pub mod check;
pub mod collect;
pub mod fields;
pub mod profile;
pub mod register;

pub use self::check::execute_check;
pub use self::collect::execute_collect;
pub use self::fields::execute_fields;
pub use self::profile::execute_profile;
pub use self::register::execute_register;
