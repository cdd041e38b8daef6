pub mod compare;
pub mod info;
pub mod render;
pub mod session;

pub use compare::*;
pub use info::*;
pub use render::*;
pub use session::*;
