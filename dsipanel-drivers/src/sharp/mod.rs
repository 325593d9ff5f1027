//! Sharp panels

pub mod ls029b3sx02;

pub use ls029b3sx02::Ls029b3sx02;
