pub mod ring;

pub use ring::shift_left;
