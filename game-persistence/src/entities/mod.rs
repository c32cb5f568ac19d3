pub mod prelude;

pub mod players;
