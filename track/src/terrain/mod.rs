pub mod config;
pub mod error;
pub mod generator;
pub mod scroll;
pub mod spawn;
pub mod viewport;

#[cfg(test)]
mod tests;
