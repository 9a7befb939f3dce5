pub mod compile;
pub mod generate;
pub mod inputs;
pub mod inspect;
pub mod validate;
