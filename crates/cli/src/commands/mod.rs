pub mod assemble;
pub mod objectives;
pub mod petals;
pub mod status;
