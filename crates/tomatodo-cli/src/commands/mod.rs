pub mod phases;
pub mod run;
