pub mod body;
pub mod boundary;
pub mod collision;
pub mod integrator;
pub mod math;
pub mod pocket;
pub mod table;
