pub mod panels;
pub mod reference;
pub mod results;
