// Output — terminal table and Graphviz rendering.

pub mod dot;
pub mod terminal;
