mod container;
mod scalars;
mod string;
mod tuple;
