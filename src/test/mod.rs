mod delay;
mod engine;
mod solver;
