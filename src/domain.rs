pub mod monte_carlo;
pub mod simulator;
pub mod topology;
