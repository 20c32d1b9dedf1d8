// Domain layer - Flight records and the pure dashboard pipeline
pub mod aggregation;
pub mod chart;
pub mod dashboard;
pub mod export;
pub mod flight;
pub mod sample;
pub mod view;
