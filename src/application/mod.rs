// Application layer - Use cases over the domain
pub mod dashboard_controller;
pub mod error;
pub mod flight_repository;
