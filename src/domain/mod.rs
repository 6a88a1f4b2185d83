// Domain module: calculators, LP models and the solver contract

pub mod break_even;
pub mod chart;
pub mod inventory;
pub mod model_error;
pub mod models;
pub mod production;
pub mod queueing;
pub mod solver_service;
pub mod value_objects;

pub use break_even::{break_even, BreakEvenInput, BreakEvenOutput};
pub use chart::{Bar, Chart, ChartKind, Marker, Series};
pub use inventory::{economic_order_quantity, InventoryInput, InventoryOutput};
pub use model_error::{ModelError, ModelResult};
pub use models::*;
pub use production::{
    optimize_production, Product, ProductQuantity, ProductionInput, ProductionOutput, Resource,
    ResourceUsage,
};
pub use queueing::{mm1, QueueInput, QueueOutput};
pub use solver_service::*;
pub use value_objects::*;
