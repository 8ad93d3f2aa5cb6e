pub mod commit_service;
pub mod handoff;
pub mod pricing_engine;
pub mod selection_controller;
pub mod surface_binder;

pub use commit_service::{CommitRequest, CommitService};
pub use handoff::{HandoffBuilder, HandoffCustomer, HandoffOrder, ReturnUrls, SignedHandoff};
pub use pricing_engine::PricingEngine;
pub use selection_controller::{
    DisplayConfig, DisplaySlots, DisplaySurface, DisplayText, OutputSlot, SelectionController,
    SelectionState, PLACEHOLDER,
};
pub use surface_binder::{bind_when_ready, wait_for_surface, ReadinessPolicy};
