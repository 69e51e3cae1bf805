//! Agent Trait
//!
//! Core trait that all simulation participants implement.

use crate::attributes::AgentAttributes;
use hftsim_ports::{ConfigResult, Message, ParameterProcessor, Simulation};

/// A named participant driven by the scheduler
///
/// The scheduler owns the timeline; a participant only reacts to deliveries.
/// Each delivery runs to completion and any follow-up messages are handed
/// back through the [`Simulation`] capability.
pub trait Agent {
    /// Unique participant name, used as message source and destination
    fn name(&self) -> &str;

    /// Apply declarative configuration
    ///
    /// Attribute values are passed through `parameters` before parsing.
    fn configure(
        &mut self,
        attributes: &AgentAttributes,
        parameters: &dyn ParameterProcessor,
    ) -> ConfigResult<()>;

    /// Handle one delivered message
    fn receive_message(&mut self, simulation: &mut dyn Simulation, message: &Message);

    /// Agent type name (for logging and scenario files)
    fn agent_type(&self) -> &'static str;
}
