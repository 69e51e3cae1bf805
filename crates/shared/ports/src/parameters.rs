/// Port for the host's parameter-substitution step
///
/// Attribute values may contain placeholders that the host resolves before a
/// participant parses them (e.g. sweep values in parameterised runs).
pub trait ParameterProcessor {
    /// Resolve every placeholder the host knows about in `input`
    fn process_string(&self, input: &str) -> String;
}

/// Processor that returns its input untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSubstitution;

impl ParameterProcessor for NoSubstitution {
    fn process_string(&self, input: &str) -> String {
        input.to_string()
    }
}
