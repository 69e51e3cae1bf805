//! Declarative agent attributes
//!
//! Agents are configured from a flat set of string attributes (as written in
//! a scenario file). Every value goes through the host's parameter
//! substitution before it is parsed into a typed setting.

use hftsim_core::Money;
use hftsim_ports::{ConfigError, ConfigResult, ParameterProcessor};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

/// Named, string-valued configuration attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentAttributes(BTreeMap<String, String>);

impl AgentAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Raw value, before substitution
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Substituted value of an attribute, if present
    pub fn string(&self, name: &str, parameters: &dyn ParameterProcessor) -> Option<String> {
        self.get(name).map(|raw| parameters.process_string(raw))
    }

    /// Substituted and parsed value of an attribute, if present
    ///
    /// Surrounding whitespace is ignored; anything else that does not parse
    /// is an error.
    pub fn parse<T>(
        &self,
        name: &str,
        parameters: &dyn ParameterProcessor,
    ) -> ConfigResult<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.string(name, parameters) {
            Some(value) => value
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|e| ConfigError::parse(name, value.as_str(), e)),
            None => Ok(None),
        }
    }

    /// Substituted value of a currency attribute, if present
    ///
    /// Accepts plain decimals (`"0.01"`) as well as scientific notation
    /// (`"1e-2"`).
    pub fn money(
        &self,
        name: &str,
        parameters: &dyn ParameterProcessor,
    ) -> ConfigResult<Option<Money>> {
        match self.string(name, parameters) {
            Some(value) => {
                let text = value.trim();
                Decimal::from_str(text)
                    .or_else(|_| Decimal::from_scientific(text))
                    .map(Some)
                    .map_err(|e| ConfigError::parse(name, value.as_str(), e))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hftsim_ports::NoSubstitution;
    use rust_decimal_macros::dec;

    struct SweepValue;

    impl ParameterProcessor for SweepValue {
        fn process_string(&self, input: &str) -> String {
            input.replace("{x}", "7")
        }
    }

    #[test]
    fn test_missing_attribute_is_none() {
        let attrs = AgentAttributes::new();
        let value: Option<u64> = attrs.parse("timeStep", &NoSubstitution).unwrap();
        assert!(value.is_none());
        assert!(attrs.money("halfSpread", &NoSubstitution).unwrap().is_none());
    }

    #[test]
    fn test_parse_applies_substitution() {
        let attrs = AgentAttributes::from_pairs([("timeStep", "{x}")]);
        let value: Option<u64> = attrs.parse("timeStep", &SweepValue).unwrap();
        assert_eq!(value, Some(7));
    }

    #[test]
    fn test_parse_error_names_attribute() {
        let attrs = AgentAttributes::from_pairs([("depth", "deep")]);
        let err = attrs.parse::<u32>("depth", &NoSubstitution).unwrap_err();
        match err {
            ConfigError::Parse {
                attribute, value, ..
            } => {
                assert_eq!(attribute, "depth");
                assert_eq!(value, "deep");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_money_formats() {
        let attrs = AgentAttributes::from_pairs([
            ("plain", "0.01"),
            ("sci", "1e-2"),
            ("spaced", " 110 "),
            ("bad", "ten"),
        ]);
        assert_eq!(attrs.money("plain", &NoSubstitution).unwrap(), Some(dec!(0.01)));
        assert_eq!(attrs.money("sci", &NoSubstitution).unwrap(), Some(dec!(0.01)));
        assert_eq!(attrs.money("spaced", &NoSubstitution).unwrap(), Some(dec!(110)));
        assert!(attrs.money("bad", &NoSubstitution).is_err());
    }

    #[test]
    fn test_negative_unsigned_is_error() {
        let attrs = AgentAttributes::from_pairs([("timeStep", "-1")]);
        assert!(attrs.parse::<u64>("timeStep", &NoSubstitution).is_err());
    }
}
