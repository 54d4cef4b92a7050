use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Settings for settlement computation and report rendering.
///
/// Every field has a default, so a partial JSON object such as
/// `{ "currency_symbol": "$" }` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Balances with magnitude at or below this are treated as settled.
    pub epsilon: Decimal,
    /// Decimal places settlement amounts are rounded to.
    pub decimal_places: u32,
    /// Prefix for amounts in rendered reports.
    pub currency_symbol: String,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            epsilon: Decimal::new(1, 2),
            decimal_places: 2,
            currency_symbol: "₹".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = SettlementConfig::default();
        assert_eq!(config.epsilon, dec!(0.01));
        assert_eq!(config.decimal_places, 2);
        assert_eq!(config.currency_symbol, "₹");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SettlementConfig =
            serde_json::from_str(r#"{ "currency_symbol": "$" }"#).unwrap();
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.epsilon, dec!(0.01));
        assert_eq!(config.decimal_places, 2);
    }

    #[test]
    fn test_config_epsilon_from_string() {
        let config: SettlementConfig =
            serde_json::from_str(r#"{ "epsilon": "0.5" }"#).unwrap();
        assert_eq!(config.epsilon, dec!(0.5));
    }
}
