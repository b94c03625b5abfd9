use derive_builder::Builder;

use crate::ProtocolError;

/// Punctured PRF configuration.
///
/// Bounds the size of the batches a party accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct PprfConfig {
    /// The maximum number of instances in a batch.
    #[builder(default = "1 << 12")]
    max_batch_num: usize,
    /// The maximum number of leaves of an instance.
    #[builder(default = "1 << 24")]
    max_each_num: usize,
}

impl PprfConfig {
    /// Creates a new builder for the configuration.
    pub fn builder() -> PprfConfigBuilder {
        PprfConfigBuilder::default()
    }

    /// Returns the maximum number of instances in a batch.
    pub fn max_batch_num(&self) -> usize {
        self.max_batch_num
    }

    /// Returns the maximum number of leaves of an instance.
    pub fn max_each_num(&self) -> usize {
        self.max_each_num
    }

    /// Checks that a batch of `batch_num` instances of `each_num` leaves is within bounds.
    pub fn check(&self, batch_num: usize, each_num: usize) -> Result<(), ProtocolError> {
        if batch_num == 0 || each_num == 0 {
            return Err(ProtocolError::InvalidParameter(format!(
                "batch_num ({batch_num}) and each_num ({each_num}) must be positive"
            )));
        }

        if batch_num > self.max_batch_num {
            return Err(ProtocolError::InvalidParameter(format!(
                "batch_num {batch_num} exceeds the maximum {}",
                self.max_batch_num
            )));
        }

        if each_num > self.max_each_num {
            return Err(ProtocolError::InvalidParameter(format!(
                "each_num {each_num} exceeds the maximum {}",
                self.max_each_num
            )));
        }

        Ok(())
    }
}

impl Default for PprfConfig {
    fn default() -> Self {
        PprfConfigBuilder::default().build().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_bounds() {
        let config = PprfConfig::builder()
            .max_batch_num(4)
            .max_each_num(9)
            .build()
            .unwrap();

        assert!(config.check(4, 9).is_ok());
        assert!(config.check(1, 1).is_ok());
        assert!(config.check(5, 9).is_err());
        assert!(config.check(4, 10).is_err());
        assert!(config.check(0, 9).is_err());
        assert!(config.check(4, 0).is_err());
    }
}
