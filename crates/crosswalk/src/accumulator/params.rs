use serde::{Deserialize, Serialize};

/// Configuration for the crosswalk accumulator.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosswalkParams {
    /// Minimum accumulated hit count for a pixel to count as stable crosswalk.
    ///
    /// The comparison is inclusive (`count >= count_th_crosswalk`), so `0`
    /// marks every pixel stable.
    pub count_th_crosswalk: u32,
}

impl Default for CrosswalkParams {
    fn default() -> Self {
        Self {
            count_th_crosswalk: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let params: CrosswalkParams = serde_json::from_str("{}").expect("parse");
        assert_eq!(params, CrosswalkParams::default());

        let params: CrosswalkParams =
            serde_json::from_str(r#"{"count_th_crosswalk": 3}"#).expect("parse");
        assert_eq!(params.count_th_crosswalk, 3);
    }
}
