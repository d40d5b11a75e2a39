use serde::{Deserialize, Serialize};

/// Monthly attendance statistics. Serializable because the client caches it
/// as a single JSON blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub dias_laborados: i32,
    /// Percentage, 0..=100.
    pub puntualidad: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_json_round_trip() {
        let stats = Stats {
            dias_laborados: 10,
            puntualidad: 80,
        };
        let json = serde_json::to_string(&stats).unwrap();
        let back: Stats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }

    #[test]
    fn test_stats_ignores_unknown_keys() {
        let json = r#"{"dias_laborados":5,"puntualidad":90,"extra":true}"#;
        let stats: Stats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.dias_laborados, 5);
        assert_eq!(stats.puntualidad, 90);
    }
}
