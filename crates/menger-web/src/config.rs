use menger_core::config::ViewerConfig;
use menger_core::error::MengerError;

/// Embedded viewer settings. Editable without touching code; missing
/// fields fall back to the compiled-in defaults.
const VIEWER_CONFIG_RON: &str = r#"(
    rotation_speed: 0.05,
    zoom_speed: 0.1,
    roll_speed: 0.1,
    pan_speed: 0.1,
    initial_level: 1,
    max_level: 4,
)"#;

/// Parse the embedded viewer config.
pub fn load_viewer_config() -> Result<ViewerConfig, MengerError> {
    parse_viewer_config(VIEWER_CONFIG_RON)
}

fn parse_viewer_config(src: &str) -> Result<ViewerConfig, MengerError> {
    let options = ron::Options::default();
    options
        .from_str(src)
        .map_err(|e| MengerError::ConfigParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let cfg = load_viewer_config().expect("embedded config must parse");
        assert_eq!(cfg.initial_level, 1);
        assert_eq!(cfg.max_level, 4);
        assert_eq!(cfg.rotation_speed, 0.05);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let cfg = parse_viewer_config("(max_level: 3)").expect("partial config must parse");
        let defaults = ViewerConfig::default();
        assert_eq!(cfg.max_level, 3);
        assert_eq!(cfg.zoom_speed, defaults.zoom_speed);
        assert_eq!(cfg.initial_level, defaults.initial_level);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(parse_viewer_config("(max_level: banana)").is_err());
    }
}
