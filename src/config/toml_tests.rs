//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.credentials.token_var.is_none());
        assert!(config.server.bind.is_none());
        assert!(config.webhook.envelope_key.is_none());
        assert!(config.logging.format.is_none());
        assert!(!config.logging.verbose);
    }

    #[test]
    fn parse_credentials_section() {
        let toml = r#"
            [credentials]
            token_var = "TASKS_TOKEN"
            base_url_var = "TASKS_URL"
            on_missing = "halt"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let creds = &config.credentials;

        assert_eq!(creds.token_var.as_deref(), Some("TASKS_TOKEN"));
        assert_eq!(creds.base_url_var.as_deref(), Some("TASKS_URL"));
        assert_eq!(creds.on_missing.as_deref(), Some("halt"));
    }

    #[test]
    fn parse_server_and_webhook_sections() {
        let toml = r#"
            [server]
            bind = "127.0.0.1:9000"
            path = "/hooks/vikunja"

            [webhook]
            envelope_key = "payload"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.server.bind.as_deref(), Some("127.0.0.1:9000"));
        assert_eq!(config.server.path.as_deref(), Some("/hooks/vikunja"));
        assert_eq!(config.webhook.envelope_key.as_deref(), Some("payload"));
    }

    #[test]
    fn parse_logging_section() {
        let toml = r#"
            [logging]
            format = "pretty"
            verbose = true
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.logging.format.as_deref(), Some("pretty"));
        assert!(config.logging.verbose);
    }
}

mod rejection {
    use super::*;

    #[test]
    fn unknown_section_is_rejected() {
        let result = TomlConfig::parse("[retry]\nmax_attempts = 3");

        assert!(result.is_err());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r#"
            [credentials]
            token = "inline secrets are not accepted"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(TomlConfig::parse("[logging]\nverbose = \"yes\"").is_err());
    }

    #[test]
    fn invalid_toml_syntax() {
        let err = TomlConfig::parse("[server\nbind = ").unwrap_err();

        assert!(err.to_string().starts_with("Failed to parse TOML config"));
    }
}

mod template {
    use super::*;

    #[test]
    fn template_parses() {
        let template = default_config_template();

        assert!(TomlConfig::parse(&template).is_ok());
    }

    #[test]
    fn template_mentions_every_section() {
        let template = default_config_template();

        for section in ["[credentials]", "[server]", "[webhook]", "[logging]"] {
            assert!(template.contains(section), "missing {section}");
        }
    }

    #[test]
    fn template_uncommented_values_are_valid() {
        let uncommented: String = default_config_template()
            .lines()
            .map(|line| line.strip_prefix("# ").unwrap_or(line))
            .filter(|line| line.starts_with('[') || line.contains(" = "))
            .collect::<Vec<_>>()
            .join("\n");

        let config = TomlConfig::parse(&uncommented).unwrap();

        assert_eq!(config.credentials.token_var.as_deref(), Some("VIKUNJA_API_TOKEN"));
        assert_eq!(config.server.bind.as_deref(), Some("0.0.0.0:8080"));
        assert_eq!(config.webhook.envelope_key.as_deref(), Some("body"));
    }
}
