//! Layered settings: defaults, optional `storefront.toml`, environment,
//! then command-line flags, later layers winning.

use std::{collections::HashMap, fs};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub cdn_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:3000/api".into(),
            cdn_url: "http://127.0.0.1:3000/content".into(),
        }
    }
}

pub fn load_settings(api_flag: Option<&str>, cdn_flag: Option<&str>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("storefront.toml") {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_values) => apply_file_values(&mut settings, &file_values),
            Err(err) => tracing::warn!("ignoring unreadable storefront.toml: {err}"),
        }
    }

    apply_env_values(
        &mut settings,
        std::env::var("STOREFRONT_API_URL").ok(),
        std::env::var("STOREFRONT_CDN_URL").ok(),
    );

    apply_flag_values(&mut settings, api_flag, cdn_flag);

    settings
}

fn apply_file_values(settings: &mut Settings, file_values: &HashMap<String, String>) {
    if let Some(v) = file_values.get("api_url") {
        settings.api_url = v.clone();
    }
    if let Some(v) = file_values.get("cdn_url") {
        settings.cdn_url = v.clone();
    }
}

fn apply_env_values(settings: &mut Settings, api_url: Option<String>, cdn_url: Option<String>) {
    if let Some(v) = api_url {
        settings.api_url = v;
    }
    if let Some(v) = cdn_url {
        settings.cdn_url = v;
    }
}

fn apply_flag_values(settings: &mut Settings, api_flag: Option<&str>, cdn_flag: Option<&str>) {
    if let Some(v) = api_flag {
        settings.api_url = v.to_string();
    }
    if let Some(v) = cdn_flag {
        settings.cdn_url = v.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_values_override_defaults() {
        let mut settings = Settings::default();
        let mut file_values = HashMap::new();
        file_values.insert("api_url".to_string(), "https://shop.example/api".to_string());

        apply_file_values(&mut settings, &file_values);

        assert_eq!(settings.api_url, "https://shop.example/api");
        assert_eq!(settings.cdn_url, Settings::default().cdn_url);
    }

    #[test]
    fn env_values_override_file_values() {
        let mut settings = Settings::default();
        let mut file_values = HashMap::new();
        file_values.insert("api_url".to_string(), "https://file.example/api".to_string());
        file_values.insert("cdn_url".to_string(), "https://file.example/cdn".to_string());
        apply_file_values(&mut settings, &file_values);

        apply_env_values(
            &mut settings,
            Some("https://env.example/api".to_string()),
            None,
        );

        assert_eq!(settings.api_url, "https://env.example/api");
        assert_eq!(settings.cdn_url, "https://file.example/cdn");
    }

    #[test]
    fn flag_values_override_env_values() {
        let mut settings = Settings::default();
        apply_env_values(
            &mut settings,
            Some("https://env.example/api".to_string()),
            Some("https://env.example/cdn".to_string()),
        );

        apply_flag_values(&mut settings, Some("https://flag.example/api"), None);

        assert_eq!(settings.api_url, "https://flag.example/api");
        assert_eq!(settings.cdn_url, "https://env.example/cdn");
    }
}
