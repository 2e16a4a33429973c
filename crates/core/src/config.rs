use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use toml_edit::{DocumentMut, value};

trait ConfigSerializeDefault {
    fn fix_config(self, name: &str, doc: &mut DocumentMut);
}

macro_rules! impl_simple_default {
    ( $( $type:ty ),* ) => {
        $(
            impl ConfigSerializeDefault for $type {
                fn fix_config(self, name: &str, doc: &mut DocumentMut) {
                    doc.entry(name).or_insert_with(|| value(self));
                }
            }
        )*
    }
}

impl_simple_default!(String, i64, bool);

macro_rules! gen_config {
    (
        $( $(#[$meta:meta])* $name:ident: $type:ty = $default:expr ),* $(,)?
    ) => {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct ServiceConfig {
            $(
                $(#[$meta])*
                pub $name: $type,
            )*
        }

        impl ServiceConfig {
            /// Reads the config file, writing back any missing keys with
            /// their defaults. A missing file is created.
            pub fn load(path: impl AsRef<Path>) -> Result<ServiceConfig> {
                let path = path.as_ref();
                let str = match fs::read_to_string(path) {
                    Ok(str) => str,
                    Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
                    Err(err) => {
                        return Err(err)
                            .with_context(|| format!("Failed to read {}", path.display()))
                    }
                };
                let mut doc = str
                    .parse::<DocumentMut>()
                    .with_context(|| format!("Failed to parse {}", path.display()))?;

                $(
                    <$type as ConfigSerializeDefault>::fix_config($default, stringify!($name), &mut doc);
                )*

                let patched = doc.to_string();
                if str != patched {
                    fs::write(path, &patched)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                }

                toml::from_str(&patched)
                    .with_context(|| format!("Invalid config in {}", path.display()))
            }
        }

        impl Default for ServiceConfig {
            fn default() -> Self {
                ServiceConfig {
                    $( $name: $default, )*
                }
            }
        }
    };
}

gen_config! {
    /// Base URL of the network service.
    api_host: String = "https://lclpnet.work".to_string(),
    api_token: String = String::new(),
    request_timeout_secs: i64 = 10,
    message_prefix: String = "LCLPNetwork".to_string(),
    default_language: String = "en_us".to_string(),
    /// Directory with `<locale>.json` translation files.
    translations_dir: String = "lang".to_string(),
    /// Log remote failures of commands to the debug sink.
    debug: bool = false,
}

impl ServiceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1) as u64)
    }
}
