// Copyright Alexandre D. Díaz
use config::Config;
use lazy_static::lazy_static;
use sqlitedb::connection::ConnectionSettings;
use url::Url;

#[derive(Debug)]
pub struct BankrServerConfig {
    bind_address: String,
    port: u16,
    workers: usize,
    template_autoreload: bool,
    template_dir: String,
    static_dir: String,
    allowed_origins: Vec<Url>,
    cookie_key_bytes: Vec<u8>,
    cookie_secure: bool,
    db_settings: ConnectionSettings,
    db_pool_max_size: u32,
}

/// Integer setting that must fit `T` and be at least `min`; anything else
/// falls back to `def`.
fn get_bounded<T: TryFrom<i64>>(settings: &Config, key: &str, def: T, min: i64) -> T {
    match settings.get_int(key) {
        Ok(value) => match T::try_from(value) {
            Ok(bounded) if value >= min => bounded,
            _ => {
                log::warn!("invalid value {value} for '{key}', using the default");
                def
            }
        },
        Err(_) => def,
    }
}

impl BankrServerConfig {
    pub fn new() -> BankrServerConfig {
        let settings = Config::builder()
            .add_source(config::File::with_name("./server").required(false))
            .add_source(config::Environment::with_prefix("BANKR"))
            .build()
            .unwrap_or_else(|err| {
                log::error!("can't load the server configuration, using defaults: {err}");
                Config::default()
            });
        BankrServerConfig::from_settings(&settings)
    }

    pub fn from_settings(settings: &Config) -> BankrServerConfig {
        let get_string = |key: &str, def: &str| settings.get_string(key).unwrap_or(def.to_string());

        let bind_address = get_string("bind_address", "0.0.0.0");
        let port: u16 = get_bounded(settings, "port", 8080, 0);
        let workers: usize = get_bounded(settings, "workers", 2, 1);
        let template_autoreload = settings.get_bool("template_autoreload").unwrap_or(false);
        let template_dir = get_string("template_dir", "./web/templates");
        let static_dir = get_string("static_dir", "./static");
        let allowed_origins = settings
            .get_array("allowed_origins")
            .unwrap_or_else(|_| Vec::new())
            .iter()
            .filter_map(|x| match Url::parse(&x.to_string()) {
                Ok(url) => Some(url),
                Err(err) => {
                    log::warn!("ignoring allowed origin '{x}': {err}");
                    None
                }
            })
            .collect::<Vec<Url>>();
        let cookie_key = get_string("cookie_key", "");
        let cookie_key_bytes = cookie_key.into_bytes();
        let cookie_secure = settings.get_bool("cookie_secure").unwrap_or(false);
        let db_settings = ConnectionSettings {
            driver: get_string("sql_driver", "sqlite"),
            server: get_string("sql_server", "data"),
            database: get_string("sql_database", "bankr"),
            username: get_string("sql_username", ""),
            password: get_string("sql_password", ""),
        };
        let db_pool_max_size: u32 = get_bounded(settings, "db_pool_max_size", 15, 1);
        BankrServerConfig {
            bind_address,
            port,
            workers,
            template_autoreload,
            template_dir,
            static_dir,
            allowed_origins,
            cookie_key_bytes,
            cookie_secure,
            db_settings,
            db_pool_max_size,
        }
    }

    pub fn get_bind_address(&self) -> &String {
        &self.bind_address
    }

    pub fn get_port(&self) -> &u16 {
        &self.port
    }

    pub fn get_workers(&self) -> &usize {
        &self.workers
    }

    pub fn get_template_autoreload(&self) -> bool {
        self.template_autoreload
    }

    pub fn get_template_dir(&self) -> &String {
        &self.template_dir
    }

    pub fn get_static_dir(&self) -> &String {
        &self.static_dir
    }

    pub fn get_allowed_origins(&self) -> &Vec<Url> {
        &self.allowed_origins
    }

    pub fn is_allowed_origin(&self, origin: &str) -> bool {
        if self.get_allowed_origins().is_empty() {
            return true;
        }
        let Ok(url) = Url::parse(origin) else {
            return false;
        };
        self.get_allowed_origins().iter().any(|origin_url| {
            origin_url.scheme() == url.scheme()
                && origin_url.domain() == url.domain()
                && origin_url.port() == url.port()
        })
    }

    pub fn get_cookie_key_bytes(&self) -> &Vec<u8> {
        &self.cookie_key_bytes
    }

    pub fn is_cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    pub fn get_db_settings(&self) -> &ConnectionSettings {
        &self.db_settings
    }

    pub fn get_db_pool_max_size(&self) -> &u32 {
        &self.db_pool_max_size
    }
}

lazy_static! {
    pub static ref SERVER_CONFIG: BankrServerConfig = BankrServerConfig::new();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Config::builder().build().unwrap();
        let config = BankrServerConfig::from_settings(&settings);
        assert_eq!(config.get_port(), &8080);
        assert_eq!(config.get_workers(), &2);
        assert_eq!(config.get_db_pool_max_size(), &15);
        assert_eq!(config.get_db_settings().driver, "sqlite");
        assert_eq!(config.get_db_settings().database, "bankr");
        assert_eq!(config.get_template_dir(), "./web/templates");
        assert!(config.is_allowed_origin("http://localhost:8080"));
    }

    #[test]
    fn test_out_of_range_integers_use_defaults() {
        let settings = Config::builder()
            .set_override("port", 70000_i64)
            .unwrap()
            .set_override("workers", -3_i64)
            .unwrap()
            .set_override("db_pool_max_size", 0_i64)
            .unwrap()
            .build()
            .unwrap();
        let config = BankrServerConfig::from_settings(&settings);
        assert_eq!(config.get_port(), &8080);
        assert_eq!(config.get_workers(), &2);
        assert_eq!(config.get_db_pool_max_size(), &15);
    }

    #[test]
    fn test_overrides() {
        let settings = Config::builder()
            .set_override("port", 9090_i64)
            .unwrap()
            .set_override("db_pool_max_size", 4_i64)
            .unwrap()
            .set_override("sql_database", "other")
            .unwrap()
            .set_override("allowed_origins", vec!["https://banks.example.com", "not a url"])
            .unwrap()
            .build()
            .unwrap();
        let config = BankrServerConfig::from_settings(&settings);
        assert_eq!(config.get_port(), &9090);
        assert_eq!(config.get_db_pool_max_size(), &4);
        assert_eq!(config.get_db_settings().database, "other");
        assert_eq!(config.get_allowed_origins().len(), 1);
        assert!(config.is_allowed_origin("https://banks.example.com"));
        assert!(!config.is_allowed_origin("https://evil.example.com"));
    }
}
