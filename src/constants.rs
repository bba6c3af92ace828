// src/constants.rs

/// The name of the directory holding sitealias configuration (inside the system config dir).
pub const CONFIG_DIR_NAME: &str = "sitealias";

/// The name of the settings file (in ~/.config/sitealias/).
pub const SETTINGS_FILENAME: &str = "config.toml";

/// Environment variable that overrides the location of the settings file.
pub const SETTINGS_PATH_ENV: &str = "SITEALIAS_CONFIG";

/// The name of the alias generated for each application's local checkout.
pub const LOCAL_ALIAS_NAME: &str = "_local";

/// Separator placed between an alias name and the application it belongs to.
pub const APP_SUFFIX_SEPARATOR: &str = "--";

/// Separator placed between an application name and the host in multi-app route URLs.
pub const ROUTE_PREFIX_SEPARATOR: &str = "---";

/// Suffix appended to the normalized product name to build the ownership key.
pub const OWNERSHIP_KEY_SUFFIX: &str = "-auto-remove";

/// Root directory of every application on a remote environment.
pub const REMOTE_APP_ROOT: &str = "/app";

/// Environment link holding the SSH URL. Required for a remote alias.
pub const SSH_LINK: &str = "ssh";

/// Environment link holding the public URL. Required for a remote alias.
pub const PUBLIC_URL_LINK: &str = "public-url";
