//! # Alias Generator
//!
//! Derives the canonical set of aliases for a project from its applications and
//! environments. Generation is pure: it never reads existing aliases and never merges.
//!
//! - One local alias per application, pointing at the local web root.
//! - One remote alias per (application, environment) pair, when the environment
//!   exposes both an `ssh` and a `public-url` link.
//!
//! In multi-application projects every alias name is suffixed with `--<appId>`.

use log::debug;
use url::Url;

use crate::{
    constants::{
        APP_SUFFIX_SEPARATOR, LOCAL_ALIAS_NAME, PUBLIC_URL_LINK, REMOTE_APP_ROOT,
        ROUTE_PREFIX_SEPARATOR, SSH_LINK,
    },
    models::{AliasMap, AliasRecord, Application, Environment},
};

/// Generates aliases for a project topology.
#[derive(Debug, Clone)]
pub struct AliasGenerator {
    web_root: String,
}

impl AliasGenerator {
    /// Creates a generator that places local web roots at `<sourceDir>/<web_root>`.
    pub fn new(web_root: impl Into<String>) -> Self {
        Self {
            web_root: web_root.into(),
        }
    }

    /// Produces the canonical alias map for `apps` × `environments`.
    pub fn generate(&self, apps: &[Application], environments: &[Environment]) -> AliasMap {
        let multi_app = apps.len() > 1;
        let mut aliases = AliasMap::new();

        for app in apps {
            let single = app.is_single_of(apps.len());
            let suffix = |name: &str| {
                if multi_app {
                    format!("{name}{APP_SUFFIX_SEPARATOR}{}", app.id)
                } else {
                    name.to_string()
                }
            };

            aliases.insert(suffix(LOCAL_ALIAS_NAME), self.local_alias(app, single));

            for environment in environments {
                if let Some(alias) = remote_alias(environment, app, single) {
                    aliases.insert(suffix(&environment.id), alias);
                }
            }
        }

        aliases
    }

    /// The alias for an application's local checkout.
    fn local_alias(&self, app: &Application, single: bool) -> AliasRecord {
        let mut web_root = format!("{}/{}", app.source_dir, self.web_root);
        if !single {
            web_root.push('/');
            web_root.push_str(&app.id);
        }
        AliasRecord::local(web_root)
    }
}

/// The alias for an application deployed on an environment.
///
/// Returns `None` when the environment is not reachable yet: a missing link, or an
/// SSH link without a user or host.
fn remote_alias(environment: &Environment, app: &Application, single: bool) -> Option<AliasRecord> {
    let (Some(ssh), Some(public_url)) = (
        environment.link(SSH_LINK),
        environment.link(PUBLIC_URL_LINK),
    ) else {
        debug!(
            "Skipping remote alias for '{}' on '{}': missing '{}' or '{}' link.",
            app.id, environment.id, SSH_LINK, PUBLIC_URL_LINK
        );
        return None;
    };

    let ssh_url = match Url::parse(ssh) {
        Ok(url) => url,
        Err(e) => {
            debug!(
                "Skipping remote alias for '{}' on '{}': invalid SSH URL '{}': {}",
                app.id, environment.id, ssh, e
            );
            return None;
        }
    };
    let (mut user, host) = match ssh_url.host_str() {
        Some(host) if !host.is_empty() && !ssh_url.username().is_empty() => {
            (ssh_url.username().to_string(), host)
        }
        _ => {
            debug!(
                "Skipping remote alias for '{}' on '{}': SSH URL '{}' lacks a user or host.",
                app.id, environment.id, ssh
            );
            return None;
        }
    };

    let mut uri = public_url.to_string();

    if !single {
        user.push_str(APP_SUFFIX_SEPARATOR);
        user.push_str(app.name());
        if let Some(guess) = app_route_url(public_url, app.name()) {
            if environment.route_urls.contains(&guess) {
                uri = guess;
            }
        }
    }

    Some(AliasRecord::remote(
        uri,
        host,
        user,
        format!("{REMOTE_APP_ROOT}/{}", app.document_root),
    ))
}

/// Builds the URL a multi-app project would route to an application:
/// `http://main.example.com` becomes `http://<app>---main.example.com`.
fn app_route_url(public_url: &str, app_name: &str) -> Option<String> {
    let (scheme, rest) = public_url.split_once("://")?;
    Some(format!(
        "{scheme}://{app_name}{ROUTE_PREFIX_SEPARATOR}{rest}"
    ))
}
