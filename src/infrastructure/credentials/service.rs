use std::sync::Arc;

use super::{ChainedCredentialProvider, EnvCredentialProvider, PatternFileProvider};
use crate::config::AppConfig;
use crate::domain::{CredentialKind, CredentialSet, DomainError, Environment, Resolution};

/// Resolves every credential the migration tool needs.
///
/// Precedence per credential:
/// - database id: config file, then environment
/// - account id: environment
/// - api token: environment
#[derive(Debug)]
pub struct CredentialResolver {
    database_id: ChainedCredentialProvider,
    env_only: ChainedCredentialProvider,
    hints: Vec<(CredentialKind, String)>,
}

impl CredentialResolver {
    pub fn new(config: &AppConfig, env: Environment) -> Result<Self, DomainError> {
        let file = Arc::new(PatternFileProvider::new(
            config.sources.wrangler_path.clone(),
            &config.sources.database_id_field,
        )?);
        let env = Arc::new(EnvCredentialProvider::new(env).with_vars(&config.env));

        let database_id = ChainedCredentialProvider::builder()
            .with_provider(file)
            .with_provider(env.clone())
            .build();
        let env_only = ChainedCredentialProvider::builder().with_provider(env).build();

        let hints = CredentialKind::ALL
            .into_iter()
            .map(|kind| (kind, Self::hint_for(config, kind)))
            .collect();

        Ok(Self {
            database_id,
            env_only,
            hints,
        })
    }

    pub fn resolve(&self, kind: CredentialKind) -> Resolution {
        match kind {
            CredentialKind::DatabaseId => self.database_id.resolve(kind),
            CredentialKind::AccountId | CredentialKind::ApiToken => self.env_only.resolve(kind),
        }
    }

    pub fn resolve_all(&self) -> CredentialSet {
        CredentialSet {
            account_id: self.resolve(CredentialKind::AccountId),
            database_id: self.resolve(CredentialKind::DatabaseId),
            api_token: self.resolve(CredentialKind::ApiToken),
        }
    }

    /// What the user should set to supply `kind`
    pub fn hint(&self, kind: CredentialKind) -> String {
        self.hints
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, hint)| hint.clone())
            .unwrap_or_else(|| kind.to_string())
    }

    fn hint_for(config: &AppConfig, kind: CredentialKind) -> String {
        let var = config.env.var_for(kind);
        match kind {
            CredentialKind::DatabaseId => format!(
                "\"{}\" in {} or {}",
                config.sources.database_id_field,
                config.sources.wrangler_path.display(),
                var
            ),
            _ => var.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tempfile::NamedTempFile;

    use crate::domain::{CredentialProvider, CredentialSource};

    /// Log sink shared with a test subscriber
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    /// Run `f` with a subscriber that writes into the returned buffer
    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        (result, logs.contents())
    }

    fn wrangler(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    fn config_for(path: impl Into<PathBuf>) -> AppConfig {
        let mut config = AppConfig::default();
        config.sources.wrangler_path = path.into();
        config
    }

    fn env_with_db(value: &str) -> Environment {
        Environment::new().with_var("CLOUDFLARE_D1_DATABASE_ID", value)
    }

    #[test]
    fn test_file_wins_over_environment() {
        let file = wrangler(r#"{ "database_id": "abc123" }"#);
        let resolver = CredentialResolver::new(&config_for(file.path()), env_with_db("zzz999")).unwrap();

        let resolution = resolver.resolve(CredentialKind::DatabaseId);
        assert_eq!(resolution.value(), Some("abc123"));
        assert!(matches!(
            resolution.credential().unwrap().source(),
            CredentialSource::ConfigFile { .. }
        ));
    }

    #[test]
    fn test_fallback_when_key_absent() {
        let file = wrangler(r#"{ "name": "app" }"#);
        let resolver = CredentialResolver::new(&config_for(file.path()), env_with_db("zzz999")).unwrap();

        assert_eq!(resolver.resolve(CredentialKind::DatabaseId).value(), Some("zzz999"));
    }

    #[test]
    fn test_fallback_when_file_missing() {
        let resolver = CredentialResolver::new(
            &config_for("/nonexistent/wrangler.jsonc"),
            env_with_db("env-value"),
        )
        .unwrap();

        let (resolution, logs) =
            with_captured_logs(|| resolver.resolve(CredentialKind::DatabaseId));

        assert_eq!(resolution.value(), Some("env-value"));
        assert!(logs.contains("WARN"), "expected a warning, got: {logs}");
        assert!(logs.contains("/nonexistent/wrangler.jsonc"));
    }

    #[test]
    fn test_fallback_when_file_not_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{\"x\":\"\xff\",\"database_id\":\"abc\"}").unwrap();
        file.flush().unwrap();

        let provider = PatternFileProvider::new(file.path(), "database_id").unwrap();
        let resolver =
            CredentialResolver::new(&config_for(file.path()), env_with_db("env-value")).unwrap();

        let ((lookup, resolution), logs) = with_captured_logs(|| {
            (
                provider.lookup(CredentialKind::DatabaseId),
                resolver.resolve(CredentialKind::DatabaseId),
            )
        });

        assert!(lookup.is_none());
        assert_eq!(resolution.value(), Some("env-value"));
        assert!(logs.contains("WARN"));
    }

    #[test]
    fn test_no_warning_when_file_has_value() {
        let file = wrangler(r#"{ "database_id": "abc123" }"#);
        let resolver = CredentialResolver::new(&config_for(file.path()), Environment::new()).unwrap();

        let (resolution, logs) =
            with_captured_logs(|| resolver.resolve(CredentialKind::DatabaseId));

        assert_eq!(resolution.value(), Some("abc123"));
        assert!(!logs.contains("WARN"));
    }

    #[test]
    fn test_absent_when_neither_source_has_value() {
        let file = wrangler(r#"{ "name": "app" }"#);
        let resolver = CredentialResolver::new(&config_for(file.path()), Environment::new()).unwrap();

        assert!(matches!(
            resolver.resolve(CredentialKind::DatabaseId),
            Resolution::Absent(CredentialKind::DatabaseId)
        ));
    }

    #[test]
    fn test_irregular_spacing() {
        let file = wrangler(r#"{ "database_id"   :    "spaced-id" }"#);
        let resolver = CredentialResolver::new(&config_for(file.path()), Environment::new()).unwrap();

        assert_eq!(
            resolver.resolve(CredentialKind::DatabaseId).value(),
            Some("spaced-id")
        );
    }

    #[test]
    fn test_empty_string_does_not_fall_back() {
        let file = wrangler(r#"{ "database_id": "" }"#);
        let resolver = CredentialResolver::new(&config_for(file.path()), env_with_db("zzz999")).unwrap();

        assert_eq!(resolver.resolve(CredentialKind::DatabaseId).value(), Some(""));
    }

    #[test]
    fn test_account_and_token_ignore_file() {
        let file = wrangler(r#"{ "account_id": "from-file", "database_id": "db" }"#);
        let env = Environment::new()
            .with_var("CLOUDFLARE_ACCOUNT_ID", "acct")
            .with_var("CF_D1_TOKEN", "tok");
        let resolver = CredentialResolver::new(&config_for(file.path()), env).unwrap();

        let set = resolver.resolve_all();
        assert_eq!(set.account_id.value(), Some("acct"));
        assert_eq!(set.database_id.value(), Some("db"));
        assert_eq!(set.api_token.value(), Some("tok"));
        assert!(set.missing().is_empty());
    }

    #[test]
    fn test_custom_variable_names() {
        let mut config = config_for("/nonexistent/wrangler.jsonc");
        config.env.database_id = "MY_DB".to_string();
        let env = Environment::new()
            .with_var("MY_DB", "custom")
            .with_var("CLOUDFLARE_D1_DATABASE_ID", "default");
        let resolver = CredentialResolver::new(&config, env).unwrap();

        assert_eq!(resolver.resolve(CredentialKind::DatabaseId).value(), Some("custom"));
    }

    #[test]
    fn test_hints_name_sources() {
        let resolver =
            CredentialResolver::new(&config_for("wrangler.jsonc"), Environment::new()).unwrap();

        assert_eq!(resolver.hint(CredentialKind::ApiToken), "CF_D1_TOKEN");
        assert_eq!(
            resolver.hint(CredentialKind::DatabaseId),
            "\"database_id\" in wrangler.jsonc or CLOUDFLARE_D1_DATABASE_ID"
        );
    }
}
