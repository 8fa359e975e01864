//! Immutable client configuration.

use std::fmt;
use std::time::Duration;

use davclnt_core::Settings;

/// Basic-auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}

/// Where and how the client talks to the server.
///
/// Built once through [`ClientConfig::builder`] and never mutated
/// afterwards, so a client holding it can be shared freely across tasks.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    host: String,
    port: Option<u16>,
    credentials: Option<Credentials>,
    root_folder: String,
    timeout: Option<Duration>,
}

impl ClientConfig {
    #[must_use]
    pub fn builder(host: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            host: host.into(),
            port: None,
            login: None,
            password: None,
            root_folder: String::new(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    #[must_use]
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Path prefix applied to every request and stripped from result keys.
    #[must_use]
    pub fn root_folder(&self) -> &str {
        &self.root_folder
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// ## Summary
    /// Returns `scheme://host[:port]`, defaulting the scheme to `http`.
    #[must_use]
    pub fn connection_string(&self) -> String {
        let host = self.host.trim_end_matches('/');
        let mut connection = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_owned()
        } else {
            format!("http://{host}")
        };

        if let Some(port) = self.port {
            connection.push(':');
            connection.push_str(&port.to_string());
        }

        connection
    }
}

impl From<&Settings> for ClientConfig {
    fn from(settings: &Settings) -> Self {
        let mut builder = Self::builder(settings.host.clone()).root_folder(settings.root_folder.clone());

        if let Some(port) = settings.port {
            builder = builder.port(port);
        }
        if let Some(login) = &settings.login {
            builder = builder.login(login.clone());
        }
        if let Some(password) = &settings.password {
            builder = builder.password(password.clone());
        }
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder.build()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone)]
#[must_use]
pub struct ClientConfigBuilder {
    host: String,
    port: Option<u16>,
    login: Option<String>,
    password: Option<String>,
    root_folder: String,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Port appended to the host; `0` means none.
    pub fn port(mut self, port: u16) -> Self {
        self.port = (port > 0).then_some(port);
        self
    }

    pub fn login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn root_folder(mut self, root_folder: impl Into<String>) -> Self {
        self.root_folder = root_folder.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Credentials are only attached when the login is non-empty.
    pub fn build(self) -> ClientConfig {
        let credentials = self
            .login
            .filter(|login| !login.is_empty())
            .map(|login| Credentials {
                login,
                password: self.password.unwrap_or_default(),
            });

        ClientConfig {
            host: self.host,
            port: self.port,
            credentials,
            root_folder: self.root_folder,
            timeout: self.timeout,
        }
    }
}
