//! Connection parameters held by a [`CommandRunner`](super::CommandRunner).

use std::fmt;

/// Credentials and location of the target database.
///
/// Immutable once built. Nothing is validated here; bad credentials only
/// surface on the first statement.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    user: String,
    password: String,
    database: String,
    address: String,
    port: Option<u16>,
}

impl ConnectionParams {
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
        address: impl Into<String>,
        port: Option<u16>,
    ) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            database: database.into(),
            address: address.into(),
            port,
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("address", &self.address)
            .field("port", &self.port)
            .finish()
    }
}
