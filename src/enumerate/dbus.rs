//! org.freedesktop.systemd1.Manager client

use zbus::{proxy, Connection};

use super::{EnumerateError, UnitEnumerator, UnitFile};

#[proxy(
    interface = "org.freedesktop.systemd1.Manager",
    default_service = "org.freedesktop.systemd1",
    default_path = "/org/freedesktop/systemd1"
)]
pub trait Systemd1Manager {
    /// Returns (path, state) for every unit file systemd knows about
    fn list_unit_files(&self) -> zbus::Result<Vec<(String, String)>>;
}

/// Enumerates unit files through the running systemd instance
pub struct SystemdEnumerator {
    connection: Connection,
}

impl SystemdEnumerator {
    /// Connect to the system manager, or the per-user manager on the session bus
    pub async fn connect(user: bool) -> Result<Self, EnumerateError> {
        let connection = if user {
            Connection::session().await?
        } else {
            Connection::system().await?
        };
        Ok(Self::with_connection(connection))
    }

    pub fn with_connection(connection: Connection) -> Self {
        Self { connection }
    }
}

impl UnitEnumerator for SystemdEnumerator {
    async fn list_unit_files(&self) -> Result<Vec<UnitFile>, EnumerateError> {
        let proxy = Systemd1ManagerProxy::new(&self.connection).await?;
        let files = proxy.list_unit_files().await?;
        log::debug!("systemd reported {} unit files", files.len());

        Ok(files
            .into_iter()
            .map(|(path, status)| UnitFile::new(path, status))
            .collect())
    }
}
